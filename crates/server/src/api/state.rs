//! 统一的应用状态。

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::SimilaritySettings;
use crate::repository::{
    ProblemRepository, SeaOrmProblemRepository, SeaOrmSubmissionRepository, SubmissionRepository,
};

/// 统一的应用状态，包含所有服务共享的数据。
#[derive(Clone)]
pub struct AppState {
    /// 题目存储。
    pub problems: Arc<dyn ProblemRepository>,
    /// 提交存储。
    pub submissions: Arc<dyn SubmissionRepository>,
    /// 查重报告的默认参数。
    pub similarity: SimilaritySettings,
}

impl AppState {
    /// 创建新的应用状态。
    pub fn new(
        problems: Arc<dyn ProblemRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        similarity: SimilaritySettings,
    ) -> Self {
        Self {
            problems,
            submissions,
            similarity,
        }
    }

    /// 基于数据库连接创建应用状态。
    pub fn from_database(db: DatabaseConnection, similarity: SimilaritySettings) -> Self {
        Self::new(
            Arc::new(SeaOrmProblemRepository::new(db.clone())),
            Arc::new(SeaOrmSubmissionRepository::new(db)),
            similarity,
        )
    }
}
