use crate::entity::submission;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use logicode_core::domain::{Language, ProblemId, Submission, SubmissionId, UserId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub language: Language,
    pub source_code: Vec<u8>,
}

/// Source of the submissions a similarity report runs over.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, new_submission: NewSubmission) -> Result<Submission>;
    async fn find_by_id(&self, submission_id: SubmissionId) -> Result<Option<Submission>>;
    /// Oldest first; ties broken by id.
    async fn list_by_problem_id(&self, problem_id: ProblemId) -> Result<Vec<Submission>>;
}

#[derive(Clone)]
pub struct SeaOrmSubmissionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_language(code: i16) -> Result<Language> {
        match code {
            0 => Ok(Language::Rust),
            1 => Ok(Language::Cpp),
            2 => Ok(Language::Java),
            3 => Ok(Language::Python),
            4 => Ok(Language::Go),
            5 => Ok(Language::JavaScript),
            6 => Ok(Language::TypeScript),
            7 => Ok(Language::C),
            _ => Err(anyhow!("invalid submission.language code from database: {code}")),
        }
    }

    fn map_language_code(language: Language) -> i16 {
        match language {
            Language::Rust => 0,
            Language::Cpp => 1,
            Language::Java => 2,
            Language::Python => 3,
            Language::Go => 4,
            Language::JavaScript => 5,
            Language::TypeScript => 6,
            Language::C => 7,
        }
    }

    fn map_model(model: submission::Model) -> Result<Submission> {
        let id = SubmissionId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid submission.id '{}' from database: {e}", model.id))?;
        let user_id = UserId::from_str(&model.user_id).map_err(|e| {
            anyhow!(
                "invalid submission.user_id '{}' from database: {e}",
                model.user_id
            )
        })?;
        let problem_id = ProblemId::from_str(&model.problem_id).map_err(|e| {
            anyhow!(
                "invalid submission.problem_id '{}' from database: {e}",
                model.problem_id
            )
        })?;

        Ok(Submission {
            id,
            user_id,
            problem_id,
            language: Self::map_language(model.language)?,
            raw_code: model.source_code,
            submitted_at: model.created_at,
        })
    }
}

#[async_trait]
impl SubmissionRepository for SeaOrmSubmissionRepository {
    async fn create(&self, new_submission: NewSubmission) -> Result<Submission> {
        let id = SubmissionId::new();

        let active_model = submission::ActiveModel {
            id: Set(id.to_string()),
            user_id: Set(new_submission.user_id.to_string()),
            problem_id: Set(new_submission.problem_id.to_string()),
            language: Set(Self::map_language_code(new_submission.language)),
            source_code: Set(new_submission.source_code),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Self::map_model(model)
    }

    async fn find_by_id(&self, submission_id: SubmissionId) -> Result<Option<Submission>> {
        let model = submission::Entity::find_by_id(submission_id.to_string())
            .one(&self.db)
            .await?;

        model.map(Self::map_model).transpose()
    }

    async fn list_by_problem_id(&self, problem_id: ProblemId) -> Result<Vec<Submission>> {
        let models = submission::Entity::find()
            .filter(submission::Column::ProblemId.eq(problem_id.to_string()))
            .order_by_asc(submission::Column::CreatedAt)
            .order_by_asc(submission::Column::Id)
            .all(&self.db)
            .await?;

        models.into_iter().map(Self::map_model).collect()
    }
}
