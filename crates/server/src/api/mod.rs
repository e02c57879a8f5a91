//! API 路由模块。
//!
//! 提供教师仪表盘所需的查重报告 API。

pub mod error;
pub mod health;
pub mod similarity;
pub mod state;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;
pub use similarity::create_similarity_router;
pub use state::AppState;

/// 组装完整的 API 路由。
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .merge(create_similarity_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
