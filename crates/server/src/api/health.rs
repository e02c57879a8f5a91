//! 健康检查。

use axum::Json;
use logicode_api_types::HealthCheckResponse;

pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
