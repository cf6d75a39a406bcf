use crate::api::HealthResponse;
use axum::Json;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "OK".to_string(),
    })
}
