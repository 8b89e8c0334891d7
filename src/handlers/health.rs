use axum::Json;
use tracing::instrument;

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    success: bool,
    message: &'static str,
}

#[instrument(name = "health")]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Healthy",
    })
}
