use axum::Json;
use serde::Serialize;

/// Body of both health checks
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `OK` while the process serves requests
    pub status: &'static str,
    /// Server time of the answer
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Which health check answered
    pub message: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: chrono::Utc::now(),
        message: "Storefront server running",
    })
}

/// `GET /api/health`
pub async fn api_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: chrono::Utc::now(),
        message: "API v1 active",
    })
}
