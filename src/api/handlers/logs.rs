use crate::{api::AppState, core::log, entities::LogEntry, errors::Result};
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// `GET /api/logs`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<LogEntry>>> {
    log::list_logs(&state.store).await.map(Json)
}

/// `DELETE /api/logs`
pub async fn clear(State(state): State<AppState>) -> Result<Json<Value>> {
    let cleared = log::clear_logs(&state.store).await?;
    Ok(Json(json!({ "message": "Logs cleared", "cleared": cleared })))
}
