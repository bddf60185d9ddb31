use crate::{
    api::AppState,
    core::report::{self, Stats},
    errors::Result,
};
use axum::{Json, extract::State};

/// `GET /api/stats`
pub async fn stats(State(state): State<AppState>) -> Result<Json<Stats>> {
    report::load_stats(&state.store).await.map(Json)
}
