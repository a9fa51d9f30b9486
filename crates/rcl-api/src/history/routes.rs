use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use rcl_review::HistoryEntry;

use crate::{ApiState, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/history", get(list_history).delete(clear_history))
}

/// Past reviews, oldest first.
async fn list_history(State(state): State<ApiState>) -> Json<Vec<HistoryEntry>> {
    Json(state.session().await.history().to_vec())
}

async fn clear_history(State(state): State<ApiState>) -> Result<StatusCode, ApiError> {
    let mut session = state.session().await;
    session.clear_history();
    state.persist(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
