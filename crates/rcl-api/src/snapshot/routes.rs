use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use rcl_review::Snapshot;
use rcl_srs::Sm2Card;

use crate::{ApiState, error::ApiError};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/snapshot", get(export_snapshot).put(import_snapshot))
}

async fn export_snapshot(State(state): State<ApiState>) -> Json<Snapshot<Sm2Card>> {
    Json(state.session().await.snapshot())
}

/// Replace the whole study state. An inconsistent snapshot is rejected and
/// leaves the current state in place.
async fn import_snapshot(
    State(state): State<ApiState>,
    Json(snapshot): Json<Snapshot<Sm2Card>>,
) -> Result<StatusCode, ApiError> {
    let mut session = state.session().await;
    session.restore(snapshot)?;
    state.persist(&session).await?;
    tracing::info!(cards = session.items().len(), "Study state replaced");
    Ok(StatusCode::NO_CONTENT)
}
