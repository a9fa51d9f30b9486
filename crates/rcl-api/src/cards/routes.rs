use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use rcl_review::{CardView, InputMode, import};
use rcl_srs::{CardId, Sm2Card};

use super::model::{CardEntry, DueDate, ImportSummary};
use crate::{ApiState, error::ApiError, metrics, state::StudySession};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/cards", get(list_cards).delete(reset_cards))
        .route("/cards/import", post(import_cards))
        .route("/cards/{id}", get(get_card))
        .route("/cards/{id}/due", get(get_due_date))
        .route("/cards/{id}/children/{input_mode}", post(get_or_create_child))
}

fn entry(session: &StudySession, id: CardId) -> Option<CardEntry> {
    let card = session.card(id)?;
    let phase = session.phase(id)?;
    Some(CardEntry::new(card, phase, session.now()))
}

/// Every card, soonest due first.
async fn list_cards(State(state): State<ApiState>) -> Json<Vec<CardEntry>> {
    let session = state.session().await;
    let now = session.now();
    let entries = session
        .cards()
        .into_iter()
        .filter_map(|card| {
            let phase = session.phase(card.id())?;
            Some(CardEntry::new(card, phase, now))
        })
        .collect();
    Json(entries)
}

async fn get_card(
    State(state): State<ApiState>,
    Path(id): Path<CardId>,
) -> Result<Json<CardEntry>, ApiError> {
    let session = state.session().await;
    entry(&session, id)
        .map(Json)
        .ok_or(ApiError::CardNotFound(id))
}

async fn get_due_date(
    State(state): State<ApiState>,
    Path(id): Path<CardId>,
) -> Result<Json<DueDate>, ApiError> {
    let session = state.session().await;
    let due = session.due_date(id).ok_or(ApiError::CardNotFound(id))?;
    Ok(Json(DueDate { card_id: id, due }))
}

async fn get_or_create_child(
    State(state): State<ApiState>,
    Path((id, input_mode)): Path<(CardId, String)>,
) -> Result<Json<CardView<Sm2Card>>, ApiError> {
    let input_mode = InputMode::new(input_mode);
    let mut session = state.session().await;
    let existed = session.children().has_child(id, &input_mode);

    let child = session
        .get_or_create_child(id, &input_mode)
        .ok_or(ApiError::CardNotFound(id))?;
    if !existed {
        state.persist(&session).await?;
    }
    Ok(Json(child))
}

/// Import `front,back` lines. Unusable lines are skipped.
async fn import_cards(
    State(state): State<ApiState>,
    body: String,
) -> Result<(StatusCode, Json<ImportSummary>), ApiError> {
    let rows = import::parse_csv(&body);
    let mut session = state.session().await;
    let ids = session.add_items(rows);
    state.persist(&session).await?;

    metrics::record_import(ids.len());
    Ok((
        StatusCode::CREATED,
        Json(ImportSummary {
            imported: ids.len(),
            ids,
        }),
    ))
}

/// Drop every card, record and history entry.
async fn reset_cards(State(state): State<ApiState>) -> Result<StatusCode, ApiError> {
    let mut session = state.session().await;
    session.clear();
    state.persist(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
