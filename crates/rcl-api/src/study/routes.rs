use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rcl_review::{InputMode, StudyMode};
use rcl_srs::{CardId, Sm2Card};

use super::model::{CheckRequest, CheckResponse, MAX_EXTRA_PROGRESS, NextQuery, ReviewRequest};
use crate::{ApiState, error::ApiError, metrics};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/study/next", get(next_card))
        .route("/study/cards/{id}/review", post(review_card))
        .route("/study/cards/{id}/check", post(check_answer))
}

/// Empty query values behave as if absent.
fn input_mode_param(value: Option<String>) -> Option<InputMode> {
    value.filter(|v| !v.is_empty()).map(InputMode::new)
}

/// Next card for the requested mode, `204 No Content` when nothing qualifies.
async fn next_card(
    State(state): State<ApiState>,
    Query(query): Query<NextQuery>,
) -> Result<Response, ApiError> {
    let mode: StudyMode = query.mode.parse()?;
    let input_mode = input_mode_param(query.input_mode);
    let exclude_input_mode = input_mode_param(query.exclude_input_mode);

    let mut session = state.session().await;
    let children_before = session.children().len();
    let card = session.select_next(mode, input_mode.as_ref(), exclude_input_mode.as_ref());
    metrics::record_selection(mode.as_str(), card.is_some());

    // Selection may have derived a new child card.
    if session.children().len() != children_before {
        state.persist(&session).await?;
    }

    Ok(match card {
        Some(card) => Json(card).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

async fn review_card(
    State(state): State<ApiState>,
    Path(id): Path<CardId>,
    Json(payload): Json<ReviewRequest>,
) -> Result<Json<Sm2Card>, ApiError> {
    if payload.options.extra_progress > MAX_EXTRA_PROGRESS {
        return Err(ApiError::Validation(format!(
            "extra_progress must be at most {MAX_EXTRA_PROGRESS}"
        )));
    }

    let mut session = state.session().await;
    let result = session.review(id, payload.quality, payload.options);

    // History is appended before the scheduler runs, so a failed review
    // still changed the session.
    if !matches!(result, Ok(None)) {
        state.persist(&session).await?;
    }

    let record = result?.ok_or(ApiError::CardNotFound(id))?;
    metrics::record_review(
        payload.quality,
        payload.options.extra_progress,
        payload.options.eager,
    );
    tracing::info!(card_id = id, quality = payload.quality, due = %record.due, "Card reviewed");
    Ok(Json(record))
}

async fn check_answer(
    State(state): State<ApiState>,
    Path(id): Path<CardId>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    let session = state.session().await;
    if session.card(id).is_none() {
        return Err(ApiError::CardNotFound(id));
    }

    let input_mode = InputMode::new(payload.input_mode);
    let correct = session
        .check_input(id, &input_mode, &payload.input)
        .ok_or_else(|| ApiError::Validation(format!("no checker for input mode '{input_mode}'")))?;
    Ok(Json(CheckResponse { correct }))
}
