use axum::{
    Router, http::StatusCode, middleware, response::IntoResponse, routing::get,
};
use tower_http::trace::TraceLayer;

use crate::{cards, history, metrics, snapshot, state::ApiState, study};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler))
        .merge(study::routes())
        .merge(cards::routes())
        .merge(history::routes())
        .merge(snapshot::routes())
        .fallback(handler_404)
        .layer(middleware::from_fn(metrics::track_metrics))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
