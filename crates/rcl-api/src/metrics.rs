//! Prometheus metrics for the study service.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

use crate::state::ApiState;

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+").expect("valid regex"));

/// Install the global Prometheus recorder.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
            ],
        )?
        .install_recorder()?;
    Ok(handle)
}

/// Middleware recording request counts, latency and in-flight requests.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let in_flight = gauge!("http_requests_in_flight", "method" => method.clone(), "path" => path.clone());
    in_flight.increment(1.0);

    let response = next.run(req).await;

    in_flight.decrement(1.0);

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Collapse card ids so every card shares one label set.
fn normalize_path(path: &str) -> String {
    NUMERIC_SEGMENT.replace_all(path, "/:id").into_owned()
}

pub async fn metrics_handler(State(state): State<ApiState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn record_review(quality: u8, extra_progress: u32, eager: bool) {
    counter!(
        "reviews_total",
        "quality" => quality.to_string(),
        "eager" => eager.to_string()
    )
    .increment(1);
    if extra_progress > 0 {
        counter!("review_extra_progress_total").increment(u64::from(extra_progress));
    }
}

pub fn record_selection(mode: &str, found: bool) {
    let outcome = if found { "card" } else { "empty" };
    counter!(
        "selections_total",
        "mode" => mode.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_import(count: usize) {
    counter!("cards_imported_total").increment(count as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/cards/123"), "/cards/:id");
        assert_eq!(
            normalize_path("/cards/7/children/typed"),
            "/cards/:id/children/typed"
        );
        assert_eq!(
            normalize_path("/study/cards/42/review"),
            "/study/cards/:id/review"
        );
        assert_eq!(normalize_path("/health"), "/health");
    }
}
