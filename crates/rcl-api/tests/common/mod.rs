use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use rcl_api::{
    config::Environment,
    router::router,
    state::{ApiState, StudyClock},
    storage::SnapshotStore,
};
use rcl_review::{ManualClock, Session, SessionConfig};
use rcl_srs::{CardId, Sm2Card, Sm2Scheduler};
use serde::Deserialize;
use tower::ServiceExt;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Builds an `ApiState` driven by a manual clock.
pub struct TestStateBuilder {
    clock: ManualClock,
    config: SessionConfig,
    state_path: Option<PathBuf>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            clock: ManualClock::new(start_time()),
            config: SessionConfig::default(),
            state_path: None,
        }
    }

    pub fn skip_window_secs(mut self, secs: u64) -> Self {
        self.config = SessionConfig::with_skip_window_secs(secs);
        self
    }

    pub fn state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = Some(path.into());
        self
    }

    /// Handle to the clock the session reads.
    pub fn clock(&self) -> ManualClock {
        self.clock.clone()
    }

    pub fn build(self) -> ApiState {
        let session = Session::new(
            Sm2Scheduler,
            Box::new(self.clock) as StudyClock,
            self.config,
        );
        ApiState::with_session(
            session,
            self.state_path.map(SnapshotStore::new),
            Environment::Development,
        )
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client plus the clock behind it.
pub fn test_app() -> (TestClient, ManualClock) {
    let builder = TestStateBuilder::new();
    let clock = builder.clock();
    (TestClient::new(router().with_state(builder.build())), clock)
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
        }
    }

    fn empty(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request")
    }

    fn json_request<T: serde::Serialize>(method: &str, uri: &str, body: &T) -> Request<Body> {
        let json_body = serde_json::to_string(body).expect("Failed to serialize body");
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json_body))
            .expect("Failed to build request")
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Self::empty("GET", uri)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Self::empty("DELETE", uri)).await
    }

    pub async fn post(&self, uri: &str) -> TestResponse {
        self.request(Self::empty("POST", uri)).await
    }

    pub async fn post_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.request(Self::json_request("POST", uri, body)).await
    }

    pub async fn put_json<T: serde::Serialize>(&self, uri: &str, body: &T) -> TestResponse {
        self.request(Self::json_request("PUT", uri, body)).await
    }

    /// Send a CSV body to the import endpoint.
    pub async fn import(&self, csv: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri("/cards/import")
            .header("content-type", "text/csv")
            .body(Body::from(csv.to_string()))
            .expect("Failed to build request");
        self.request(request).await
    }

    /// Grade a card with default options.
    pub async fn review(&self, id: CardId, quality: u8) -> TestResponse {
        self.post_json(
            &format!("/study/cards/{id}/review"),
            &serde_json::json!({ "quality": quality }),
        )
        .await
    }
}

/// Test response wrapper
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Response body is not valid UTF-8")
    }

    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}

/// A card as returned by the study and card endpoints.
#[derive(Debug, Deserialize)]
pub struct CardJson {
    pub id: CardId,
    pub front: String,
    pub back: String,
    pub parent_id: Option<CardId>,
    pub input_mode: Option<String>,
    pub scheduling: Sm2Card,
}

/// A card as listed by `/cards`.
#[derive(Debug, Deserialize)]
pub struct CardEntryJson {
    #[serde(flatten)]
    pub card: CardJson,
    pub is_due: bool,
    pub phase: String,
}
