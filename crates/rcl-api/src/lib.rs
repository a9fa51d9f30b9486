//! HTTP service around a single study session.

pub mod cards;
pub mod config;
pub mod error;
pub mod history;
pub mod metrics;
pub mod router;
pub mod snapshot;
pub mod state;
pub mod storage;
pub mod study;
pub mod tracing;

pub use config::ApiConfig;
pub use state::{ApiState, StudySession};
