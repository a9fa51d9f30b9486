use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use rcl_review::{Clock, Session, SessionConfig, SystemClock};
use rcl_srs::Sm2Scheduler;
use tokio::sync::{Mutex, MutexGuard};

use crate::{ApiConfig, config::Environment, error::ApiError, storage::SnapshotStore};

pub type StudyClock = Box<dyn Clock + Send + Sync>;
pub type StudySession = Session<Sm2Scheduler, StudyClock>;

/// Shared state behind every handler. The whole session sits behind one
/// lock so a selection or review sees a consistent store.
#[derive(Clone)]
pub struct ApiState {
    session: Arc<Mutex<StudySession>>,
    store: Option<SnapshotStore>,
    pub metrics_handle: Option<PrometheusHandle>,
    pub environment: Environment,
}

impl ApiState {
    /// Build the state from configuration, restoring the saved snapshot if
    /// `STATE_PATH` points at one.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let mut session = Session::new(
            Sm2Scheduler,
            Box::new(SystemClock) as StudyClock,
            SessionConfig::with_skip_window_secs(config.skip_window_secs),
        );

        let store = config.state_path.map(SnapshotStore::new);
        if let Some(store) = &store {
            match store.load().await? {
                Some(snapshot) => {
                    session.restore(snapshot)?;
                    tracing::info!(
                        path = %store.path().display(),
                        cards = session.items().len(),
                        "Restored study state"
                    );
                }
                None => {
                    tracing::info!(path = %store.path().display(), "No saved study state, starting empty");
                }
            }
        } else {
            tracing::warn!("STATE_PATH not set, study state is kept in memory only");
        }

        Ok(Self::with_session(session, store, config.environment))
    }

    pub fn with_session(
        session: StudySession,
        store: Option<SnapshotStore>,
        environment: Environment,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            store,
            metrics_handle: None,
            environment,
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    pub async fn session(&self) -> MutexGuard<'_, StudySession> {
        self.session.lock().await
    }

    /// Write the current snapshot if a store is configured. Called with the
    /// session lock held so saves never interleave.
    pub async fn persist(&self, session: &StudySession) -> Result<(), ApiError> {
        if let Some(store) = &self.store {
            store.save(&session.snapshot()).await?;
        }
        Ok(())
    }
}
