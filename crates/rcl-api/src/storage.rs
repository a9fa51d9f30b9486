//! JSON file persistence for session snapshots.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rcl_review::Snapshot;
use rcl_srs::Sm2Card;

/// Reads and writes the session snapshot at a fixed path.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored snapshot, `None` if nothing was saved yet.
    pub async fn load(&self) -> anyhow::Result<Option<Snapshot<Sm2Card>>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        let snapshot = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    /// Write `snapshot`, replacing the previous file in one step.
    pub async fn save(&self, snapshot: &Snapshot<Sm2Card>) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(snapshot).context("failed to encode snapshot")?;

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "Snapshot saved");
        Ok(())
    }
}
