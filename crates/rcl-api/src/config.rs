use std::path::PathBuf;

use rcl_review::DEFAULT_SKIP_WINDOW_SECS;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Service configuration, read from the environment.
///
/// | Variable           | Default          |
/// |--------------------|------------------|
/// | `ENVIRONMENT`      | `development`    |
/// | `BIND_ADDR`        | `127.0.0.1:3000` |
/// | `STATE_PATH`       | unset (memory only) |
/// | `SKIP_WINDOW_SECS` | `20`, `0` disables |
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub state_path: Option<PathBuf>,
    #[serde(default = "default_skip_window_secs")]
    pub skip_window_secs: u64,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_skip_window_secs() -> u64 {
    DEFAULT_SKIP_WINDOW_SECS.unsigned_abs()
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }
}
