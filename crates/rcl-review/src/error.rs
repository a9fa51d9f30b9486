use rcl_srs::SrsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("scheduler error: {0}")]
    Scheduler(#[from] SrsError),
    #[error("unknown study mode: {0}")]
    UnknownStudyMode(String),
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
