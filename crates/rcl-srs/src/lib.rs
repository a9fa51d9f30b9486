//! SRS (Spaced Repetition System) library for Recall
//!
//! This crate defines the scheduling capability the review engine consumes,
//! together with the SM-2 implementation used by default. The engine only
//! ever looks at a record through [`SchedulingRecord`]; everything else about
//! a record belongs to the scheduler that produced it.

mod sm2;

pub use sm2::{Sm2Card, Sm2Scheduler};

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Identifier shared by an item and its scheduling record.
pub type CardId = u64;

/// Highest quality rating a review can carry.
pub const MAX_QUALITY: u8 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SrsError {
    #[error("quality must be between 0 and {MAX_QUALITY}, got {0}")]
    InvalidQuality(u8),
    /// The next due date would fall outside the representable calendar.
    #[error("due date {interval_days} days after {reviewed_at} is out of range")]
    DueOutOfRange {
        reviewed_at: DateTime<Utc>,
        interval_days: u32,
    },
}

/// The fields of a scheduling record the review engine is allowed to read.
pub trait SchedulingRecord {
    /// Card this record schedules.
    fn card_id(&self) -> CardId;

    /// When the card is next due.
    fn due(&self) -> DateTime<Utc>;

    /// Successful-repetition counter: 0 while learning, ≥1 once a review
    /// met the scheduler's success threshold.
    fn repetitions(&self) -> u32;

    /// Whether the card has to be seen again before it counts as learned.
    fn needs_extra_review(&self) -> bool;
}

/// Log entry produced alongside every scheduled review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLog {
    pub card_id: CardId,
    pub quality: u8,
    pub reviewed_at: DateTime<Utc>,
}

/// Output of [`Scheduler::advance`].
#[derive(Debug, Clone)]
pub struct Reviewed<R> {
    pub record: R,
    pub log: ReviewLog,
}

/// A spaced-repetition algorithm.
///
/// Implementations must be pure: the same record, quality and review time
/// always produce the same result. Records are persisted through serde, so
/// the record type has to round-trip without losing state.
pub trait Scheduler {
    type Record: SchedulingRecord + Clone + Debug + Serialize + DeserializeOwned;

    /// Record for a card that has never been reviewed; due at `now`.
    fn new_record(&self, card_id: CardId, now: DateTime<Utc>) -> Self::Record;

    /// Apply a review of `quality` performed at `reviewed_at`.
    fn advance(
        &self,
        record: &Self::Record,
        quality: u8,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Reviewed<Self::Record>, SrsError>;
}

/// Reject ratings outside `0..=MAX_QUALITY`.
pub fn validate_quality(quality: u8) -> Result<u8, SrsError> {
    if quality > MAX_QUALITY {
        return Err(SrsError::InvalidQuality(quality));
    }
    Ok(quality)
}
