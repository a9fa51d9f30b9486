//! SM-2 scheduling.
//!
//! Quality ratings (0-5):
//! - 0-2: failed recall, the card goes back to learning
//! - 3: recalled with serious difficulty, counted but seen again right away
//! - 4-5: recalled, scheduled `interval_days` into the future

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{CardId, ReviewLog, Reviewed, Scheduler, SchedulingRecord, SrsError, validate_quality};

const INITIAL_EASE_FACTOR: f64 = 2.5;
const MIN_EASE_FACTOR: f64 = 1.3;
/// Lowest quality that counts as a successful repetition.
const PASSING_QUALITY: u8 = 3;
/// Lowest quality that schedules the card into the future.
const CONFIDENT_QUALITY: u8 = 4;

/// Scheduling state of a single card under SM-2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sm2Card {
    pub card_id: CardId,
    /// Consecutive successful repetitions
    pub n: u32,
    pub ease_factor: f64,
    pub interval_days: u32,
    pub due: DateTime<Utc>,
    pub needs_extra_review: bool,
}

impl Sm2Card {
    /// Card that has never been reviewed, due at `now`.
    pub fn new(card_id: CardId, now: DateTime<Utc>) -> Self {
        Self {
            card_id,
            n: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            interval_days: 0,
            due: now,
            needs_extra_review: false,
        }
    }
}

impl SchedulingRecord for Sm2Card {
    fn card_id(&self) -> CardId {
        self.card_id
    }

    fn due(&self) -> DateTime<Utc> {
        self.due
    }

    fn repetitions(&self) -> u32 {
        self.n
    }

    fn needs_extra_review(&self) -> bool {
        self.needs_extra_review
    }
}

/// Stateless SM-2 scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sm2Scheduler;

impl Scheduler for Sm2Scheduler {
    type Record = Sm2Card;

    fn new_record(&self, card_id: CardId, now: DateTime<Utc>) -> Sm2Card {
        Sm2Card::new(card_id, now)
    }

    fn advance(
        &self,
        record: &Sm2Card,
        quality: u8,
        reviewed_at: DateTime<Utc>,
    ) -> Result<Reviewed<Sm2Card>, SrsError> {
        let quality = validate_quality(quality)?;
        let mut card = record.clone();

        if card.needs_extra_review {
            // Retry of a card already counted: only a confident answer releases it.
            if quality >= CONFIDENT_QUALITY {
                card.needs_extra_review = false;
                card.due = due_after(reviewed_at, card.interval_days)?;
            } else {
                card.due = reviewed_at;
            }
        } else {
            if quality >= PASSING_QUALITY {
                card.interval_days = next_interval(card.n, card.interval_days, card.ease_factor);
                card.n += 1;
                if quality >= CONFIDENT_QUALITY {
                    card.due = due_after(reviewed_at, card.interval_days)?;
                } else {
                    card.needs_extra_review = true;
                    card.due = reviewed_at;
                }
            } else {
                card.n = 0;
                card.interval_days = 0;
                card.due = reviewed_at;
            }
            card.ease_factor = next_ease_factor(card.ease_factor, quality);
        }

        Ok(Reviewed {
            record: card,
            log: ReviewLog {
                card_id: record.card_id,
                quality,
                reviewed_at,
            },
        })
    }
}

fn due_after(reviewed_at: DateTime<Utc>, interval_days: u32) -> Result<DateTime<Utc>, SrsError> {
    reviewed_at
        .checked_add_signed(Duration::days(i64::from(interval_days)))
        .ok_or(SrsError::DueOutOfRange {
            reviewed_at,
            interval_days,
        })
}

fn next_interval(n: u32, interval_days: u32, ease_factor: f64) -> u32 {
    match n {
        0 => 1,
        1 => 6,
        _ => (f64::from(interval_days) * ease_factor).ceil() as u32,
    }
}

fn next_ease_factor(ease_factor: f64, quality: u8) -> f64 {
    let miss = f64::from(5 - quality);
    (ease_factor + 0.1 - miss * (0.08 + miss * 0.02)).max(MIN_EASE_FACTOR)
}
