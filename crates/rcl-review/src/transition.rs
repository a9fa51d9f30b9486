//! Applying graded reviews to a card's schedule.

use rcl_srs::{CardId, Scheduler, SchedulingRecord};
use serde::{Deserialize, Serialize};

use crate::{clock::Clock, error::ReviewError, session::Session};

/// How a graded review is applied beyond the plain case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOptions {
    /// Extra reviews of the same quality applied back to back, each at the
    /// due date the previous one produced.
    #[serde(default)]
    pub extra_progress: u32,
    /// Score a review made before the due date as if made on it.
    #[serde(default)]
    pub eager: bool,
}

impl<S: Scheduler, C: Clock> Session<S, C> {
    /// Grade card `card_id` with `quality`.
    ///
    /// Returns `Ok(None)` without touching any state when the card does not
    /// exist. Otherwise one history entry is recorded and the card is run
    /// through the scheduler `1 + extra_progress` times. A scheduler error
    /// stops the sequence; reviews already applied are kept.
    pub fn review(
        &mut self,
        card_id: CardId,
        quality: u8,
        options: ReviewOptions,
    ) -> Result<Option<S::Record>, ReviewError> {
        let Some(record) = self.records.get(card_id).cloned() else {
            tracing::debug!(card_id, "Review of unknown card ignored");
            return Ok(None);
        };

        let now = self.clock.now();
        self.history.record(card_id, now);

        let reviewed_at = if options.eager && now < record.due() {
            record.due()
        } else {
            now
        };

        let mut current = self.scheduler.advance(&record, quality, reviewed_at)?.record;
        self.records.put(card_id, current.clone());

        for step in 0..options.extra_progress {
            let next = self
                .scheduler
                .advance(&current, quality, current.due())
                .inspect_err(|e| {
                    tracing::warn!(card_id, step, "Extra progress stopped: {e}");
                })?;
            current = next.record;
            self.records.put(card_id, current.clone());
        }

        tracing::debug!(
            card_id,
            quality,
            extra_progress = options.extra_progress,
            eager = options.eager,
            due = %current.due(),
            repetitions = current.repetitions(),
            "Card reviewed"
        );

        Ok(Some(current))
    }
}
