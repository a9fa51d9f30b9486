//! Picking the next card to study.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rcl_srs::{CardId, Scheduler, SchedulingRecord};

use crate::{
    clock::Clock,
    model::{CardView, InputMode, Item, StudyMode},
    session::Session,
    store::ItemStore,
};

impl<S: Scheduler, C: Clock> Session<S, C> {
    /// Next card to study in `mode`, or `None` when nothing qualifies.
    ///
    /// Without `input_mode` only root cards are considered. With one, cards
    /// derived for that input mode are tried first; when none qualifies, a
    /// root card eligible for `learn-or-retry` that has no such child yet is
    /// picked and its child is created.
    pub fn select_next(
        &mut self,
        mode: StudyMode,
        input_mode: Option<&InputMode>,
        exclude_input_mode: Option<&InputMode>,
    ) -> Option<CardView<S::Record>> {
        if let Some(id) = self.find_candidate(mode, input_mode, exclude_input_mode) {
            tracing::debug!(card_id = id, %mode, "Selected card");
            return self.card(id);
        }

        let input_mode = input_mode?;
        let parent_id =
            self.find_candidate(StudyMode::LearnOrRetry, None, Some(input_mode))?;
        tracing::debug!(parent_id, %mode, %input_mode, "Deriving card for input mode");
        self.get_or_create_child(parent_id, input_mode)
    }

    /// Earliest-due card passing every filter, ties broken by lowest id.
    pub fn find_candidate(
        &self,
        mode: StudyMode,
        input_mode: Option<&InputMode>,
        exclude_input_mode: Option<&InputMode>,
    ) -> Option<CardId> {
        let now = self.clock.now();
        let recent = self.recent_reviews();

        self.records
            .iter()
            .filter(|(id, record)| {
                let Some(item) = self.items.get(*id) else {
                    return false;
                };
                item.serves(input_mode)
                    && mode.admits(record.repetitions(), record.needs_extra_review())
                    && (!mode.requires_due() || record.due() <= now)
                    && !exclude_input_mode
                        .is_some_and(|excluded| self.children.has_child(item.id, excluded))
                    && !recent.as_ref().is_some_and(|recent| recent.blocks(item))
            })
            .min_by_key(|(id, record)| (record.due(), *id))
            .map(|(id, _)| id)
    }

    fn recent_reviews(&self) -> Option<RecentReviews<'_>> {
        let window = self.config.skip_window?;
        Some(RecentReviews {
            items: &self.items,
            last_reviewed: self.history.last_reviews(),
            cutoff: self.clock.now() - window,
        })
    }
}

/// Answers reviewed too recently to be shown again.
struct RecentReviews<'a> {
    items: &'a ItemStore,
    last_reviewed: HashMap<CardId, DateTime<Utc>>,
    cutoff: DateTime<Utc>,
}

impl RecentReviews<'_> {
    /// Whether any card sharing `item`'s answer was reviewed after the cutoff.
    fn blocks(&self, item: &Item) -> bool {
        self.items
            .ids_with_answer(&item.back)
            .iter()
            .filter_map(|id| self.last_reviewed.get(id))
            .any(|reviewed_at| *reviewed_at > self.cutoff)
    }
}
