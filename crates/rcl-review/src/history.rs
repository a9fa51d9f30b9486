use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rcl_srs::CardId;

use crate::model::HistoryEntry;

/// Append-only log of graded reviews, oldest first.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub(crate) fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        // Snapshots written by hand may be out of order; the log never is.
        entries.sort_by_key(|entry| entry.reviewed_at);
        Self { entries }
    }

    pub(crate) fn record(&mut self, card_id: CardId, reviewed_at: DateTime<Utc>) {
        self.entries.push(HistoryEntry {
            card_id,
            reviewed_at,
        });
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `card_id` was ever graded since the log was last cleared.
    pub fn has_reviewed(&self, card_id: CardId) -> bool {
        self.entries.iter().any(|entry| entry.card_id == card_id)
    }

    /// Latest review time per card, for checking many candidates at once.
    pub fn last_reviews(&self) -> HashMap<CardId, DateTime<Utc>> {
        self.entries
            .iter()
            .map(|entry| (entry.card_id, entry.reviewed_at))
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn test_last_reviews_keep_latest_per_card() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let mut log = HistoryLog::default();
        log.record(1, t0);
        log.record(2, t0 + Duration::seconds(10));
        log.record(1, t0 + Duration::seconds(20));
        log.record(3, t0 + Duration::seconds(30));

        let latest = log.last_reviews();
        assert_eq!(latest[&1], t0 + Duration::seconds(20));
        assert_eq!(latest[&2], t0 + Duration::seconds(10));
        assert!(!latest.contains_key(&9));
        assert_eq!(latest.len(), 3);
    }

    #[test]
    fn test_from_entries_restores_order() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let log = HistoryLog::from_entries(vec![
            HistoryEntry {
                card_id: 1,
                reviewed_at: t0 + Duration::minutes(1),
            },
            HistoryEntry {
                card_id: 2,
                reviewed_at: t0,
            },
        ]);
        assert_eq!(log.entries()[0].card_id, 2);
        assert!(log.has_reviewed(1));
        assert!(!log.has_reviewed(3));
    }
}
