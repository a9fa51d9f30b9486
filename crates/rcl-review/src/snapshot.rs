//! Saving and loading the whole session state.

use std::collections::{BTreeMap, HashSet};

use rcl_srs::{CardId, Scheduler, SchedulingRecord};
use serde::{Deserialize, Serialize};

use crate::{
    children::ChildIndex,
    clock::Clock,
    error::ReviewError,
    history::HistoryLog,
    model::{HistoryEntry, Item},
    session::Session,
    store::{IdAllocator, ItemStore, RecordStore},
};

/// Everything needed to resume a session. Scheduling records go through
/// the scheduler's own serde encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<R> {
    pub items: Vec<Item>,
    pub scheduling_records: Vec<R>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            scheduling_records: Vec::new(),
            history: Vec::new(),
        }
    }
}

impl<S: Scheduler, C: Clock> Session<S, C> {
    /// Copy of the whole session state, ready to serialize.
    pub fn snapshot(&self) -> Snapshot<S::Record> {
        Snapshot {
            items: self.items.iter().cloned().collect(),
            scheduling_records: self.records.iter().map(|(_, r)| r.clone()).collect(),
            history: self.history.entries().to_vec(),
        }
    }

    /// Replace the session state with `snapshot`.
    ///
    /// The snapshot must hold exactly one record per item. The child index,
    /// answer index and id counter are rebuilt from the items. On error the
    /// session is left as it was.
    pub fn restore(&mut self, snapshot: Snapshot<S::Record>) -> Result<(), ReviewError> {
        let Snapshot {
            items,
            scheduling_records,
            history,
        } = snapshot;

        let mut by_id = BTreeMap::new();
        for item in items {
            let id = item.id;
            if by_id.insert(id, item).is_some() {
                return Err(invalid(format!("item {id} appears more than once")));
            }
        }

        let mut records = RecordStore::default();
        for record in scheduling_records {
            let id = record.card_id();
            if !by_id.contains_key(&id) {
                return Err(invalid(format!("scheduling record {id} has no item")));
            }
            if records.put(id, record).is_some() {
                return Err(invalid(format!("card {id} has more than one scheduling record")));
            }
        }
        if let Some(id) = by_id.keys().find(|id| records.get(**id).is_none()) {
            return Err(invalid(format!("item {id} has no scheduling record")));
        }
        check_children(&by_id)?;

        let mut store = ItemStore::default();
        let mut ids = IdAllocator::default();
        for (id, item) in by_id {
            ids.observe(id);
            store.insert_unindexed(item);
        }
        store.reindex_answers();

        self.children = ChildIndex::from_items(store.iter());
        self.items = store;
        self.records = records;
        self.history = HistoryLog::from_entries(history);
        self.ids = ids;

        tracing::info!(
            items = self.items.len(),
            children = self.children.len(),
            history = self.history.len(),
            "Session restored"
        );
        Ok(())
    }
}

fn check_children(items: &BTreeMap<CardId, Item>) -> Result<(), ReviewError> {
    let mut seen = HashSet::new();
    for item in items.values() {
        let Some(parent_id) = item.parent_id else {
            if let Some(input_mode) = &item.input_mode {
                return Err(invalid(format!(
                    "item {} has input mode {input_mode} but no parent",
                    item.id
                )));
            }
            continue;
        };
        let Some(input_mode) = &item.input_mode else {
            return Err(invalid(format!("child {} has no input mode", item.id)));
        };
        if !items.contains_key(&parent_id) {
            return Err(invalid(format!(
                "child {} points at missing parent {parent_id}",
                item.id
            )));
        }
        if !seen.insert((parent_id, input_mode)) {
            return Err(invalid(format!(
                "card {parent_id} has more than one child for {input_mode}"
            )));
        }
    }
    Ok(())
}

fn invalid(reason: String) -> ReviewError {
    ReviewError::InvalidSnapshot(reason)
}
