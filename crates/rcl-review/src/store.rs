//! In-memory stores for items and their scheduling records.

use std::collections::{BTreeMap, HashMap};

use rcl_srs::CardId;

use crate::model::Item;

/// Hands out card ids. `min_id` is the smallest id guaranteed unused.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    min_id: CardId,
}

impl IdAllocator {
    pub const fn min_id(&self) -> CardId {
        self.min_id
    }

    /// Hand out the next unused id.
    pub fn allocate(&mut self) -> CardId {
        let id = self.min_id;
        self.observe(id);
        id
    }

    /// Make sure `id` is never handed out again.
    pub fn observe(&mut self, id: CardId) {
        self.min_id = self.min_id.max(id + 1);
    }
}

/// Items by id, plus the ids sharing each answer text.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: BTreeMap<CardId, Item>,
    ids_by_answer: HashMap<String, Vec<CardId>>,
}

impl ItemStore {
    pub fn get(&self, id: CardId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Insert without touching the answer index; call
    /// [`reindex_answers`](Self::reindex_answers) once the batch is in.
    pub(crate) fn insert_unindexed(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    /// Insert and index a single item.
    pub(crate) fn insert(&mut self, item: Item) {
        self.ids_by_answer
            .entry(item.back.clone())
            .or_default()
            .push(item.id);
        self.items.insert(item.id, item);
    }

    /// Ids of every item whose back is exactly `answer`.
    pub fn ids_with_answer(&self, answer: &str) -> &[CardId] {
        self.ids_by_answer
            .get(answer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Rebuild the answer index from scratch after bulk inserts.
    pub fn reindex_answers(&mut self) {
        let mut index: HashMap<String, Vec<CardId>> = HashMap::new();
        for item in self.items.values() {
            index.entry(item.back.clone()).or_default().push(item.id);
        }
        self.ids_by_answer = index;
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.ids_by_answer.clear();
    }
}

/// Scheduling records by card id.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: BTreeMap<CardId, R>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<R> RecordStore<R> {
    pub fn get(&self, id: CardId) -> Option<&R> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending card id order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &R)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Store `record` for `id`, returning the one it replaces.
    pub(crate) fn put(&mut self, id: CardId, record: R) -> Option<R> {
        self.records.insert(id, record)
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}
