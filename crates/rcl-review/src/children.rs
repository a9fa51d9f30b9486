//! Virtual child cards: per-input-mode copies of a parent card that are
//! scheduled on their own.

use std::collections::{BTreeMap, HashMap};

use rcl_srs::{CardId, Scheduler};

use crate::{
    clock::Clock,
    model::{CardView, InputMode, Item},
    session::Session,
};

/// parent id → input mode → child id. A parent only has an entry once it has
/// at least one child.
#[derive(Debug, Clone, Default)]
pub struct ChildIndex {
    by_parent: HashMap<CardId, BTreeMap<InputMode, CardId>>,
}

impl ChildIndex {
    /// Child of `parent_id` for `input_mode`, if one was created.
    pub fn get(&self, parent_id: CardId, input_mode: &InputMode) -> Option<CardId> {
        self.by_parent.get(&parent_id)?.get(input_mode).copied()
    }

    pub fn has_child(&self, parent_id: CardId, input_mode: &InputMode) -> bool {
        self.get(parent_id, input_mode).is_some()
    }

    /// Number of children across all parents.
    pub fn len(&self) -> usize {
        self.by_parent.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_parent.is_empty()
    }

    pub(crate) fn insert(&mut self, parent_id: CardId, input_mode: InputMode, child_id: CardId) {
        self.by_parent
            .entry(parent_id)
            .or_default()
            .insert(input_mode, child_id);
    }

    /// Rebuild from the linkage stored on the items themselves.
    pub(crate) fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut index = Self::default();
        for item in items {
            if let (Some(parent_id), Some(input_mode)) = (item.parent_id, &item.input_mode) {
                index.insert(parent_id, input_mode.clone(), item.id);
            }
        }
        index
    }

    pub(crate) fn clear(&mut self) {
        self.by_parent.clear();
    }
}

impl<S: Scheduler, C: Clock> Session<S, C> {
    /// Return the child of `parent_id` for `input_mode`, creating it with a
    /// fresh scheduling record on first use. `None` when the parent is unknown.
    pub fn get_or_create_child(
        &mut self,
        parent_id: CardId,
        input_mode: &InputMode,
    ) -> Option<CardView<S::Record>> {
        if let Some(child_id) = self.children.get(parent_id, input_mode) {
            return self.card(child_id);
        }

        let parent = self.items.get(parent_id)?;
        let id = self.ids.allocate();
        let child = Item {
            id,
            front: parent.front.clone(),
            back: parent.back.clone(),
            parent_id: Some(parent_id),
            input_mode: Some(input_mode.clone()),
        };
        let record = self.scheduler.new_record(id, self.clock.now());

        self.items.insert(child.clone());
        self.records.put(id, record.clone());
        self.children.insert(parent_id, input_mode.clone(), id);

        tracing::debug!(parent_id, child_id = id, input_mode = %input_mode, "Created virtual child card");

        Some(CardView {
            item: child,
            scheduling: record,
        })
    }
}
