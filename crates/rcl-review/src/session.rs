use chrono::{DateTime, Duration, Utc};
use rcl_srs::{CardId, Scheduler, SchedulingRecord};

use crate::{
    children::ChildIndex,
    clock::{Clock, SystemClock},
    history::HistoryLog,
    model::{CardView, HistoryEntry, Item, NewItem, ReviewPhase},
    store::{IdAllocator, ItemStore, RecordStore},
};

/// Default recency window for answers, in seconds.
pub const DEFAULT_SKIP_WINDOW_SECS: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Hide a card while any card with the same answer was reviewed within
    /// this window. `None` disables the check.
    pub skip_window: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            skip_window: Some(Duration::seconds(DEFAULT_SKIP_WINDOW_SECS)),
        }
    }
}

impl SessionConfig {
    /// Build from a window in seconds, `0` meaning disabled.
    pub fn with_skip_window_secs(secs: u64) -> Self {
        let skip_window = i64::try_from(secs)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::seconds);
        Self { skip_window }
    }
}

/// All study state of one user: items, scheduling records, review history,
/// the virtual child index and the id counter.
///
/// Every operation takes `&self` or `&mut self`; callers sharing a session
/// across threads guard the whole value with a single lock.
#[derive(Debug)]
pub struct Session<S: Scheduler, C = SystemClock> {
    pub(crate) scheduler: S,
    pub(crate) clock: C,
    pub(crate) config: SessionConfig,
    pub(crate) items: ItemStore,
    pub(crate) records: RecordStore<S::Record>,
    pub(crate) history: HistoryLog,
    pub(crate) children: ChildIndex,
    pub(crate) ids: IdAllocator,
}

impl<S: Scheduler, C: Clock> Session<S, C> {
    /// Empty session scheduling with `scheduler` and reading time from `clock`.
    pub fn new(scheduler: S, clock: C, config: SessionConfig) -> Self {
        Self {
            scheduler,
            clock,
            config,
            items: ItemStore::default(),
            records: RecordStore::default(),
            history: HistoryLog::default(),
            children: ChildIndex::default(),
            ids: IdAllocator::default(),
        }
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Change the recency window; `None` disables it.
    pub fn set_skip_window(&mut self, skip_window: Option<Duration>) {
        self.config.skip_window = skip_window;
    }

    /// Current time according to the session clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// All items, roots and children alike.
    pub const fn items(&self) -> &ItemStore {
        &self.items
    }

    /// Scheduling record of every item, keyed by card id.
    pub const fn records(&self) -> &RecordStore<S::Record> {
        &self.records
    }

    /// Graded reviews, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// Parent and input mode to child card mapping.
    pub const fn children(&self) -> &ChildIndex {
        &self.children
    }

    /// Smallest id no card has used yet.
    pub const fn min_id(&self) -> CardId {
        self.ids.min_id()
    }

    pub fn item(&self, id: CardId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn record(&self, id: CardId) -> Option<&S::Record> {
        self.records.get(id)
    }

    /// Content and scheduling of a card merged into one view.
    pub fn card(&self, id: CardId) -> Option<CardView<S::Record>> {
        let item = self.items.get(id)?;
        let scheduling = self.records.get(id)?;
        Some(CardView {
            item: item.clone(),
            scheduling: scheduling.clone(),
        })
    }

    /// Every card, soonest due first.
    pub fn cards(&self) -> Vec<CardView<S::Record>> {
        let mut cards: Vec<_> = self
            .items
            .iter()
            .filter_map(|item| self.card(item.id))
            .collect();
        cards.sort_by_key(|card| (card.scheduling.due(), card.id()));
        cards
    }

    /// When card `id` is next due, `None` for unknown cards.
    pub fn due_date(&self, id: CardId) -> Option<DateTime<Utc>> {
        self.records.get(id).map(SchedulingRecord::due)
    }

    /// Review phase of card `id`, derived from its record and the history.
    pub fn phase(&self, id: CardId) -> Option<ReviewPhase> {
        let record = self.records.get(id)?;
        let phase = if record.repetitions() >= 1 {
            ReviewPhase::Graduated
        } else if self.history.has_reviewed(id) {
            ReviewPhase::Learning
        } else {
            ReviewPhase::New
        };
        Some(phase)
    }

    /// Create an item and a fresh scheduling record for every row.
    pub fn add_items(&mut self, rows: impl IntoIterator<Item = NewItem>) -> Vec<CardId> {
        let now = self.clock.now();
        let mut created = Vec::new();
        for row in rows {
            let id = self.ids.allocate();
            self.items.insert_unindexed(Item {
                id,
                front: row.front,
                back: row.back,
                parent_id: None,
                input_mode: None,
            });
            self.records.put(id, self.scheduler.new_record(id, now));
            created.push(id);
        }
        self.items.reindex_answers();
        tracing::info!(
            count = created.len(),
            total = self.items.len(),
            "Added items"
        );
        created
    }

    /// Drop every item, record, child mapping and history entry.
    pub fn clear(&mut self) {
        self.items.clear();
        self.records.clear();
        self.children.clear();
        self.history.clear();
        self.ids = IdAllocator::default();
        tracing::info!("Session state cleared");
    }

    /// Forget past reviews. Items and records are untouched.
    pub fn clear_history(&mut self) {
        let removed = self.history.len();
        self.history.clear();
        tracing::info!(removed, "History cleared");
    }
}
