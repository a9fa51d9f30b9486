//! Review session engine for Recall
//!
//! A [`Session`] owns the study state of one user and decides which card to
//! show next. The spaced-repetition math itself is delegated to a
//! [`rcl_srs::Scheduler`]; this crate only reads a record's due date,
//! repetition count and extra-review flag.

pub mod answer;
pub mod children;
pub mod clock;
pub mod error;
pub mod history;
pub mod import;
pub mod model;
pub mod selector;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod transition;

pub use children::ChildIndex;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ReviewError;
pub use model::{CardView, HistoryEntry, InputMode, Item, NewItem, ReviewPhase, StudyMode};
pub use session::{DEFAULT_SKIP_WINDOW_SECS, Session, SessionConfig};
pub use snapshot::Snapshot;
pub use transition::ReviewOptions;
