use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rcl_srs::CardId;
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// Static content of a card.
///
/// Root items come from imports. Virtual children carry the `parent_id` and
/// `input_mode` they were derived for; their text is a snapshot of the parent
/// taken at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_mode: Option<InputMode>,
}

impl Item {
    /// Whether this item was imported rather than derived for an input mode.
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none() && self.input_mode.is_none()
    }

    /// Whether this item belongs to the pool for `input_mode`; `None` selects
    /// root items.
    pub fn serves(&self, input_mode: Option<&InputMode>) -> bool {
        match input_mode {
            None => self.is_root(),
            Some(mode) => self.input_mode.as_ref() == Some(mode),
        }
    }
}

/// A front/back pair waiting to become an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub front: String,
    pub back: String,
}

impl NewItem {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Way the user answers a card, e.g. `prefix1` for typing the first letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputMode(String);

impl InputMode {
    /// Type the beginning of the answer.
    pub const PREFIX1: &'static str = "prefix1";
    /// Type the whole answer.
    pub const TYPED: &'static str = "typed";

    /// Input mode by name. Names without a checker are still valid pools.
    pub fn new(mode: impl Into<String>) -> Self {
        Self(mode.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InputMode {
    fn from(mode: &str) -> Self {
        Self::new(mode)
    }
}

/// Which pool of cards a study session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StudyMode {
    /// Never successfully recalled, due now.
    Learn,
    /// Learning cards plus cards flagged for an extra review.
    LearnOrRetry,
    /// Recalled at least once, due now.
    Review,
    /// Recalled at least once, due or not.
    ReviewEager,
}

impl StudyMode {
    /// Name used in queries and serialized data.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Learn => "learn",
            Self::LearnOrRetry => "learn-or-retry",
            Self::Review => "review",
            Self::ReviewEager => "review-eager",
        }
    }

    /// Whether cards must be due to be selected.
    pub const fn requires_due(self) -> bool {
        !matches!(self, Self::ReviewEager)
    }

    pub(crate) const fn admits(self, repetitions: u32, needs_extra_review: bool) -> bool {
        match self {
            Self::Learn => repetitions == 0,
            Self::LearnOrRetry => repetitions == 0 || needs_extra_review,
            Self::Review | Self::ReviewEager => repetitions >= 1,
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyMode {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "learn" => Ok(Self::Learn),
            "learn-or-retry" => Ok(Self::LearnOrRetry),
            "review" => Ok(Self::Review),
            "review-eager" => Ok(Self::ReviewEager),
            other => Err(ReviewError::UnknownStudyMode(other.to_string())),
        }
    }
}

/// A card's content merged with its scheduling record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView<R> {
    #[serde(flatten)]
    pub item: Item,
    pub scheduling: R,
}

impl<R> CardView<R> {
    pub const fn id(&self) -> CardId {
        self.item.id
    }
}

/// One graded review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub card_id: CardId,
    pub reviewed_at: DateTime<Utc>,
}

/// Where a card stands in its review life, derived from its record and the
/// history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPhase {
    New,
    Learning,
    Graduated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_mode_parsing() {
        assert_eq!("learn".parse::<StudyMode>().unwrap(), StudyMode::Learn);
        assert_eq!(
            "learn-or-retry".parse::<StudyMode>().unwrap(),
            StudyMode::LearnOrRetry
        );
        assert_eq!(
            "review-eager".parse::<StudyMode>().unwrap(),
            StudyMode::ReviewEager
        );
        assert!(matches!(
            "cram".parse::<StudyMode>(),
            Err(ReviewError::UnknownStudyMode(mode)) if mode == "cram"
        ));
    }

    #[test]
    fn test_study_mode_predicates() {
        assert!(StudyMode::Learn.admits(0, false));
        assert!(!StudyMode::Learn.admits(1, true));
        assert!(StudyMode::LearnOrRetry.admits(2, true));
        assert!(!StudyMode::LearnOrRetry.admits(2, false));
        assert!(!StudyMode::Review.admits(0, false));
        assert!(StudyMode::ReviewEager.admits(3, false));
        assert!(!StudyMode::ReviewEager.requires_due());
        assert!(StudyMode::Review.requires_due());
    }

    #[test]
    fn test_item_pools() {
        let root = Item {
            id: 0,
            front: "cat".to_string(),
            back: "gato".to_string(),
            parent_id: None,
            input_mode: None,
        };
        let child = Item {
            id: 1,
            parent_id: Some(0),
            input_mode: Some(InputMode::from(InputMode::TYPED)),
            ..root.clone()
        };
        let typed = InputMode::from(InputMode::TYPED);
        let prefix = InputMode::from(InputMode::PREFIX1);

        assert!(root.is_root());
        assert!(!child.is_root());
        assert!(root.serves(None));
        assert!(!root.serves(Some(&typed)));
        assert!(child.serves(Some(&typed)));
        assert!(!child.serves(Some(&prefix)));
        assert!(!child.serves(None));
    }

    #[test]
    fn test_card_view_serializes_flat() {
        let view = CardView {
            item: Item {
                id: 4,
                front: "cat".to_string(),
                back: "gato".to_string(),
                parent_id: None,
                input_mode: None,
            },
            scheduling: 1_u8,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["front"], "cat");
        assert_eq!(json["scheduling"], 1);
        assert!(json.get("parent_id").is_none());
    }
}
