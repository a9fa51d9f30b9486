use chrono::{DateTime, Utc};
use rcl_review::{CardView, ReviewPhase};
use rcl_srs::{CardId, Sm2Card};
use serde::Serialize;

/// A card as listed by the service: content, schedule and derived status.
#[derive(Debug, Serialize)]
pub struct CardEntry {
    #[serde(flatten)]
    pub card: CardView<Sm2Card>,
    pub is_due: bool,
    pub phase: ReviewPhase,
}

impl CardEntry {
    pub fn new(card: CardView<Sm2Card>, phase: ReviewPhase, now: DateTime<Utc>) -> Self {
        Self {
            is_due: card.scheduling.due <= now,
            card,
            phase,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DueDate {
    pub card_id: CardId,
    pub due: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub ids: Vec<CardId>,
}
