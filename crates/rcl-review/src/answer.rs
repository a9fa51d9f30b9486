//! Checking typed answers against a card's back.

use rcl_srs::{CardId, Scheduler};
use unicode_normalization::UnicodeNormalization;

use crate::{clock::Clock, model::InputMode, session::Session};

/// Fold an answer to the form compared in `typed` mode.
///
/// Lowercases, expands ligatures, strips diacritics and punctuation and
/// collapses whitespace, so `"  Café-crème "` folds to `"cafecreme"` and
/// `"Straße"` to `"strasse"`.
pub fn fold_answer(answer: &str) -> String {
    let lowered = answer
        .to_lowercase()
        .replace('ß', "ss")
        .replace('æ', "ae")
        .replace('œ', "oe");
    let stripped: String = lowered
        .nfd()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether `input` is acceptable for `back` under `input_mode`. `None` for
/// input modes that have no checker.
pub fn input_matches(back: &str, input_mode: &InputMode, input: &str) -> Option<bool> {
    if input.is_empty() {
        return Some(false);
    }
    match input_mode.as_str() {
        InputMode::PREFIX1 => Some(back.to_lowercase().starts_with(&input.to_lowercase())),
        InputMode::TYPED => Some(fold_answer(back) == fold_answer(input)),
        _ => None,
    }
}

impl<S: Scheduler, C: Clock> Session<S, C> {
    /// Check what the user typed for card `card_id`. `None` when the card is
    /// unknown or the input mode has no checker.
    pub fn check_input(&self, card_id: CardId, input_mode: &InputMode, input: &str) -> Option<bool> {
        let item = self.items.get(card_id)?;
        self.records.get(card_id)?;
        input_matches(&item.back, input_mode, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix() -> InputMode {
        InputMode::from(InputMode::PREFIX1)
    }

    fn typed() -> InputMode {
        InputMode::from(InputMode::TYPED)
    }

    #[test]
    fn test_prefix_ignores_case() {
        assert_eq!(input_matches("Gato", &prefix(), "g"), Some(true));
        assert_eq!(input_matches("gato", &prefix(), "GA"), Some(true));
        assert_eq!(input_matches("gato", &prefix(), "p"), Some(false));
    }

    #[test]
    fn test_prefix_keeps_accents() {
        assert_eq!(input_matches("éclair", &prefix(), "e"), Some(false));
        assert_eq!(input_matches("éclair", &prefix(), "É"), Some(true));
    }

    #[test]
    fn test_empty_input_is_wrong() {
        assert_eq!(input_matches("gato", &prefix(), ""), Some(false));
        assert_eq!(input_matches("gato", &typed(), ""), Some(false));
    }

    #[test]
    fn test_typed_is_lenient_on_form() {
        assert_eq!(input_matches("el pájaro", &typed(), "El  Pajaro"), Some(true));
        assert_eq!(input_matches("Straße", &typed(), "strasse"), Some(true));
        assert_eq!(input_matches("¿qué?", &typed(), "que"), Some(true));
        assert_eq!(input_matches("gato", &typed(), "gatos"), Some(false));
    }

    #[test]
    fn test_unknown_input_mode() {
        assert_eq!(input_matches("gato", &InputMode::new("voice"), "gato"), None);
    }

    #[test]
    fn test_fold_answer() {
        assert_eq!(fold_answer("  Café-crème "), "cafecreme");
        assert_eq!(fold_answer("Œuvre"), "oeuvre");
        assert_eq!(fold_answer("   "), "");
    }
}
