//! CSV import of front/back pairs.
//!
//! One card per line, `front,back`. Fields may be quoted; anything after the
//! second field is ignored. Lines that don't yield a non-empty front and back
//! are skipped.

use crate::model::NewItem;

/// Parse CSV text into items to add, skipping unusable lines.
pub fn parse_csv(text: &str) -> Vec<NewItem> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(line, "Skipping unreadable CSV row: {e}");
                continue;
            }
        };
        match (record.get(0), record.get(1)) {
            (Some(front), Some(back)) if !front.is_empty() && !back.is_empty() => {
                rows.push(NewItem::new(front, back));
            }
            _ => tracing::debug!(line, "Skipping CSV row without front and back"),
        }
    }
    rows
}
