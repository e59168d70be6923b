//! Result deduplication
//!
//! Leaf queries overlap, both because search circles pad their rectangles
//! and because the density trigger re-covers a leaf with four sub-leaves, so
//! the concatenated traversal output contains duplicates. Deduplication is
//! keyed by the provider's stable `id` field.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::provider::PlaceRecord;

/// Removes duplicate place records by `id`.
///
/// Each id's position in the output is where it *first* appeared in the
/// input, but the record stored there is the *last* occurrence in scan
/// order. Later sightings of a place therefore refresh its data without
/// reshuffling the output.
///
/// Records without a string `id` cannot be keyed and are skipped with a
/// warning.
pub fn dedupe_by_id(records: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut deduped: Vec<PlaceRecord> = Vec::new();

    for record in records {
        let id = match record.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                warn!("place record without a string id, skipping");
                continue;
            }
        };

        match slots.get(&id) {
            Some(&slot) => deduped[slot] = record,
            None => {
                slots.insert(id, deduped.len());
                deduped.push(record);
            }
        }
    }

    deduped
}
