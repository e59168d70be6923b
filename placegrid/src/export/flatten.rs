//! Nested record flattening
//!
//! Place records arrive as deeply nested JSON. Tabular export needs one
//! flat key-value row per place, so nested objects are folded into
//! underscore-joined key paths.

use serde_json::Value;

use crate::provider::PlaceRecord;

/// Separator joining nested key paths.
const KEY_SEPARATOR: char = '_';

/// Flattens a nested place record into a single-level mapping.
///
/// Nested objects contribute their entries under `parent_child` keys,
/// recursively. Arrays whose last element is an object are kept as JSON
/// text (they are lists of structured records, e.g. reviews); all other
/// arrays become a comma-joined string of their elements. Scalars pass
/// through untouched, so flattening an already-flat record returns it
/// unchanged.
pub fn flatten_record(record: &PlaceRecord) -> PlaceRecord {
    let mut flat = PlaceRecord::new();
    flatten_into("", record, &mut flat);
    flat
}

fn flatten_into(prefix: &str, map: &PlaceRecord, out: &mut PlaceRecord) {
    for (key, value) in map {
        let flat_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", prefix, KEY_SEPARATOR, key)
        };

        match value {
            Value::Object(nested) => flatten_into(&flat_key, nested, out),
            Value::Array(items) => {
                let rendered = if matches!(items.last(), Some(Value::Object(_))) {
                    Value::String(Value::Array(items.clone()).to_string())
                } else {
                    let joined = items
                        .iter()
                        .map(scalar_text)
                        .collect::<Vec<_>>()
                        .join(", ");
                    Value::String(joined)
                };
                out.insert(flat_key, rendered);
            }
            scalar => {
                out.insert(flat_key, scalar.clone());
            }
        }
    }
}

/// Renders a JSON value as cell text: strings lose their quotes, everything
/// else keeps its JSON form.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> PlaceRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_flat_record_is_unchanged() {
        let record = as_map(json!({"id": "a", "rating": 4.5, "open": true}));
        assert_eq!(flatten_record(&record), record);
    }

    #[test]
    fn test_nested_object_joins_keys() {
        let record = as_map(json!({
            "id": "a",
            "location": {"latitude": 40.7, "longitude": -74.0}
        }));

        let flat = flatten_record(&record);

        assert_eq!(flat["id"], "a");
        assert_eq!(flat["location_latitude"], 40.7);
        assert_eq!(flat["location_longitude"], -74.0);
        assert!(flat.get("location").is_none());
    }

    #[test]
    fn test_deeply_nested_keys() {
        let record = as_map(json!({
            "displayName": {"text": {"value": "Cafe"}}
        }));

        let flat = flatten_record(&record);
        assert_eq!(flat["displayName_text_value"], "Cafe");
    }

    #[test]
    fn test_scalar_array_becomes_joined_string() {
        let record = as_map(json!({"types": ["lodging", "point_of_interest"]}));

        let flat = flatten_record(&record);
        assert_eq!(flat["types"], "lodging, point_of_interest");
    }

    #[test]
    fn test_mixed_scalar_array_renders_json_forms() {
        let record = as_map(json!({"values": [1, true, "x"]}));

        let flat = flatten_record(&record);
        assert_eq!(flat["values"], "1, true, x");
    }

    #[test]
    fn test_object_array_is_kept_as_json_text() {
        let record = as_map(json!({
            "reviews": [{"rating": 5}, {"rating": 3}]
        }));

        let flat = flatten_record(&record);
        let text = flat["reviews"].as_str().unwrap();
        // Round-trippable JSON text
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed[1]["rating"], 3);
    }

    #[test]
    fn test_empty_array_is_empty_string() {
        let record = as_map(json!({"photos": []}));

        let flat = flatten_record(&record);
        assert_eq!(flat["photos"], "");
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let record = as_map(json!({
            "id": "a",
            "location": {"latitude": 40.7},
            "types": ["lodging"]
        }));

        let once = flatten_record(&record);
        let twice = flatten_record(&once);
        assert_eq!(once, twice);
    }
}
