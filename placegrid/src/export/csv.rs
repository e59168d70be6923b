//! CSV table export

use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use super::flatten::{flatten_record, scalar_text};
use super::ExportError;
use crate::provider::PlaceRecord;

/// UTF-8 byte-order mark, prefixed so spreadsheet applications detect the
/// encoding of multilingual place names.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Writes place records to a CSV file.
///
/// Records are flattened first; the header row is the union of all
/// flattened keys across records, in first-seen order, and cells missing
/// from a record are left empty. Nothing is written when `records` is
/// empty.
///
/// # Errors
///
/// Disk I/O and CSV serialization failures are fatal and propagate.
pub fn write_csv<P: AsRef<Path>>(path: P, records: &[PlaceRecord]) -> Result<(), ExportError> {
    if records.is_empty() {
        warn!("no records to export, skipping CSV");
        return Ok(());
    }

    let flattened: Vec<PlaceRecord> = records.iter().map(flatten_record).collect();

    // Union of keys across all records, first-seen order
    let mut columns: Vec<String> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for record in &flattened {
        for key in record.keys() {
            if seen.insert(key) {
                columns.push(key.clone());
            }
        }
    }

    let mut file = File::create(&path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&columns)?;
    for record in &flattened {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(column).map(scalar_text).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush().map_err(ExportError::Io)?;

    info!(
        path = %path.as_ref().display(),
        rows = flattened.len(),
        columns = columns.len(),
        "CSV export written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::tempdir;

    fn as_map(value: Value) -> PlaceRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_csv_has_bom_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("places.csv");

        let records = vec![
            as_map(json!({"id": "a", "rating": 4.5})),
            as_map(json!({"id": "b", "location": {"latitude": 40.7}})),
        ];

        write_csv(&path, &records).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);

        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        let mut lines = text.lines();
        // Header is the union of keys in first-seen order
        assert_eq!(lines.next().unwrap(), "id,rating,location_latitude");
        assert_eq!(lines.next().unwrap(), "a,4.5,");
        assert_eq!(lines.next().unwrap(), "b,,40.7");
    }

    #[test]
    fn test_empty_records_write_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("places.csv");

        write_csv(&path, &[]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_cells_with_commas_are_quoted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("places.csv");

        let records = vec![as_map(json!({"id": "a", "types": ["lodging", "hotel"]}))];
        write_csv(&path, &records).unwrap();

        let bytes = fs::read(&path).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.contains("\"lodging, hotel\""));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("places.csv");

        let records = vec![as_map(json!({"id": "a"}))];
        let result = write_csv(&path, &records);
        assert!(matches!(result, Err(ExportError::Io(_))));
    }
}
