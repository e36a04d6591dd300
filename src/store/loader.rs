//! Dataset loading
//!
//! Reads the initial catalog from a JSON array on disk. The file is read
//! once at startup and never written back.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::dataset::Dataset;
use super::errors::{StoreError, StoreResult};
use super::record::{normalize_types, Record, ID_FIELD, NAME_FIELD, TYPE_FIELD};

/// Load and validate a dataset file
pub fn load_dataset(path: impl AsRef<Path>) -> StoreResult<Dataset> {
    let raw = fs::read_to_string(path)?;
    parse_dataset(&raw)
}

/// Parse and validate dataset JSON
pub fn parse_dataset(raw: &str) -> StoreResult<Dataset> {
    let value: Value = serde_json::from_str(raw)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(StoreError::NotAnArray),
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let mut fields = match item {
            Value::Object(fields) => fields,
            _ => {
                return Err(StoreError::InvalidRecord {
                    index,
                    reason: "record is not an object".to_string(),
                })
            }
        };

        for required in [ID_FIELD, NAME_FIELD] {
            if !fields.contains_key(required) {
                return Err(StoreError::InvalidRecord {
                    index,
                    reason: format!("missing {}", required),
                });
            }
        }

        if let Some(raw_types) = fields.remove(TYPE_FIELD) {
            let types = normalize_types(&raw_types);
            if !types.is_empty() {
                fields.insert(
                    TYPE_FIELD.to_string(),
                    Value::Array(types.into_iter().map(Value::String).collect()),
                );
            }
        }

        records.push(Record::from_map(fields));
    }

    Dataset::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid_dataset() {
        let ds = parse_dataset(
            r#"[
                {"id": 1, "num": "001", "name": "Bulbasaur", "type": ["Grass", "Poison"]},
                {"id": 4, "num": "004", "name": "Charmander", "type": "Fire"}
            ]"#,
        )
        .unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].types(), vec!["Fire"]);
        assert_eq!(ds.records()[0].get("num"), Some(&serde_json::json!("001")));
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(parse_dataset(r#"{"id": 1}"#), Err(StoreError::NotAnArray)));
    }

    #[test]
    fn test_rejects_missing_name() {
        let err = parse_dataset(r#"[{"id": 1}]"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = parse_dataset(r#"[{"id": 1, "name": "A"}, {"id": "1", "name": "B"}]"#)
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));
    }

    #[test]
    fn test_drops_empty_type() {
        let ds = parse_dataset(r#"[{"id": 1, "name": "A", "type": []}]"#).unwrap();
        assert!(ds.records()[0].get("type").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 25, "name": "Pikachu"}}]"#).unwrap();

        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
