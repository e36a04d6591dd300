//! # Record
//!
//! A catalog entry. Only `id`, `name` and `type` carry meaning; every other
//! field is kept as-is and returned verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::coerce::to_key;

pub const ID_FIELD: &str = "id";
pub const NAME_FIELD: &str = "name";
pub const TYPE_FIELD: &str = "type";

/// One catalog entry, stored as a JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create a minimal record with an id and a name
    pub fn new(id: Value, name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(ID_FIELD.to_string(), id);
        fields.insert(NAME_FIELD.to_string(), Value::String(name.into()));
        Self(fields)
    }

    /// Attach categories. An empty list leaves the record without `type`.
    pub fn with_types(mut self, types: Vec<String>) -> Self {
        if !types.is_empty() {
            self.0.insert(
                TYPE_FIELD.to_string(),
                Value::Array(types.into_iter().map(Value::String).collect()),
            );
        }
        self
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn id(&self) -> Option<&Value> {
        self.0.get(ID_FIELD)
    }

    /// String form of the id used for every id comparison
    pub fn id_key(&self) -> Option<String> {
        self.id().map(to_key)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_FIELD).and_then(Value::as_str)
    }

    /// Name as text, empty when absent
    pub fn name_key(&self) -> String {
        self.0.get(NAME_FIELD).map(to_key).unwrap_or_default()
    }

    /// Categories of this record, empty when `type` is absent or not a list
    pub fn types(&self) -> Vec<String> {
        match self.0.get(TYPE_FIELD) {
            Some(Value::Array(items)) => items.iter().map(to_key).collect(),
            _ => Vec::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Shallow merge: each update overwrites the field of the same name.
    ///
    /// `id` is never touched. `type` is normalised to a list; an update that
    /// normalises to nothing removes the field.
    pub fn merge(&mut self, updates: Map<String, Value>) {
        for (field, value) in updates {
            match field.as_str() {
                ID_FIELD => continue,
                TYPE_FIELD => {
                    let types = normalize_types(&value);
                    if types.is_empty() {
                        self.0.remove(TYPE_FIELD);
                    } else {
                        self.0.insert(
                            field,
                            Value::Array(types.into_iter().map(Value::String).collect()),
                        );
                    }
                }
                _ => {
                    self.0.insert(field, value);
                }
            }
        }
    }

}

/// Normalise a caller-supplied `type` into trimmed, non-empty categories.
///
/// Accepts a list of values or a single comma-separated string.
pub fn normalize_types(value: &Value) -> Vec<String> {
    let raw: Vec<String> = match value {
        Value::Array(items) => items.iter().map(to_key).collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    raw.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
