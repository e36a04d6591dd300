//! # Dataset Store
//!
//! The ordered, in-memory collection of records. Insertion order is the
//! listing order and drives offset/limit windows.
//!
//! Invariants:
//! - every record has an `id`
//! - ids are unique, compared in string form
//! - a record's id never changes after insertion

use std::collections::{BTreeSet, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use super::record::Record;

/// Filters applied by the listing operation, combined with AND
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Keep records whose `type` list contains this category (case-insensitive)
    pub category: Option<String>,
    /// Keep records whose name contains this text (case-insensitive)
    pub search: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(category) = &self.category {
            let wanted = category.to_lowercase();
            if !record.types().iter().any(|t| t.to_lowercase() == wanted) {
                return false;
            }
        }

        if let Some(search) = &self.search {
            if !record.name_key().to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// A window over the filtered records
#[derive(Debug, Clone)]
pub struct Page {
    /// Number of records matching the filter, before windowing
    pub count: usize,
    pub data: Vec<Record>,
}

/// Ordered collection of records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset, rejecting records without an id and duplicate ids
    pub fn from_records(records: Vec<Record>) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let key = record.id_key().ok_or_else(|| StoreError::InvalidRecord {
                index,
                reason: "missing id".to_string(),
            })?;
            if !seen.insert(key.clone()) {
                return Err(StoreError::DuplicateId(key));
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// First record whose id has the given string form
    pub fn find_by_id(&self, id: &str) -> Option<&Record> {
        self.position(id).map(|idx| &self.records[idx])
    }

    /// First record whose name equals `name`, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&Record> {
        let wanted = name.to_lowercase();
        self.records
            .iter()
            .find(|r| r.name_key().to_lowercase() == wanted)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.id_key().as_deref() == Some(id))
    }

    /// Filter, count, then cut the `[offset, offset + limit)` window.
    ///
    /// Both bounds are truncated toward zero after the sum is taken, and a
    /// negative bound counts back from the end of the filtered list.
    pub fn page(&self, filter: &RecordFilter, offset: f64, limit: f64) -> Page {
        let matched: Vec<&Record> = self.records.iter().filter(|r| filter.matches(r)).collect();
        let count = matched.len();
        let start = resolve_bound(offset, count);
        let end = resolve_bound(offset + limit, count);
        let data = if start < end {
            matched[start..end].iter().map(|r| (*r).clone()).collect()
        } else {
            Vec::new()
        };
        Page { count, data }
    }

    /// Distinct categories across all records, sorted
    pub fn distinct_types(&self) -> Vec<String> {
        self.records
            .iter()
            .flat_map(Record::types)
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Up to `n` distinct records in random order
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Record> {
        let mut shuffled: Vec<&Record> = self.records.iter().collect();
        shuffled.shuffle(rng);
        shuffled.into_iter().take(n).cloned().collect()
    }

    /// Append a record, enforcing id uniqueness
    pub fn insert(&mut self, record: Record) -> StoreResult<&Record> {
        let key = record.id_key().ok_or_else(|| StoreError::InvalidRecord {
            index: self.records.len(),
            reason: "missing id".to_string(),
        })?;
        if self.contains_id(&key) {
            return Err(StoreError::DuplicateId(key));
        }

        self.records.push(record);
        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// Shallow-merge `updates` into the record with the given id
    pub fn merge(&mut self, id: &str, updates: Map<String, Value>) -> StoreResult<&Record> {
        let idx = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.records[idx].merge(updates);
        Ok(&self.records[idx])
    }
}

/// Map a window bound onto `[0, len]`
fn resolve_bound(bound: f64, len: usize) -> usize {
    let bound = bound.trunc();
    if bound.is_nan() {
        0
    } else if bound < 0.0 {
        (len as f64 + bound).max(0.0) as usize
    } else {
        bound.min(len as f64) as usize
    }
}
