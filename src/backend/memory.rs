//! In-memory backend
//!
//! Holds a collection of [`Record`]s sorted by key. Behaves like a relational
//! store: exact counts, offset scans over the descending key order.

use super::types::{Backend, BackendKind};
use crate::error::Result;
use crate::types::{JsonValue, Key, Record};
use serde::{Deserialize, Serialize};

/// Conjunction of `field == value` conditions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    /// Conditions that must all hold
    pub conditions: Vec<(String, JsonValue)>,
}

impl FieldFilter {
    /// Filter that matches every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an equality condition
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Parse `field=value` pairs; numeric and boolean values are typed
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Self {
        let mut filter = Self::all();
        for pair in pairs {
            if let Some((field, value)) = pair.split_once('=') {
                let value = serde_json::from_str(value.trim())
                    .unwrap_or_else(|_| JsonValue::String(value.trim().to_string()));
                filter = filter.eq(field.trim(), value);
            }
        }
        filter
    }

    /// Check if there are no conditions
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check a record against every condition
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|(field, value)| {
            if field == "id" {
                value.as_i64() == Some(record.id)
            } else {
                record.get(field) == Some(value)
            }
        })
    }
}

/// Backend over an in-process collection
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    /// Records in ascending key order, keys unique
    records: Vec<Record>,
    /// Store family reported to the count estimator
    kind: BackendKind,
}

impl MemoryBackend {
    /// Create a backend from records in any order; duplicate keys keep the last
    pub fn new(records: impl IntoIterator<Item = Record>) -> Self {
        let mut records: Vec<Record> = records.into_iter().collect();
        records.sort_by_key(|r| r.id);
        // dedup_by keeps the first of each run, so reverse around it
        records.reverse();
        records.dedup_by_key(|r| r.id);
        records.reverse();
        Self {
            records,
            kind: BackendKind::Relational,
        }
    }

    /// Create a backend with plain records keyed `first..=last`
    pub fn sequential(first: Key, last: Key) -> Self {
        Self::new((first..=last).map(Record::new))
    }

    /// Report a different store family
    #[must_use]
    pub fn with_kind(mut self, kind: BackendKind) -> Self {
        self.kind = kind;
        self
    }

    /// Insert or replace a record
    pub fn insert(&mut self, record: Record) {
        match self.records.binary_search_by_key(&record.id, |r| r.id) {
            Ok(pos) => self.records[pos] = record,
            Err(pos) => self.records.insert(pos, record),
        }
    }

    /// Remove the record with `key`
    pub fn remove(&mut self, key: Key) -> Option<Record> {
        self.records
            .binary_search_by_key(&key, |r| r.id)
            .ok()
            .map(|pos| self.records.remove(pos))
    }

    /// Number of records held (unfiltered)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn take_desc<'a>(
        &'a self,
        filter: &'a FieldFilter,
        upper: Option<Key>,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.records
            .iter()
            .rev()
            .filter(move |r| upper.map_or(true, |anchor| r.id < anchor))
            .filter(move |r| filter.matches(r))
    }
}

impl Backend for MemoryBackend {
    type Item = Record;
    type Filter = FieldFilter;

    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn fetch_offset(&self, limit: u64, offset: u64, filter: &FieldFilter) -> Result<Vec<Record>> {
        Ok(self
            .take_desc(filter, None)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn fetch_before(
        &self,
        limit: u64,
        anchor: Option<Key>,
        filter: &FieldFilter,
    ) -> Result<Vec<Record>> {
        Ok(self
            .take_desc(filter, anchor)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn fetch_after(&self, limit: u64, anchor: Key, filter: &FieldFilter) -> Result<Vec<Record>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.id > anchor && filter.matches(r))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    fn count(&self, filter: &FieldFilter) -> Result<u64> {
        Ok(self.records.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    fn count_capped(&self, filter: &FieldFilter, cap: u64) -> Result<u64> {
        Ok(self
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .take(cap as usize)
            .count() as u64)
    }
}
