//! Search-index backend
//!
//! Pages through one index of an Elasticsearch-compatible server. Documents
//! carry their ordering key in a numeric field of `_source`; the remaining
//! `_source` fields become the record's fields.

use super::query::{SearchFilter, SearchQueryBuilder};
use super::transport::SearchTransport;
use crate::backend::{Backend, BackendKind};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Key, KeyBound, Record, SortDirection};
use tracing::debug;

/// Search-index backend over a [`SearchTransport`]
pub struct SearchIndexBackend<T> {
    transport: T,
    index: String,
    query: SearchQueryBuilder,
}

impl<T: SearchTransport> SearchIndexBackend<T> {
    /// Page through `index`, keyed by the `id` field
    pub fn new(transport: T, index: impl Into<String>) -> Self {
        Self {
            transport,
            index: index.into(),
            query: SearchQueryBuilder::new("id"),
        }
    }

    /// Use a different key field
    #[must_use]
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.query = SearchQueryBuilder::new(key_field);
        self
    }

    /// Restrict `_source` to these fields
    #[must_use]
    pub fn with_source_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.query = self.query.with_source_fields(fields);
        self
    }

    /// Index name
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Body builder in use
    pub fn query_builder(&self) -> &SearchQueryBuilder {
        &self.query
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, endpoint: &str, body: &JsonValue) -> Result<JsonValue> {
        let path = format!("{}/{endpoint}", self.index);
        debug!("Executing search on {}: {}", path, body);

        let response = self.transport.post(&path, body)?;
        if response.get("timed_out").and_then(JsonValue::as_bool) == Some(true) {
            return Err(Error::timeout(format!("search on '{}' timed out", self.index)));
        }
        Ok(response)
    }

    fn search(&self, body: &JsonValue) -> Result<Vec<Record>> {
        let response = self.send("_search", body)?;
        let hits = response
            .pointer("/hits/hits")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| Error::search_response("missing hits.hits"))?;

        hits.iter().map(|hit| self.record_from_hit(hit)).collect()
    }

    fn record_from_hit(&self, hit: &JsonValue) -> Result<Record> {
        let mut fields: JsonObject = hit
            .get("_source")
            .and_then(JsonValue::as_object)
            .cloned()
            .unwrap_or_default();

        let key_field = self.query.key_field();
        let id = fields
            .remove(key_field)
            .as_ref()
            .and_then(key_from_json)
            .or_else(|| hit.get("_id").and_then(key_from_json))
            .ok_or_else(|| {
                Error::search_response(format!("hit has no integer '{key_field}' key: {hit}"))
            })?;

        Ok(Record { id, fields })
    }
}

/// Read an integer key from a number or a numeric string
fn key_from_json(value: &JsonValue) -> Option<Key> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

impl<T: SearchTransport> Backend for SearchIndexBackend<T> {
    type Item = Record;
    type Filter = SearchFilter;

    fn kind(&self) -> BackendKind {
        BackendKind::SearchIndex
    }

    fn name(&self) -> &str {
        "search"
    }

    fn fetch_offset(&self, limit: u64, offset: u64, filter: &SearchFilter) -> Result<Vec<Record>> {
        let body = self
            .query
            .search(filter, KeyBound::None, SortDirection::Desc, limit, offset);
        self.search(&body)
    }

    fn fetch_before(
        &self,
        limit: u64,
        anchor: Option<Key>,
        filter: &SearchFilter,
    ) -> Result<Vec<Record>> {
        let bound = anchor.map_or(KeyBound::None, KeyBound::Below);
        let body = self.query.search(filter, bound, SortDirection::Desc, limit, 0);
        self.search(&body)
    }

    fn fetch_after(&self, limit: u64, anchor: Key, filter: &SearchFilter) -> Result<Vec<Record>> {
        let body = self
            .query
            .search(filter, KeyBound::Above(anchor), SortDirection::Asc, limit, 0);
        self.search(&body)
    }

    fn count(&self, filter: &SearchFilter) -> Result<u64> {
        let response = self.send("_count", &self.query.count(filter))?;
        response
            .get("count")
            .and_then(JsonValue::as_u64)
            .ok_or_else(|| Error::search_response("missing count"))
    }

    fn count_capped(&self, filter: &SearchFilter, cap: u64) -> Result<u64> {
        let response = self.send("_search", &self.query.count_capped(filter, cap))?;
        // Older servers report a bare number instead of {value, relation}
        let total = response
            .pointer("/hits/total/value")
            .or_else(|| response.pointer("/hits/total"))
            .and_then(JsonValue::as_u64)
            .ok_or_else(|| Error::search_response("missing hits.total"))?;
        Ok(total.min(cap))
    }
}
