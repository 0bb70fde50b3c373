//! Request bodies for search-index queries

use crate::types::{JsonValue, KeyBound, SortDirection};
use serde_json::json;

/// Query clause a search is restricted to
///
/// Wraps any query DSL object. The default matches every document.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter(JsonValue);

impl Default for SearchFilter {
    fn default() -> Self {
        Self(json!({"match_all": {}}))
    }
}

impl SearchFilter {
    /// Match every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to documents matching `query`
    pub fn query(query: JsonValue) -> Self {
        Self(query)
    }

    /// Documents whose `field` equals `value`
    pub fn term(field: &str, value: impl Into<JsonValue>) -> Self {
        Self(json!({"term": {field: value.into()}}))
    }

    /// The wrapped query clause
    pub fn as_json(&self) -> &JsonValue {
        &self.0
    }
}

/// Builds `_search` and `_count` bodies for one sort key field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQueryBuilder {
    key_field: String,
    source_fields: Vec<String>,
}

impl SearchQueryBuilder {
    /// Create a builder sorting on `key_field`
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            source_fields: Vec::new(),
        }
    }

    /// Restrict `_source` to these fields (plus the key)
    #[must_use]
    pub fn with_source_fields(mut self, fields: Vec<String>) -> Self {
        self.source_fields = fields;
        self
    }

    /// Sort key field
    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    fn query_clause(&self, filter: &SearchFilter, bound: KeyBound) -> JsonValue {
        let range = match bound {
            KeyBound::None => return filter.as_json().clone(),
            KeyBound::Below(anchor) => json!({"lt": anchor}),
            KeyBound::Above(anchor) => json!({"gt": anchor}),
        };
        json!({
            "bool": {
                "filter": [
                    filter.as_json(),
                    {"range": {self.key_field.as_str(): range}}
                ]
            }
        })
    }

    /// Sorted, sized search with an optional key bound and offset
    pub fn search(
        &self,
        filter: &SearchFilter,
        bound: KeyBound,
        direction: SortDirection,
        size: u64,
        from: u64,
    ) -> JsonValue {
        let mut body = json!({
            "query": self.query_clause(filter, bound),
            "sort": [{self.key_field.as_str(): {"order": direction.as_search()}}],
            "size": size,
            "track_total_hits": false,
        });
        if from > 0 {
            body["from"] = json!(from);
        }
        if !self.source_fields.is_empty() {
            let mut fields = vec![self.key_field.clone()];
            fields.extend(self.source_fields.iter().cloned());
            body["_source"] = json!(fields);
        }
        body
    }

    /// Body for the `_count` endpoint
    pub fn count(&self, filter: &SearchFilter) -> JsonValue {
        json!({"query": filter.as_json()})
    }

    /// Hit-count-only search that stops counting at `cap`
    pub fn count_capped(&self, filter: &SearchFilter, cap: u64) -> JsonValue {
        json!({
            "query": filter.as_json(),
            "size": 0,
            "track_total_hits": cap,
        })
    }
}
