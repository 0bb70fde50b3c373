//! Common types used throughout Solidafy Paginate
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Ordinal key of a collection's natural ordering
pub type Key = i64;

// ============================================================================
// Keyed Items
// ============================================================================

/// An item that exposes the unique, monotonically increasing key the
/// collection is ordered by
pub trait Keyed {
    /// The ordering key of this item
    fn key(&self) -> Key;
}

impl Keyed for Key {
    fn key(&self) -> Key {
        *self
    }
}

/// A row returned by one of the bundled backends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Ordering key
    pub id: Key,
    /// Remaining projected fields
    #[serde(default, skip_serializing_if = "JsonObject::is_empty")]
    pub fields: JsonObject,
}

impl Record {
    /// Create a record with no extra fields
    pub fn new(id: Key) -> Self {
        Self {
            id,
            fields: JsonObject::new(),
        }
    }

    /// Add a field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.fields.get(name)
    }
}

impl Keyed for Record {
    fn key(&self) -> Key {
        self.id
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Direction a backend scans the key index in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Newest first
    Desc,
    /// Oldest first
    Asc,
}

impl SortDirection {
    /// SQL keyword for this direction
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Desc => "DESC",
            SortDirection::Asc => "ASC",
        }
    }

    /// Search-index sort order for this direction
    pub fn as_search(self) -> &'static str {
        match self {
            SortDirection::Desc => "desc",
            SortDirection::Asc => "asc",
        }
    }
}

/// Key condition of a keyset scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBound {
    /// No bound
    None,
    /// `key < anchor`
    Below(Key),
    /// `key > anchor`
    Above(Key),
}
