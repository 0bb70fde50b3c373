//! Backend capability trait

use crate::error::Result;
use crate::types::{Key, Keyed};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural family of a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Row store with `LIMIT`/`OFFSET` and exact `COUNT`
    Relational,
    /// Search index that can cap how far it counts
    SearchIndex,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Relational => f.write_str("relational"),
            BackendKind::SearchIndex => f.write_str("search_index"),
        }
    }
}

/// Fetch and count operations a store must offer to be paginated
///
/// Every fetch is scoped by `filter`, which is produced by the
/// query-construction layer and opaque to the engine.
pub trait Backend {
    /// Item type returned by fetches
    type Item: Keyed;

    /// Filter type understood by this store
    type Filter;

    /// Store family, consulted by the count estimator
    fn kind(&self) -> BackendKind;

    /// Short name used in logs and errors
    fn name(&self) -> &str;

    /// Up to `limit` items in descending key order, skipping `offset`
    fn fetch_offset(&self, limit: u64, offset: u64, filter: &Self::Filter)
        -> Result<Vec<Self::Item>>;

    /// Up to `limit` items with `key < anchor` (or unbounded), descending
    fn fetch_before(
        &self,
        limit: u64,
        anchor: Option<Key>,
        filter: &Self::Filter,
    ) -> Result<Vec<Self::Item>>;

    /// Up to `limit` items with `key > anchor`, ascending
    fn fetch_after(&self, limit: u64, anchor: Key, filter: &Self::Filter)
        -> Result<Vec<Self::Item>>;

    /// Exact number of items matching `filter`
    fn count(&self, filter: &Self::Filter) -> Result<u64>;

    /// Number of matching items, counting no further than `cap`
    fn count_capped(&self, filter: &Self::Filter, cap: u64) -> Result<u64>;
}

impl<B: Backend + ?Sized> Backend for &B {
    type Item = B::Item;
    type Filter = B::Filter;

    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_offset(
        &self,
        limit: u64,
        offset: u64,
        filter: &Self::Filter,
    ) -> Result<Vec<Self::Item>> {
        (**self).fetch_offset(limit, offset, filter)
    }

    fn fetch_before(
        &self,
        limit: u64,
        anchor: Option<Key>,
        filter: &Self::Filter,
    ) -> Result<Vec<Self::Item>> {
        (**self).fetch_before(limit, anchor, filter)
    }

    fn fetch_after(&self, limit: u64, anchor: Key, filter: &Self::Filter) -> Result<Vec<Self::Item>> {
        (**self).fetch_after(limit, anchor, filter)
    }

    fn count(&self, filter: &Self::Filter) -> Result<u64> {
        (**self).count(filter)
    }

    fn count_capped(&self, filter: &Self::Filter, cap: u64) -> Result<u64> {
        (**self).count_capped(filter, cap)
    }
}
