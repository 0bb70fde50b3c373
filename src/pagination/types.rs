//! Pagination types
//!
//! Defines the request, the count representation, and the one result
//! container shared by every strategy and backend.

use crate::config::PaginationConfig;
use crate::error::Result;
use crate::token::{self, PageParam, PageToken};
use crate::types::{Key, Keyed};
use serde::{Deserialize, Serialize};

/// How the total item count should be obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountHint {
    /// Ask the backend
    #[default]
    Compute,
    /// No active filter; an exact count is not meaningful
    Skip,
    /// The caller already knows the count
    Explicit(u64),
}

/// A parsed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    /// Addressing intent
    pub token: PageToken,
    /// Requested page size (clamped again by the engine)
    pub limit: u32,
    /// Count policy
    #[serde(default)]
    pub count_hint: CountHint,
}

impl PaginationRequest {
    /// Create a request that computes its count
    pub fn new(token: PageToken, limit: u32) -> Self {
        Self {
            token,
            limit,
            count_hint: CountHint::Compute,
        }
    }

    /// Set the count hint
    #[must_use]
    pub fn with_count_hint(mut self, count_hint: CountHint) -> Self {
        self.count_hint = count_hint;
        self
    }

    /// Build a request from raw `page` and `limit` parameters
    pub fn from_params<'a>(
        page: impl Into<PageParam<'a>>,
        limit: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Self> {
        let token = token::parse(page)?;
        let limit = config.parse_limit(limit)?;
        Ok(Self::new(token, limit))
    }
}

/// Addressing mode a collection was produced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Offset addressing
    Numbered,
    /// Keyset addressing toward older items
    CursorBefore,
    /// Keyset addressing toward newer items
    CursorAfter,
}

impl PaginationMode {
    /// Check if this is a keyset mode
    pub fn is_cursor(self) -> bool {
        !matches!(self, Self::Numbered)
    }
}

/// Total number of items matching a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum TotalCount {
    /// Counted exactly or supplied by the caller
    Exact(u64),
    /// The backend stopped counting at this cap
    AtLeast(u64),
    /// Counting was skipped or timed out; `sentinel` stands in for paging math
    Unknown {
        /// Stand-in value
        sentinel: u64,
    },
}

impl TotalCount {
    /// Number used when deriving page counts
    pub fn value(&self) -> u64 {
        match *self {
            TotalCount::Exact(n) | TotalCount::AtLeast(n) => n,
            TotalCount::Unknown { sentinel } => sentinel,
        }
    }

    /// Check if the value is an exact count
    pub fn is_exact(&self) -> bool {
        matches!(self, TotalCount::Exact(_))
    }
}

/// An immutable page of results
///
/// `items` never holds more than `limit` entries and is always in descending
/// key order. Boundary predicates behave the same for every backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedCollection<T> {
    items: Vec<T>,
    mode: PaginationMode,
    limit: u64,
    current_page: Option<u64>,
    total_count: Option<TotalCount>,
    max_numbered_pages: u64,
    raw_fetch_size: u64,
}

impl<T> PaginatedCollection<T> {
    /// Result of an offset fetch
    pub fn numbered(
        mut items: Vec<T>,
        limit: u64,
        current_page: u64,
        total_count: TotalCount,
        max_numbered_pages: u64,
    ) -> Self {
        items.truncate(limit as usize);
        let raw_fetch_size = items.len() as u64;
        Self {
            items,
            mode: PaginationMode::Numbered,
            limit,
            current_page: Some(current_page.max(1)),
            total_count: Some(total_count),
            max_numbered_pages,
            raw_fetch_size,
        }
    }

    /// Result of a keyset fetch; `items` are already trimmed and in display order
    pub fn cursor(
        mode: PaginationMode,
        mut items: Vec<T>,
        limit: u64,
        raw_fetch_size: u64,
        max_numbered_pages: u64,
    ) -> Self {
        items.truncate(limit as usize);
        Self {
            items,
            mode,
            limit,
            current_page: None,
            total_count: None,
            max_numbered_pages,
            raw_fetch_size,
        }
    }

    /// Items on this page
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the collection, keeping the items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Addressing mode
    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Page size the collection was fetched with
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// 1-based page number (numbered mode only)
    pub fn current_page(&self) -> Option<u64> {
        self.current_page
    }

    /// Total count (numbered mode only)
    pub fn total_count(&self) -> Option<TotalCount> {
        self.total_count
    }

    /// Offset addressing ceiling in effect
    pub fn max_numbered_pages(&self) -> u64 {
        self.max_numbered_pages
    }

    /// Number of rows the backend returned, probe row included
    pub fn raw_fetch_size(&self) -> u64 {
        self.raw_fetch_size
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `ceil(total_count / limit)`; `None` in cursor mode
    pub fn total_pages(&self) -> Option<u64> {
        let total = self.total_count?.value();
        if self.limit == 0 {
            return Some(1);
        }
        Some(total.div_ceil(self.limit))
    }

    /// Check if no page precedes this one
    pub fn is_first_page(&self) -> bool {
        match self.mode {
            PaginationMode::Numbered => self.current_page == Some(1),
            PaginationMode::CursorBefore => false,
            PaginationMode::CursorAfter => self.raw_fetch_size <= self.limit,
        }
    }

    /// Check if no page follows this one
    pub fn is_last_page(&self) -> bool {
        match self.mode {
            PaginationMode::Numbered => match (self.current_page, self.total_pages()) {
                (Some(page), Some(total)) => page >= total,
                _ => true,
            },
            PaginationMode::CursorBefore => self.raw_fetch_size <= self.limit,
            PaginationMode::CursorAfter => false,
        }
    }
}

impl<T: Keyed> PaginatedCollection<T> {
    /// Key of the newest item on this page
    pub fn first_key(&self) -> Option<Key> {
        self.items.first().map(Keyed::key)
    }

    /// Key of the oldest item on this page
    pub fn last_key(&self) -> Option<Key> {
        self.items.last().map(Keyed::key)
    }
}

impl<T> IntoIterator for PaginatedCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
