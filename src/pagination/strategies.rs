//! Pagination strategy implementations
//!
//! Each strategy turns a request into exactly one backend fetch (plus an
//! optional count) and wraps the rows in a [`PaginatedCollection`].

use super::count::CountEstimator;
use super::types::{PaginatedCollection, PaginationMode, PaginationRequest};
use crate::backend::Backend;
use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::token::PageToken;
use tracing::debug;

/// A way of addressing pages against any [`Backend`]
pub trait PaginationStrategy {
    /// Fetch the page `request` addresses
    fn execute<B: Backend>(
        &self,
        backend: &B,
        request: &PaginationRequest,
        filter: &B::Filter,
    ) -> Result<PaginatedCollection<B::Item>>;
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Numbered pages served with `LIMIT`/`OFFSET`
///
/// Refuses pages beyond `max_numbered_pages`: deep offset scans degrade badly
/// on large stores.
#[derive(Debug, Clone)]
pub struct OffsetStrategy {
    config: PaginationConfig,
    estimator: CountEstimator,
}

impl OffsetStrategy {
    /// Create an offset strategy
    pub fn new(config: PaginationConfig) -> Self {
        let estimator = CountEstimator::new(&config);
        Self { config, estimator }
    }

    /// Count estimator in use
    pub fn estimator(&self) -> &CountEstimator {
        &self.estimator
    }
}

impl PaginationStrategy for OffsetStrategy {
    fn execute<B: Backend>(
        &self,
        backend: &B,
        request: &PaginationRequest,
        filter: &B::Filter,
    ) -> Result<PaginatedCollection<B::Item>> {
        let PageToken::Numbered(page) = request.token else {
            return Err(Error::Other(format!(
                "Offset strategy cannot serve cursor token '{}'",
                request.token
            )));
        };

        let page = page.max(1);
        let max_pages = self.config.max_numbered_pages;
        if page > max_pages {
            return Err(Error::page_limit(page, max_pages));
        }

        let limit = u64::from(self.config.resolve_limit(Some(request.limit)));
        let offset = (page - 1).saturating_mul(limit);

        debug!(
            backend = backend.name(),
            page, limit, offset, "Fetching numbered page"
        );
        let items = backend.fetch_offset(limit, offset, filter)?;
        let total = self
            .estimator
            .estimate(backend, filter, request.count_hint, limit)?;

        Ok(PaginatedCollection::numbered(
            items, limit, page, total, max_pages,
        ))
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Keyset pages anchored on an item key
///
/// Fetches one probe row past the limit so the boundary predicates can tell
/// whether another page exists without a second query. Never counts.
#[derive(Debug, Clone)]
pub struct CursorStrategy {
    config: PaginationConfig,
}

impl CursorStrategy {
    /// Create a cursor strategy
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }
}

impl PaginationStrategy for CursorStrategy {
    fn execute<B: Backend>(
        &self,
        backend: &B,
        request: &PaginationRequest,
        filter: &B::Filter,
    ) -> Result<PaginatedCollection<B::Item>> {
        let limit = u64::from(self.config.resolve_limit(Some(request.limit)));
        let probe = limit + 1;
        let max_pages = self.config.max_numbered_pages;

        match request.token {
            // Numbered pages that reach the ceiling restart keyset browsing
            // from the newest item
            PageToken::Numbered(_) | PageToken::CursorBefore(None) => {
                debug!(backend = backend.name(), limit, "Fetching newest items");
                let items = backend.fetch_before(probe, None, filter)?;
                Ok(Self::before(items, limit, max_pages))
            }
            PageToken::CursorBefore(Some(anchor)) => {
                debug!(backend = backend.name(), limit, anchor, "Fetching items before anchor");
                let items = backend.fetch_before(probe, Some(anchor), filter)?;
                Ok(Self::before(items, limit, max_pages))
            }
            PageToken::CursorAfter(anchor) => {
                debug!(backend = backend.name(), limit, anchor, "Fetching items after anchor");
                let mut items = backend.fetch_after(probe, anchor, filter)?;
                let raw_fetch_size = items.len() as u64;
                items.truncate(limit as usize);
                items.reverse();
                Ok(PaginatedCollection::cursor(
                    PaginationMode::CursorAfter,
                    items,
                    limit,
                    raw_fetch_size,
                    max_pages,
                ))
            }
        }
    }
}

impl CursorStrategy {
    fn before<T>(mut items: Vec<T>, limit: u64, max_pages: u64) -> PaginatedCollection<T> {
        let raw_fetch_size = items.len() as u64;
        items.truncate(limit as usize);
        PaginatedCollection::cursor(
            PaginationMode::CursorBefore,
            items,
            limit,
            raw_fetch_size,
            max_pages,
        )
    }
}
