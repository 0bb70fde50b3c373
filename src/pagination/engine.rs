//! Pagination engine
//!
//! Owns a backend and both strategies, and decides once per request which
//! strategy serves it.

use super::strategies::{CursorStrategy, OffsetStrategy, PaginationStrategy};
use super::types::{CountHint, PaginatedCollection, PaginationRequest};
use crate::backend::Backend;
use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::token::{PageParam, PageToken};
use crate::types::Keyed;
use crate::window::{self, NavLinks, PageWindow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Strategy chosen for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Offset addressing
    Offset,
    /// Keyset addressing
    Cursor,
}

/// Paginates one backend
#[derive(Debug, Clone)]
pub struct Paginator<B> {
    backend: B,
    config: PaginationConfig,
    offset: OffsetStrategy,
    cursor: CursorStrategy,
}

impl<B: Backend> Paginator<B> {
    /// Create a paginator over `backend`
    pub fn new(backend: B, config: PaginationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            backend,
            offset: OffsetStrategy::new(config.clone()),
            cursor: CursorStrategy::new(config.clone()),
            config,
        })
    }

    /// Underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Engine configuration
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Pick the strategy for `token`
    ///
    /// Cursor tokens always use keyset addressing, and so does any numbered
    /// page at or beyond the ceiling. Pages strictly beyond the ceiling are
    /// rejected here, before the backend is touched.
    pub fn resolve(&self, token: PageToken) -> Result<StrategyKind> {
        let max_pages = self.config.max_numbered_pages;
        match token {
            PageToken::Numbered(page) if page > max_pages => {
                Err(Error::page_limit(page, max_pages))
            }
            PageToken::Numbered(page) if page >= max_pages => Ok(StrategyKind::Cursor),
            PageToken::Numbered(_) => Ok(StrategyKind::Offset),
            PageToken::CursorBefore(_) | PageToken::CursorAfter(_) => Ok(StrategyKind::Cursor),
        }
    }

    /// Fetch the page `request` addresses
    pub fn paginate(
        &self,
        request: &PaginationRequest,
        filter: &B::Filter,
    ) -> Result<PaginatedCollection<B::Item>> {
        let strategy = self.resolve(request.token)?;
        debug!(
            backend = self.backend.name(),
            token = %request.token,
            ?strategy,
            "Resolved pagination strategy"
        );

        match strategy {
            StrategyKind::Offset => self.offset.execute(&self.backend, request, filter),
            StrategyKind::Cursor => self.cursor.execute(&self.backend, request, filter),
        }
    }

    /// Parse raw `page`/`limit` parameters and fetch the page
    pub fn paginate_params<'a>(
        &self,
        page: impl Into<PageParam<'a>>,
        limit: Option<&str>,
        count_hint: CountHint,
        filter: &B::Filter,
    ) -> Result<PaginatedCollection<B::Item>> {
        let request = PaginationRequest::from_params(page, limit, &self.config)?
            .with_count_hint(count_hint);
        self.paginate(&request, filter)
    }

    /// Page link window for a numbered collection
    pub fn window<T>(&self, collection: &PaginatedCollection<T>) -> Option<PageWindow> {
        window::collection_window(collection, self.config.window_radius)
    }

    /// Previous/next tokens for a collection
    pub fn nav_links<T: Keyed>(&self, collection: &PaginatedCollection<T>) -> NavLinks {
        window::nav_links(collection)
    }
}
