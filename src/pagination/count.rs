//! Total count estimation
//!
//! Counting is best effort. A caller-supplied count wins, a `Skip` hint or a
//! backend timeout yields the sentinel, and search indices are never asked to
//! count past the deepest reachable numbered page.

use super::types::{CountHint, TotalCount};
use crate::backend::{Backend, BackendKind};
use crate::config::PaginationConfig;
use crate::error::Result;
use tracing::{debug, warn};

/// Resolves the `total_count` of a numbered page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountEstimator {
    max_numbered_pages: u64,
    sentinel: u64,
}

impl CountEstimator {
    /// Create an estimator from the engine configuration
    pub fn new(config: &PaginationConfig) -> Self {
        Self {
            max_numbered_pages: config.max_numbered_pages,
            sentinel: config.count_sentinel,
        }
    }

    /// Sentinel that stands in for unknown totals
    pub fn sentinel(&self) -> u64 {
        self.sentinel
    }

    /// Highest count a search index is asked for at this page size
    pub fn search_cap(&self, limit: u64) -> u64 {
        self.max_numbered_pages
            .saturating_mul(limit)
            .saturating_add(1)
    }

    /// Resolve the total for `filter` according to `hint`
    ///
    /// Only statement timeouts are absorbed; any other count failure is
    /// returned to the caller.
    pub fn estimate<B: Backend>(
        &self,
        backend: &B,
        filter: &B::Filter,
        hint: CountHint,
        limit: u64,
    ) -> Result<TotalCount> {
        match hint {
            CountHint::Explicit(count) => Ok(TotalCount::Exact(count)),
            CountHint::Skip => Ok(self.unknown()),
            CountHint::Compute => {
                let counted = match backend.kind() {
                    BackendKind::Relational => backend.count(filter).map(TotalCount::Exact),
                    BackendKind::SearchIndex => {
                        let cap = self.search_cap(limit);
                        backend.count_capped(filter, cap).map(|count| {
                            if count >= cap {
                                TotalCount::AtLeast(count)
                            } else {
                                TotalCount::Exact(count)
                            }
                        })
                    }
                };

                match counted {
                    Ok(total) => {
                        debug!(backend = backend.name(), ?total, "Counted matching items");
                        Ok(total)
                    }
                    Err(e) if e.is_timeout() => {
                        warn!(
                            backend = backend.name(),
                            error = %e,
                            sentinel = self.sentinel,
                            "Count timed out, using sentinel"
                        );
                        Ok(self.unknown())
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    fn unknown(&self) -> TotalCount {
        TotalCount::Unknown {
            sentinel: self.sentinel,
        }
    }
}
