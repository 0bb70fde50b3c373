//! Pagination module
//!
//! Supports: Offset (numbered pages) and Cursor (keyset before/after)
//!
//! # Overview
//!
//! The pagination module turns a [`PaginationRequest`] into one
//! [`PaginatedCollection`]. The [`Paginator`] picks a strategy per request:
//! numbered pages below the configured ceiling use [`OffsetStrategy`],
//! everything else uses [`CursorStrategy`]. Totals come from the
//! [`CountEstimator`].

mod count;
mod engine;
mod strategies;
mod types;

pub use count::CountEstimator;
pub use engine::{Paginator, StrategyKind};
pub use strategies::{CursorStrategy, OffsetStrategy, PaginationStrategy};
pub use types::{CountHint, PaginatedCollection, PaginationMode, PaginationRequest, TotalCount};

#[cfg(test)]
mod tests;
