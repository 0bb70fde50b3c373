// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Solidafy Paginate
//!
//! Pagination for large, mutable, key-ordered collections.
//!
//! ## Features
//!
//! - **Numbered pages**: `LIMIT`/`OFFSET` addressing up to a configurable ceiling
//! - **Keyset cursors**: `b<key>` / `a<key>` tokens that stay stable under inserts
//! - **Cheap counting**: capped counts on search indices, sentinel on timeout
//! - **Page links**: bounded windows with ellipses around the current page
//! - **Backends**: in-memory, DuckDB (plus attached Postgres/MySQL/SQLite),
//!   and Elasticsearch-style search indices
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_paginate::backend::{FieldFilter, MemoryBackend};
//! use solidafy_paginate::pagination::{CountHint, Paginator};
//! use solidafy_paginate::{PaginationConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let paginator = Paginator::new(MemoryBackend::sequential(1, 500), PaginationConfig::default())?;
//!
//!     // "3", "b120" and "a80" are all valid page parameters
//!     let page = paginator.paginate_params("b120", Some("20"), CountHint::Compute, &FieldFilter::all())?;
//!     let links = paginator.nav_links(&page);
//!     println!("{} items, next: {:?}", page.len(), links.next.map(|t| t.to_string()));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  page param ──► token::parse ──► Paginator (mode switch)        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!          ┌─────────────────────┴─────────────────────┐
//!          │                                           │
//!   OffsetStrategy ──► CountEstimator           CursorStrategy
//!          │                                           │
//!          └──────────────► Backend ◄──────────────────┘
//!                     Memory │ DuckDB │ Search
//!                                │
//!                      PaginatedCollection
//!                                │
//!                   window::page_window / nav_links
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Engine configuration
pub mod config;

/// Page token parsing
pub mod token;

/// Backend capability and the in-memory backend
pub mod backend;

/// Pagination strategies and the paginator
pub mod pagination;

/// Page link windowing
pub mod window;

/// Relational backend via DuckDB
pub mod database;

/// Search-index backend
pub mod search;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::PaginationConfig;
pub use pagination::{
    CountHint, PaginatedCollection, PaginationMode, PaginationRequest, Paginator, TotalCount,
};
pub use token::{parse, PageToken};
pub use window::{page_window, NavLinks, PageWindow};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
