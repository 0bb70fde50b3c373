//! Backend capability module
//!
//! A backend is any store that can hand back keyed items in key order and
//! count them. The pagination strategies only ever talk to the [`Backend`]
//! trait; each concrete store implements it once.
//!
//! Bundled implementations:
//!
//! - [`MemoryBackend`] - in-process collection of [`crate::Record`]s
//! - [`crate::database::DatabaseBackend`] - relational tables through DuckDB
//! - [`crate::search::SearchIndexBackend`] - Elasticsearch-style search indices

mod memory;
mod types;

pub use memory::{FieldFilter, MemoryBackend};
pub use types::{Backend, BackendKind};
