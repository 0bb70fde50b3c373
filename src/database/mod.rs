//! Relational backend via DuckDB
//!
//! This module provides the relational [`crate::backend::Backend`] using
//! DuckDB as the query engine. DuckDB can also reach PostgreSQL, MySQL, and
//! SQLite databases through its extensions.

mod backend;
mod query;
mod value;

pub use backend::{DatabaseBackend, DatabaseSource};
pub use query::{validate_identifier, QueryBuilder, SqlFilter};
pub use value::{duckdb_value_to_json, duckdb_value_to_key};
