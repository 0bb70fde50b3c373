//! CLI module
//!
//! Command-line interface for exercising the pagination engine.
//!
//! # Commands
//!
//! - `parse` - Parse a page parameter
//! - `window` - Print the page link window
//! - `page` - Fetch a page from a DuckDB table
//! - `demo` - Fetch a page from an in-memory collection

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{PageReport, Runner};
