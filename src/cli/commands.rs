//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Paginate CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-paginate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pagination configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a page parameter into a token
    Parse {
        /// Raw page parameter, e.g. `7`, `b123`, `a45`
        page: String,
    },

    /// Print the page link window
    Window {
        /// Page being viewed
        #[arg(long)]
        current: u64,

        /// Total number of pages
        #[arg(long)]
        total: u64,

        /// Override max_numbered_pages
        #[arg(long)]
        max: Option<u64>,

        /// Override window_radius
        #[arg(long)]
        radius: Option<u64>,
    },

    /// Fetch one page of a DuckDB table
    Page {
        /// DuckDB database file
        #[arg(long)]
        database: PathBuf,

        /// Table to page through
        #[arg(long)]
        table: String,

        /// Ordering key column
        #[arg(long, default_value = "id")]
        key: String,

        /// Extra columns to project (comma-separated)
        #[arg(long)]
        columns: Option<String>,

        /// Row predicate (SQL)
        #[arg(long = "where")]
        predicate: Option<String>,

        /// Page parameter
        #[arg(long)]
        page: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<String>,

        /// Skip the total count
        #[arg(long)]
        skip_count: bool,
    },

    /// Fetch one page of an in-memory collection keyed 1..=size
    Demo {
        /// Number of items
        #[arg(long, default_value = "100")]
        size: i64,

        /// Page parameter
        #[arg(long)]
        page: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
