//! CLI runner - executes commands

use crate::backend::{FieldFilter, MemoryBackend};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::PaginationConfig;
use crate::database::{DatabaseBackend, DatabaseSource, SqlFilter};
use crate::error::{Result, ResultExt};
use crate::pagination::{CountHint, PaginatedCollection, PaginationMode, Paginator, TotalCount};
use crate::token;
use crate::types::Keyed;
use crate::window::{collection_window, nav_links, page_window, PageWindow};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

/// One page as printed by the `page` and `demo` commands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport<T> {
    /// Page items, newest first
    pub items: Vec<T>,
    /// Addressing mode the page was served with
    pub mode: PaginationMode,
    /// Page number; absent in cursor mode
    pub current_page: Option<u64>,
    /// Total matching items, when counted
    pub total_count: Option<TotalCount>,
    /// Pages implied by `total_count`
    pub total_pages: Option<u64>,
    /// No newer page exists
    pub is_first_page: bool,
    /// No older page exists
    pub is_last_page: bool,
    /// Numbered links; absent in cursor mode
    pub window: Option<PageWindow>,
    /// Page parameter of the newer page
    pub prev: Option<String>,
    /// Page parameter of the older page
    pub next: Option<String>,
}

impl<T: Keyed> PageReport<T> {
    /// Summarize `collection`, rendering navigation tokens as page parameters
    pub fn new(collection: PaginatedCollection<T>, window_radius: u64) -> Self {
        let links = nav_links(&collection);
        let window = collection_window(&collection, window_radius);
        Self {
            mode: collection.mode(),
            current_page: collection.current_page(),
            total_count: collection.total_count(),
            total_pages: collection.total_pages(),
            is_first_page: collection.is_first_page(),
            is_last_page: collection.is_last_page(),
            window,
            prev: links.prev.map(|t| t.to_string()),
            next: links.next.map(|t| t.to_string()),
            items: collection.into_items(),
        }
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its result
    pub fn run(&self) -> Result<()> {
        let output = self.execute()?;
        self.output_message(&output);
        Ok(())
    }

    /// Run the CLI command and return its result
    pub fn execute(&self) -> Result<Value> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Parse { page } => Self::parse(page),
            Commands::Window {
                current,
                total,
                max,
                radius,
            } => {
                let max = max.unwrap_or(config.max_numbered_pages);
                let radius = radius.unwrap_or(config.window_radius);
                Ok(serde_json::to_value(page_window(*current, *total, max, radius))?)
            }
            Commands::Page {
                database,
                table,
                key,
                columns,
                predicate,
                page,
                limit,
                skip_count,
            } => {
                let backend = DatabaseBackend::connect(
                    &DatabaseSource::Duckdb {
                        path: database.clone(),
                    },
                    table,
                )?
                .with_key_column(key)?
                .with_columns(split_columns(columns.as_deref()))?;

                let filter = predicate
                    .as_deref()
                    .map_or_else(SqlFilter::all, SqlFilter::predicate);
                let hint = if *skip_count {
                    CountHint::Skip
                } else {
                    CountHint::Compute
                };

                info!("Paging table {} of {}", table, database.display());
                let paginator = Paginator::new(backend, config)?;
                let collection =
                    paginator.paginate_params(page.as_deref(), limit.as_deref(), hint, &filter)?;
                let report = PageReport::new(collection, paginator.config().window_radius);
                Ok(serde_json::to_value(report)?)
            }
            Commands::Demo { size, page, limit } => {
                info!("Paging demo collection of {} items", size);
                let paginator = Paginator::new(MemoryBackend::sequential(1, *size), config)?;
                let collection = paginator.paginate_params(
                    page.as_deref(),
                    limit.as_deref(),
                    CountHint::Compute,
                    &FieldFilter::all(),
                )?;
                let report = PageReport::new(collection, paginator.config().window_radius);
                Ok(serde_json::to_value(report)?)
            }
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<PaginationConfig> {
        match &self.cli.config {
            Some(path) => Self::load_config_file(path),
            None => Ok(PaginationConfig::default()),
        }
    }

    fn load_config_file(path: &Path) -> Result<PaginationConfig> {
        let config = PaginationConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a page parameter
    fn parse(page: &str) -> Result<Value> {
        let token = token::parse(page)?;
        Ok(json!({
            "token": token,
            "page": token.to_string(),
            "is_cursor": token.is_cursor(),
        }))
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Split a comma-separated column list, dropping blanks
fn split_columns(columns: Option<&str>) -> Vec<String> {
    columns
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}
