//! SQL generation for keyed tables

use crate::error::{Error, Result};
use crate::types::{KeyBound, SortDirection};
use regex::Regex;
use std::sync::LazyLock;

/// Plain or dotted identifiers: `posts`, `public.posts`, `source_db.public.posts`
static IDENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap());

/// Check that `ident` is safe to splice into SQL
pub fn validate_identifier(field: &str, ident: &str) -> Result<()> {
    if IDENT_REGEX.is_match(ident) {
        Ok(())
    } else {
        Err(Error::invalid_config(
            field,
            format!("'{ident}' is not a valid SQL identifier"),
        ))
    }
}

/// Row predicate produced by the query-construction layer
///
/// The fragment is spliced into a `WHERE` clause as-is and must come from
/// trusted code, never from request input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlFilter {
    predicate: Option<String>,
}

impl SqlFilter {
    /// Match every row
    pub fn all() -> Self {
        Self::default()
    }

    /// Match rows satisfying `predicate`
    pub fn predicate(predicate: impl Into<String>) -> Self {
        let predicate = predicate.into();
        Self {
            predicate: (!predicate.trim().is_empty()).then_some(predicate),
        }
    }

    /// Check if no predicate is set
    pub fn is_empty(&self) -> bool {
        self.predicate.is_none()
    }

    /// Raw predicate text
    pub fn as_sql(&self) -> Option<&str> {
        self.predicate.as_deref()
    }
}

/// Builds statements against one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    table: String,
    key_column: String,
    columns: Vec<String>,
}

impl QueryBuilder {
    /// Create a builder; identifiers must already be validated
    pub fn new(table: impl Into<String>, key_column: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            key_column: key_column.into(),
            columns,
        }
    }

    /// Table the statements read from
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Ordering key column
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Projected non-key columns
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn where_clause(&self, filter: &SqlFilter, bound: KeyBound) -> String {
        let mut conditions = Vec::new();
        if let Some(predicate) = filter.as_sql() {
            conditions.push(format!("({predicate})"));
        }
        match bound {
            KeyBound::None => {}
            KeyBound::Below(anchor) => conditions.push(format!("{} < {anchor}", self.key_column)),
            KeyBound::Above(anchor) => conditions.push(format!("{} > {anchor}", self.key_column)),
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        }
    }

    fn projection(&self) -> String {
        std::iter::once(self.key_column.as_str())
            .chain(self.columns.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Ordered, limited select with an optional key bound and offset
    pub fn select(
        &self,
        filter: &SqlFilter,
        bound: KeyBound,
        direction: SortDirection,
        limit: u64,
        offset: u64,
    ) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}{} ORDER BY {} {} LIMIT {limit}",
            self.projection(),
            self.table,
            self.where_clause(filter, bound),
            self.key_column,
            direction.as_sql(),
        );
        if offset > 0 {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        sql
    }

    /// Exact count of matching rows
    pub fn count(&self, filter: &SqlFilter) -> String {
        format!(
            "SELECT COUNT(*) FROM {}{}",
            self.table,
            self.where_clause(filter, KeyBound::None)
        )
    }

    /// Count of matching rows, scanning at most `cap` of them
    pub fn count_capped(&self, filter: &SqlFilter, cap: u64) -> String {
        format!(
            "SELECT COUNT(*) FROM (SELECT 1 FROM {}{} LIMIT {cap}) AS q",
            self.table,
            self.where_clause(filter, KeyBound::None)
        )
    }
}
