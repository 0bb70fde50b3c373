//! DuckDB-based relational backend
//!
//! Pages through one keyed table. The table may live in DuckDB itself or in
//! a PostgreSQL, MySQL, or SQLite database attached through DuckDB
//! extensions.

use super::query::{validate_identifier, QueryBuilder, SqlFilter};
use super::value::{duckdb_value_to_json, duckdb_value_to_key};
use crate::backend::{Backend, BackendKind};
use crate::error::{Error, Result};
use crate::types::{JsonObject, Key, KeyBound, Record, SortDirection};
use duckdb::Connection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Where the paged table lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseSource {
    /// Fresh in-memory DuckDB
    Memory,
    /// DuckDB database file
    Duckdb {
        /// Database file path
        path: PathBuf,
    },
    /// PostgreSQL attached read-only
    Postgres {
        /// libpq connection string or URI
        connection_string: String,
    },
    /// MySQL attached read-only
    Mysql {
        /// MySQL connection string
        connection_string: String,
    },
    /// SQLite file attached read-only
    Sqlite {
        /// Database file path
        path: PathBuf,
    },
}

impl DatabaseSource {
    fn is_attached(&self) -> bool {
        matches!(
            self,
            DatabaseSource::Postgres { .. }
                | DatabaseSource::Mysql { .. }
                | DatabaseSource::Sqlite { .. }
        )
    }
}

/// Relational backend over a DuckDB connection
pub struct DatabaseBackend {
    /// DuckDB connection
    conn: Connection,
    /// Statement builder for the paged table
    query: QueryBuilder,
    /// Table name as given (for logging)
    table: String,
}

impl DatabaseBackend {
    /// Connect to `source` and page through `table` keyed by `id`
    pub fn connect(source: &DatabaseSource, table: &str) -> Result<Self> {
        validate_identifier("table", table)?;

        let conn = match source {
            DatabaseSource::Duckdb { path } => Connection::open(path)
                .map_err(|e| Error::config(format!("Failed to open DuckDB database: {e}")))?,
            _ => Connection::open_in_memory()
                .map_err(|e| Error::config(format!("Failed to create DuckDB connection: {e}")))?,
        };
        attach_database(&conn, source)?;

        let qualified = if source.is_attached() {
            qualify_attached(source, table)
        } else {
            table.to_string()
        };

        Ok(Self {
            conn,
            query: QueryBuilder::new(qualified, "id", Vec::new()),
            table: table.to_string(),
        })
    }

    /// Page through `table` on an existing connection
    pub fn from_connection(conn: Connection, table: &str) -> Result<Self> {
        validate_identifier("table", table)?;
        Ok(Self {
            conn,
            query: QueryBuilder::new(table, "id", Vec::new()),
            table: table.to_string(),
        })
    }

    /// Use a different key column
    pub fn with_key_column(self, key_column: &str) -> Result<Self> {
        validate_identifier("key_column", key_column)?;
        let query = QueryBuilder::new(
            self.qualified_table(),
            key_column,
            self.query.columns().to_vec(),
        );
        Ok(Self { query, ..self })
    }

    /// Project extra columns into each record's fields
    pub fn with_columns<I, S>(self, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for column in &columns {
            validate_identifier("columns", column)?;
        }
        let query = QueryBuilder::new(self.qualified_table(), self.key_column(), columns);
        Ok(Self { query, ..self })
    }

    /// The DuckDB connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Table name as configured
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Statement builder in use
    pub fn query_builder(&self) -> &QueryBuilder {
        &self.query
    }

    fn qualified_table(&self) -> String {
        self.query.table().to_string()
    }

    fn key_column(&self) -> String {
        self.query.key_column().to_string()
    }

    fn fetch(&self, sql: &str) -> Result<Vec<Record>> {
        debug!("Executing query: {}", sql);

        let mut stmt = self.conn.prepare(sql)?;
        let columns = self.query.columns();
        let rows = stmt.query_map([], |row| {
            let key: duckdb::types::Value = row.get(0)?;
            let mut fields = JsonObject::new();
            for (i, column) in columns.iter().enumerate() {
                let value: duckdb::types::Value = row.get(i + 1)?;
                fields.insert(column.clone(), duckdb_value_to_json(value));
            }
            Ok((key, fields))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (key, fields) = row?;
            let id = duckdb_value_to_key(&key).ok_or_else(|| {
                Error::database(format!(
                    "Key column '{}' of '{}' holds a non-integer value: {key:?}",
                    self.query.key_column(),
                    self.table
                ))
            })?;
            records.push(Record { id, fields });
        }
        Ok(records)
    }

    fn scalar(&self, sql: &str) -> Result<u64> {
        debug!("Executing query: {}", sql);
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

impl Backend for DatabaseBackend {
    type Item = Record;
    type Filter = SqlFilter;

    fn kind(&self) -> BackendKind {
        BackendKind::Relational
    }

    fn name(&self) -> &str {
        "duckdb"
    }

    fn fetch_offset(&self, limit: u64, offset: u64, filter: &SqlFilter) -> Result<Vec<Record>> {
        let sql = self
            .query
            .select(filter, KeyBound::None, SortDirection::Desc, limit, offset);
        self.fetch(&sql)
    }

    fn fetch_before(
        &self,
        limit: u64,
        anchor: Option<Key>,
        filter: &SqlFilter,
    ) -> Result<Vec<Record>> {
        let bound = anchor.map_or(KeyBound::None, KeyBound::Below);
        let sql = self.query.select(filter, bound, SortDirection::Desc, limit, 0);
        self.fetch(&sql)
    }

    fn fetch_after(&self, limit: u64, anchor: Key, filter: &SqlFilter) -> Result<Vec<Record>> {
        let sql = self
            .query
            .select(filter, KeyBound::Above(anchor), SortDirection::Asc, limit, 0);
        self.fetch(&sql)
    }

    fn count(&self, filter: &SqlFilter) -> Result<u64> {
        self.scalar(&self.query.count(filter))
    }

    fn count_capped(&self, filter: &SqlFilter, cap: u64) -> Result<u64> {
        self.scalar(&self.query.count_capped(filter, cap))
    }
}

/// Qualify a table name inside the attached `source_db`
fn qualify_attached(source: &DatabaseSource, table: &str) -> String {
    match source {
        DatabaseSource::Postgres { .. } if !table.contains('.') => {
            format!("source_db.public.{table}")
        }
        _ => format!("source_db.{table}"),
    }
}

/// Attach external database to DuckDB
fn attach_database(conn: &Connection, source: &DatabaseSource) -> Result<()> {
    let (extension, target, kind) = match source {
        DatabaseSource::Memory | DatabaseSource::Duckdb { .. } => return Ok(()),
        DatabaseSource::Postgres { connection_string } => {
            ("postgres", connection_string.clone(), "POSTGRES")
        }
        DatabaseSource::Mysql { connection_string } => {
            ("mysql", connection_string.clone(), "MYSQL")
        }
        DatabaseSource::Sqlite { path } => ("sqlite", path.display().to_string(), "SQLITE"),
    };

    conn.execute_batch(&format!("INSTALL {extension}; LOAD {extension};"))
        .map_err(|e| Error::config(format!("Failed to load {extension} extension: {e}")))?;

    let target = target.replace('\'', "''");
    conn.execute_batch(&format!(
        "ATTACH '{target}' AS source_db (TYPE {kind}, READ_ONLY);"
    ))
    .map_err(|e| Error::config(format!("Failed to attach {kind} database: {e}")))?;

    Ok(())
}
