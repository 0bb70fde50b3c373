//! Error types for Solidafy Paginate
//!
//! This module defines the error hierarchy for the entire engine.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for Solidafy Paginate
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid page token: '{token}'")]
    InvalidPageToken { token: String },

    #[error(
        "Page {page} exceeds the maximum of {max_numbered_pages} numbered pages; \
         narrow the search or browse with before/after cursors"
    )]
    PageLimitExceeded { page: u64, max_numbered_pages: u64 },

    #[error("Invalid limit: '{value}'")]
    InvalidLimit { value: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Backend Errors
    // ============================================================================
    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Statement timed out: {message}")]
    StatementTimeout { message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Malformed search response: {message}")]
    SearchResponse { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid page token error
    pub fn invalid_token(token: impl Into<String>) -> Self {
        Self::InvalidPageToken {
            token: token.into(),
        }
    }

    /// Create a page limit error
    pub fn page_limit(page: u64, max_numbered_pages: u64) -> Self {
        Self::PageLimitExceeded {
            page,
            max_numbered_pages,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Create a statement timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::StatementTimeout {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a malformed search response error
    pub fn search_response(message: impl Into<String>) -> Self {
        Self::SearchResponse {
            message: message.into(),
        }
    }

    /// Check if this error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPageToken { .. }
                | Error::PageLimitExceeded { .. }
                | Error::InvalidLimit { .. }
                | Error::InvalidConfigValue { .. }
        )
    }

    /// Check if this error is a backend statement timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::StatementTimeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            Error::HttpStatus { status, .. } => matches!(status, 408 | 504),
            _ => false,
        }
    }
}

impl From<duckdb::Error> for Error {
    fn from(err: duckdb::Error) -> Self {
        let message = err.to_string();
        if is_timeout_message(&message) {
            Error::timeout(message)
        } else {
            Error::database(message)
        }
    }
}

/// Check whether a driver message describes a cancelled or timed out statement
pub(crate) fn is_timeout_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("statement timeout")
        || lower.contains("canceling statement")
        || lower.contains("interrupted")
        || lower.contains("timed out")
}

/// Result type alias for Solidafy Paginate
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
