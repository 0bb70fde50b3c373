//! Pagination configuration
//!
//! The engine never reads configuration from ambient state. A
//! [`PaginationConfig`] is loaded once (from YAML, JSON, or code) and handed
//! to each strategy constructor.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reachability ceiling for offset addressing
pub const DEFAULT_MAX_NUMBERED_PAGES: u64 = 1000;

/// Page size used when the request does not name one
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page size a request may ask for
pub const DEFAULT_MAX_LIMIT: u32 = 200;

/// Number of page links shown on either side of the current page
pub const DEFAULT_WINDOW_RADIUS: u64 = 4;

/// Largest accepted `window_radius`
pub const MAX_WINDOW_RADIUS: u64 = 1000;

/// Stand-in total used when counting is skipped or times out
pub const DEFAULT_COUNT_SENTINEL: u64 = 1_000_000;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Deepest page served with offset addressing
    #[serde(default = "default_max_numbered_pages")]
    pub max_numbered_pages: u64,

    /// Page size when none is requested
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Upper clamp for requested page sizes
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,

    /// Page links on each side of the current page
    #[serde(default = "default_window_radius")]
    pub window_radius: u64,

    /// Sentinel total for skipped or timed out counts
    #[serde(default = "default_count_sentinel")]
    pub count_sentinel: u64,
}

fn default_max_numbered_pages() -> u64 {
    DEFAULT_MAX_NUMBERED_PAGES
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_max_limit() -> u32 {
    DEFAULT_MAX_LIMIT
}

fn default_window_radius() -> u64 {
    DEFAULT_WINDOW_RADIUS
}

fn default_count_sentinel() -> u64 {
    DEFAULT_COUNT_SENTINEL
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_numbered_pages: DEFAULT_MAX_NUMBERED_PAGES,
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            window_radius: DEFAULT_WINDOW_RADIUS,
            count_sentinel: DEFAULT_COUNT_SENTINEL,
        }
    }
}

impl PaginationConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the numbered page ceiling
    #[must_use]
    pub fn with_max_numbered_pages(mut self, pages: u64) -> Self {
        self.max_numbered_pages = pages;
        self
    }

    /// Set the default page size
    #[must_use]
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the maximum page size
    #[must_use]
    pub fn with_max_limit(mut self, limit: u32) -> Self {
        self.max_limit = limit;
        self
    }

    /// Set the page link window radius
    #[must_use]
    pub fn with_window_radius(mut self, radius: u64) -> Self {
        self.window_radius = radius;
        self
    }

    /// Set the count sentinel
    #[must_use]
    pub fn with_count_sentinel(mut self, sentinel: u64) -> Self {
        self.count_sentinel = sentinel;
        self
    }

    /// Check that the values are usable together
    pub fn validate(&self) -> Result<()> {
        if self.max_numbered_pages == 0 {
            return Err(Error::invalid_config(
                "max_numbered_pages",
                "must be at least 1",
            ));
        }
        if self.max_limit == 0 {
            return Err(Error::invalid_config("max_limit", "must be at least 1"));
        }
        if self.default_limit == 0 {
            return Err(Error::invalid_config("default_limit", "must be at least 1"));
        }
        if self.default_limit > self.max_limit {
            return Err(Error::invalid_config(
                "default_limit",
                format!(
                    "{} is larger than max_limit {}",
                    self.default_limit, self.max_limit
                ),
            ));
        }
        if self.window_radius > MAX_WINDOW_RADIUS {
            return Err(Error::invalid_config(
                "window_radius",
                format!("{} exceeds {MAX_WINDOW_RADIUS}", self.window_radius),
            ));
        }
        if self.count_sentinel == 0 {
            return Err(Error::invalid_config("count_sentinel", "must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    /// Resolve the page size of a request: absent falls back to the default,
    /// anything else is clamped to `[1, max_limit]`
    pub fn resolve_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }

    /// Resolve a raw limit parameter
    pub fn parse_limit(&self, raw: Option<&str>) -> Result<u32> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty());
        let Some(raw) = raw else {
            return Ok(self.resolve_limit(None));
        };

        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidLimit {
                value: raw.to_string(),
            });
        }

        // Digit strings too large for u32 are simply clamped
        let requested = raw.parse::<u32>().unwrap_or(u32::MAX);
        Ok(self.resolve_limit(Some(requested)))
    }
}
