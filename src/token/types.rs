//! Page token types

use crate::error::Error;
use crate::types::Key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Typed addressing intent of a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageToken {
    /// 1-based ordinal page
    Numbered(u64),
    /// Items with keys below the anchor, or the newest items when unset
    CursorBefore(Option<Key>),
    /// Items with keys above the anchor
    CursorAfter(Key),
}

impl Default for PageToken {
    fn default() -> Self {
        Self::Numbered(1)
    }
}

impl PageToken {
    /// Check if this token addresses by offset
    pub fn is_numbered(&self) -> bool {
        matches!(self, Self::Numbered(_))
    }

    /// Check if this token addresses by key
    pub fn is_cursor(&self) -> bool {
        !self.is_numbered()
    }
}

/// Renders the token in the external grammar accepted by [`super::parse`]
impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered(page) => write!(f, "{page}"),
            Self::CursorBefore(Some(anchor)) => write!(f, "b{anchor}"),
            Self::CursorBefore(None) => f.write_str("b0"),
            Self::CursorAfter(anchor) => write!(f, "a{anchor}"),
        }
    }
}

impl FromStr for PageToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}

/// Raw page parameter as it arrives from a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageParam<'a> {
    /// No parameter given
    #[default]
    Missing,
    /// String form, e.g. a query parameter
    Text(&'a str),
    /// Integer form
    Number(u64),
}

impl<'a> From<&'a str> for PageParam<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for PageParam<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<u64> for PageParam<'_> {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for PageParam<'_> {
    fn from(value: u32) -> Self {
        Self::Number(u64::from(value))
    }
}

impl<'a, T: Into<PageParam<'a>>> From<Option<T>> for PageParam<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}
