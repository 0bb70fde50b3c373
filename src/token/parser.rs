//! Page token parser

use super::types::{PageParam, PageToken};
use crate::error::{Error, Result};
use crate::types::Key;
use regex::Regex;
use std::sync::LazyLock;

/// Optional direction letter followed by digits: `12`, `b34`, `A56`
static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([aAbB])?([0-9]+)$").unwrap());

/// Parse a raw page parameter
///
/// Blank or missing input is the first numbered page. Numbered `0` is
/// clamped to `1`. Under the `b` form an anchor of `0` means "no anchor".
pub fn parse<'a>(raw: impl Into<PageParam<'a>>) -> Result<PageToken> {
    match raw.into() {
        PageParam::Missing => Ok(PageToken::Numbered(1)),
        PageParam::Number(page) => Ok(PageToken::Numbered(page.max(1))),
        PageParam::Text(text) => parse_text(text),
    }
}

fn parse_text(text: &str) -> Result<PageToken> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(PageToken::Numbered(1));
    }

    let captures = TOKEN_REGEX
        .captures(trimmed)
        .ok_or_else(|| Error::invalid_token(text))?;
    let digits = &captures[2];

    match captures.get(1).map(|m| m.as_str()) {
        None => {
            let page: u64 = digits.parse().map_err(|_| Error::invalid_token(text))?;
            Ok(PageToken::Numbered(page.max(1)))
        }
        Some("a" | "A") => Ok(PageToken::CursorAfter(parse_anchor(digits, text)?)),
        Some(_) => {
            let anchor = parse_anchor(digits, text)?;
            Ok(PageToken::CursorBefore((anchor != 0).then_some(anchor)))
        }
    }
}

fn parse_anchor(digits: &str, raw: &str) -> Result<Key> {
    digits.parse::<Key>().map_err(|_| Error::invalid_token(raw))
}
