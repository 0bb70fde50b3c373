//! Previous/next navigation tokens

use crate::pagination::{PaginatedCollection, PaginationMode};
use crate::token::PageToken;
use crate::types::Keyed;
use serde::{Deserialize, Serialize};

/// Tokens for the neighbouring pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLinks {
    /// Newer page
    pub prev: Option<PageToken>,
    /// Older page
    pub next: Option<PageToken>,
}

/// Build previous/next tokens from a collection's boundary predicates
///
/// In cursor mode both tokens anchor on the boundary items of the page. A
/// numbered page whose successor would reach the offset ceiling also hands
/// off to a cursor anchored on its last item.
pub fn nav_links<T: Keyed>(collection: &PaginatedCollection<T>) -> NavLinks {
    let prev = if collection.is_first_page() {
        None
    } else {
        match (collection.mode(), collection.current_page()) {
            (PaginationMode::Numbered, Some(page)) if page > 1 => {
                Some(PageToken::Numbered(page - 1))
            }
            _ => collection.first_key().map(PageToken::CursorAfter),
        }
    };

    let next = if collection.is_last_page() {
        None
    } else {
        match (collection.mode(), collection.current_page()) {
            (PaginationMode::Numbered, Some(page))
                if page.saturating_add(1) < collection.max_numbered_pages() =>
            {
                Some(PageToken::Numbered(page + 1))
            }
            _ => collection
                .last_key()
                .map(|key| PageToken::CursorBefore(Some(key))),
        }
    };

    NavLinks { prev, next }
}
