//! Page link windowing
//!
//! Compresses an arbitrarily large page space into a bounded list of links
//! around the current page, and builds the previous/next affordances that
//! keep cursor-mode browsing in cursor mode.

mod links;
mod nav;

pub use links::{collection_window, page_window, LinkTarget, PageLink, PageWindow};
pub use nav::{nav_links, NavLinks};
