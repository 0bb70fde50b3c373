//! Numbered page link window

use crate::pagination::PaginatedCollection;
use serde::{Deserialize, Serialize};

/// What a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// A numbered page
    Page(u64),
    /// A gap of omitted pages
    Ellipsis,
}

/// One entry of a page window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    /// Link target
    pub page: LinkTarget,
    /// Whether this is the page being viewed
    pub is_current: bool,
}

impl PageLink {
    /// Link to a numbered page
    pub fn page(page: u64, is_current: bool) -> Self {
        Self {
            page: LinkTarget::Page(page),
            is_current,
        }
    }

    /// Gap marker
    pub fn ellipsis() -> Self {
        Self {
            page: LinkTarget::Ellipsis,
            is_current: false,
        }
    }

    /// Page number, if this is not a gap
    pub fn number(&self) -> Option<u64> {
        match self.page {
            LinkTarget::Page(n) => Some(n),
            LinkTarget::Ellipsis => None,
        }
    }
}

/// Ordered page links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageWindow {
    links: Vec<PageLink>,
}

impl PageWindow {
    /// All links in display order
    pub fn links(&self) -> &[PageLink] {
        &self.links
    }

    /// Numbered pages only
    pub fn pages(&self) -> Vec<u64> {
        self.links.iter().filter_map(PageLink::number).collect()
    }

    /// Number of gap markers
    pub fn ellipsis_count(&self) -> usize {
        self.links
            .iter()
            .filter(|l| l.page == LinkTarget::Ellipsis)
            .count()
    }

    /// The link marked current
    pub fn current(&self) -> Option<u64> {
        self.links.iter().find(|l| l.is_current).and_then(PageLink::number)
    }
}

impl IntoIterator for PageWindow {
    type Item = PageLink;
    type IntoIter = std::vec::IntoIter<PageLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

/// Appends links in ascending order, never past the ceiling and never twice.
/// A requested gap only materializes when pages are actually skipped.
struct WindowBuilder {
    current: u64,
    ceiling: u64,
    links: Vec<PageLink>,
    last: u64,
    gap_pending: bool,
}

impl WindowBuilder {
    fn new(current: u64, ceiling: u64) -> Self {
        Self {
            current,
            ceiling,
            links: Vec::new(),
            last: 0,
            gap_pending: false,
        }
    }

    fn page(&mut self, page: u64) {
        if page > self.ceiling || page <= self.last {
            return;
        }
        if self.gap_pending && page > self.last + 1 {
            self.links.push(PageLink::ellipsis());
        }
        self.gap_pending = false;
        self.links.push(PageLink::page(page, page == self.current));
        self.last = page;
    }

    fn range(&mut self, first: u64, last: u64) {
        for page in first..=last.min(self.ceiling) {
            self.page(page);
        }
    }

    fn gap(&mut self) {
        self.gap_pending = true;
    }

    fn build(self) -> PageWindow {
        PageWindow { links: self.links }
    }
}

/// Build the link window around `current_page`
///
/// Shows every page when there are few; otherwise the first page, a run of
/// `window_radius` pages either side of the current one, and a trailing link
/// to `min(total_pages, max_numbered_pages)`, with gaps marked by ellipses.
/// No numbered link beyond `max_numbered_pages` is produced.
pub fn page_window(
    current_page: u64,
    total_pages: u64,
    max_numbered_pages: u64,
    window_radius: u64,
) -> PageWindow {
    if total_pages <= 1 {
        return PageWindow {
            links: vec![PageLink::page(1, true)],
        };
    }

    let r = window_radius;
    let max_pages = max_numbered_pages.max(1);
    let trailing = total_pages.min(max_pages);
    let mut builder = WindowBuilder::new(current_page, max_pages);

    if total_pages <= r.saturating_mul(2).saturating_add(5) {
        builder.range(1, total_pages);
    } else if current_page <= r.saturating_add(2) {
        builder.range(1, current_page.saturating_add(r));
        builder.gap();
        builder.page(trailing);
    } else if current_page >= total_pages.saturating_sub(r.saturating_add(1)) {
        builder.page(1);
        builder.gap();
        builder.range(current_page.saturating_sub(r), total_pages);
    } else {
        builder.page(1);
        builder.gap();
        builder.range(current_page.saturating_sub(r), current_page.saturating_add(r));
        builder.gap();
        builder.page(trailing);
    }

    builder.build()
}

/// Link window for a numbered collection; `None` in cursor mode
pub fn collection_window<T>(
    collection: &PaginatedCollection<T>,
    window_radius: u64,
) -> Option<PageWindow> {
    let current = collection.current_page()?;
    let total = collection.total_pages()?;
    Some(page_window(
        current,
        total,
        collection.max_numbered_pages(),
        window_radius,
    ))
}
