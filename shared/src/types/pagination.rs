//! Pagination types for list endpoints
//!
//! List endpoints are page/limit based (1-indexed). The response carries
//! `next`/`prev` links only when the neighboring page actually exists, so
//! clients can walk result sets without knowing the total up front.

use serde::{Deserialize, Serialize};

/// Default page when the query string does not specify one
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size when the query string does not specify one
pub const DEFAULT_LIMIT: u64 = 25;

/// A requested page window: which page, how many items per page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Page number (1-indexed)
    pub page: u64,

    /// Number of items per page
    pub limit: u64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageWindow {
    /// Create a window, clamping the page to 1 and the limit to at least 1
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Number of records to skip before this page starts.
    ///
    /// Page and limit come straight from the query string, so the
    /// arithmetic saturates instead of overflowing on absurd values.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Index of the first record on this page (0-based)
    pub fn start_index(&self) -> u64 {
        self.skip()
    }

    /// Index one past the last record on this page (0-based)
    pub fn end_index(&self) -> u64 {
        self.skip().saturating_add(self.limit)
    }
}

/// Reference to a neighboring page, as serialized in the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub page: u64,
    pub limit: u64,
}

/// Links to the previous and next pages, when they exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageLink>,
}

impl PaginationLinks {
    /// Compute next/prev links for a window over `total` matching records
    ///
    /// `next` exists when records remain past this page's end, `prev` when
    /// the window starts past the first record.
    pub fn for_window(window: PageWindow, total: u64) -> Self {
        let next = if window.end_index() < total {
            Some(PageLink {
                page: window.page.saturating_add(1),
                limit: window.limit,
            })
        } else {
            None
        };

        let prev = if window.start_index() > 0 && window.page > 1 {
            Some(PageLink {
                page: window.page - 1,
                limit: window.limit,
            })
        } else {
            None
        };

        Self { next, prev }
    }

    /// True when neither link is present
    pub fn is_empty(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_computation() {
        assert_eq!(PageWindow::new(1, 25).skip(), 0);
        assert_eq!(PageWindow::new(2, 10).skip(), 10);
        assert_eq!(PageWindow::new(3, 10).skip(), 20);
    }

    #[test]
    fn test_extreme_window_saturates_instead_of_overflowing() {
        // page and limit are attacker-controlled query values
        let window = PageWindow::new(u64::MAX, 25);
        assert_eq!(window.skip(), u64::MAX);
        assert_eq!(window.end_index(), u64::MAX);

        let window = PageWindow::new(2, u64::MAX);
        assert_eq!(window.skip(), u64::MAX);
        assert_eq!(window.end_index(), u64::MAX);

        // Far past the data: no next link, still no panic
        let links = PaginationLinks::for_window(PageWindow::new(u64::MAX, 25), 100);
        assert_eq!(links.next, None);
    }

    #[test]
    fn test_page_clamped_to_one() {
        let window = PageWindow::new(0, 0);
        assert_eq!(window.page, 1);
        assert_eq!(window.limit, 1);
    }

    #[test]
    fn test_middle_page_has_both_links() {
        let links = PaginationLinks::for_window(PageWindow::new(2, 10), 25);
        assert_eq!(links.next, Some(PageLink { page: 3, limit: 10 }));
        assert_eq!(links.prev, Some(PageLink { page: 1, limit: 10 }));
    }

    #[test]
    fn test_first_page_has_no_prev() {
        let links = PaginationLinks::for_window(PageWindow::new(1, 10), 25);
        assert_eq!(links.next, Some(PageLink { page: 2, limit: 10 }));
        assert_eq!(links.prev, None);
    }

    #[test]
    fn test_last_page_has_no_next() {
        let links = PaginationLinks::for_window(PageWindow::new(3, 10), 25);
        assert_eq!(links.next, None);
        assert_eq!(links.prev, Some(PageLink { page: 2, limit: 10 }));
    }

    #[test]
    fn test_empty_result_has_no_links() {
        let links = PaginationLinks::for_window(PageWindow::default(), 0);
        assert!(links.is_empty());
    }

    #[test]
    fn test_exact_page_boundary() {
        // 20 records, page 2 of 10: records 11-20, no next
        let links = PaginationLinks::for_window(PageWindow::new(2, 10), 20);
        assert_eq!(links.next, None);
        assert_eq!(links.prev, Some(PageLink { page: 1, limit: 10 }));
    }
}
