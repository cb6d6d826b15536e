//! Page-number pagination policy for the product listing.
//!
//! The product API returns no total count, so "is there a next page" is
//! inferred from the size of the current page: a full page of [`PAGE_SIZE`]
//! items enables Next, anything shorter disables it.
//!
//! ## Known boundary
//!
//! When the last page holds exactly [`PAGE_SIZE`] items, Next stays enabled
//! and the following page comes back empty. The heuristic never hides a page
//! that does exist.

/// Number of products requested per page.
pub const PAGE_SIZE: u32 = 20;

const LOADING_LABEL: &str = "Loading...";

/// Enabled state and labels for the Previous / Next buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub page: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub previous_label: &'static str,
    pub next_label: &'static str,
}

impl PaginationControls {
    /// Derives the controls from the current page, the number of products on
    /// it, and whether a product fetch is in flight.
    #[must_use]
    pub fn new(page: u32, result_count: usize, loading: bool) -> Self {
        let full_page = result_count >= PAGE_SIZE as usize;
        Self {
            page,
            previous_enabled: page > 1 && !loading,
            next_enabled: full_page && !loading,
            previous_label: if loading && page > 1 {
                LOADING_LABEL
            } else {
                "Previous"
            },
            next_label: if loading && result_count == PAGE_SIZE as usize {
                LOADING_LABEL
            } else {
                "Next"
            },
        }
    }

    /// Page the Previous button navigates to; never below 1.
    #[must_use]
    pub fn previous_page(&self) -> u32 {
        self.page.saturating_sub(1).max(1)
    }

    #[must_use]
    pub fn next_page(&self) -> u32 {
        self.page.saturating_add(1)
    }
}

/// Zero-based offset of the first item on `page` (1-based).
#[must_use]
pub fn page_offset(page: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(PAGE_SIZE)
}
