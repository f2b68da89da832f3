//! Page-window state shared by every resource list.

use serde::Deserialize;

/// Default number of rows per page when a route has no stored preference.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One resource list's current page window.
///
/// `current_page` is 1-indexed and never advanced past `total_pages` by
/// client action; totals are server-reported and adopted verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: u32,
    page_size: u32,
    total_pages: u32,
    total_items: u64,
}

impl PaginationState {
    /// Creates first-page state with the given page size (clamped to 1).
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
            total_items: 0,
        }
    }

    /// Returns the 1-indexed current page.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the configured rows per page.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the server-reported page count.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns the server-reported item count.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Returns whether a later page exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Returns whether an earlier page exists.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Moves back to page 1, keeping totals and page size.
    pub fn reset_to_first_page(&mut self) {
        self.current_page = 1;
    }

    /// Moves to `page` when it is within bounds and different from the
    /// current page. Returns whether the page changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Changes the page size (clamped to 1) and moves back to page 1.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Adopts the server-reported window after a successful load.
    pub fn apply_totals(&mut self, current_page: u32, total_pages: u32, total_items: u64) {
        self.current_page = current_page.max(1);
        self.total_pages = total_pages.max(1);
        self.total_items = total_items;
    }

    /// Resets to the single-empty-page state after a failed load, keeping
    /// the configured page size.
    pub fn reset_after_failure(&mut self) {
        self.current_page = 1;
        self.total_pages = 1;
        self.total_items = 0;
    }

    /// Pulls the current page back to the last page when totals shrank
    /// underneath it (e.g. the only row of the last page was deleted).
    /// Returns whether a clamp happened.
    pub fn clamp_to_last_page(&mut self) -> bool {
        if self.current_page > self.total_pages {
            self.current_page = self.total_pages.max(1);
            return true;
        }
        false
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One page of rows as returned by every `{resource}/list` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Rows for the requested page.
    pub result: Vec<T>,
    /// 1-indexed page the server actually returned.
    pub current_page: u32,
    /// Total number of pages for the query.
    pub total_pages: u32,
    /// Total number of items for the query.
    pub total_items: u64,
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PAGE_SIZE, PaginationState};

    #[test]
    fn defaults_to_a_single_empty_first_page() {
        let state = PaginationState::default();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.total_items(), 0);
    }

    #[test]
    fn page_size_is_clamped_to_one() {
        let state = PaginationState::new(0);
        assert_eq!(state.page_size(), 1);
    }

    #[test]
    fn set_page_refuses_out_of_bounds_moves() {
        let mut state = PaginationState::default();
        state.apply_totals(1, 3, 25);

        assert!(!state.set_page(0));
        assert!(!state.set_page(4));
        assert!(!state.set_page(1));
        assert!(state.set_page(3));
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn changing_page_size_resets_to_first_page() {
        let mut state = PaginationState::default();
        state.apply_totals(2, 5, 42);

        state.set_page_size(25);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_size(), 25);
    }

    #[test]
    fn failure_reset_keeps_the_page_size() {
        let mut state = PaginationState::new(25);
        state.apply_totals(3, 9, 210);

        state.reset_after_failure();
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.page_size(), 25);
    }

    #[test]
    fn clamp_pulls_the_page_back_when_totals_shrink() {
        let mut state = PaginationState::default();
        state.apply_totals(3, 3, 21);

        state.apply_totals(3, 2, 11);
        assert!(state.clamp_to_last_page());
        assert_eq!(state.current_page(), 2);
        assert!(!state.clamp_to_last_page());
    }
}
