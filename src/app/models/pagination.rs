//! # Pagination Model
//!
//! Current page / total pages bookkeeping for the movie list and the
//! derivation of the page-number window shown in the pagination bar.
//! Transitions are synchronous; the caller decides whether a transition
//! requires a new fetch from the returned flag.

use super::movie::PageIndex;

/// Number of page links shown at once
pub const VISIBLE_WINDOW: PageIndex = 5;

/// Pagination state of the movie list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    current_page: PageIndex,
    total_pages: PageIndex,
}

impl Pagination {
    pub fn new(current_page: PageIndex, total_pages: PageIndex) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    pub fn current_page(&self) -> PageIndex {
        self.current_page
    }

    pub fn total_pages(&self) -> PageIndex {
        self.total_pages
    }

    pub fn set_total_pages(&mut self, total_pages: PageIndex) {
        self.total_pages = total_pages;
    }

    /// Jump to `page` without checking it against the total
    pub fn go_to(&mut self, page: PageIndex) {
        self.current_page = page;
    }

    /// Advance one page; returns false when already on the last page
    pub fn next(&mut self) -> bool {
        if self.current_page < self.total_pages - 1 {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; returns false when already on the first page
    pub fn previous(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn first(&mut self) {
        self.current_page = 0;
    }

    /// Jump to the last page. With no pages this lands on -1.
    pub fn last(&mut self) {
        self.current_page = self.total_pages - 1;
    }

    pub fn visible_pages(&self) -> Vec<PageIndex> {
        visible_pages(self.current_page, self.total_pages)
    }
}

/// Page numbers to display around `current`, at most [`VISIBLE_WINDOW`] of them
///
/// The window is centred on `current` and clamped at both ends, so it always
/// holds exactly five entries once `total` reaches five.
pub fn visible_pages(current: PageIndex, total: PageIndex) -> Vec<PageIndex> {
    if total <= VISIBLE_WINDOW {
        return (0..total).collect();
    }

    let mut start = (current - VISIBLE_WINDOW / 2).max(0);
    let end = total.min(start + VISIBLE_WINDOW);

    if end - start < VISIBLE_WINDOW {
        start = (end - VISIBLE_WINDOW).max(0);
    }

    (start..end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_pages_should_list_all_pages_when_total_is_small() {
        assert_eq!(visible_pages(0, 3), vec![0, 1, 2]);
        assert_eq!(visible_pages(4, 5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn visible_pages_should_center_on_current_page() {
        assert_eq!(visible_pages(5, 10), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn visible_pages_should_clamp_at_start() {
        assert_eq!(visible_pages(0, 10), vec![0, 1, 2, 3, 4]);
        assert_eq!(visible_pages(1, 10), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn visible_pages_should_clamp_at_end() {
        assert_eq!(visible_pages(9, 10), vec![5, 6, 7, 8, 9]);
        assert_eq!(visible_pages(8, 10), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn visible_pages_should_handle_single_and_empty_totals() {
        assert_eq!(visible_pages(0, 1), vec![0]);
        assert!(visible_pages(0, 0).is_empty());
        assert!(visible_pages(-1, 0).is_empty());
    }

    #[test]
    fn visible_pages_should_never_return_fewer_than_window_for_large_totals() {
        for total in 5..30 {
            for current in 0..total {
                let pages = visible_pages(current, total);
                assert_eq!(pages.len(), VISIBLE_WINDOW as usize);
                assert!(pages.contains(&current));
                assert!(pages.iter().all(|p| (0..total).contains(p)));
            }
        }
    }

    #[test]
    fn next_should_stop_at_last_page() {
        let mut pagination = Pagination::new(1, 3);
        assert!(pagination.next());
        assert_eq!(pagination.current_page(), 2);
        assert!(!pagination.next());
        assert_eq!(pagination.current_page(), 2);
    }

    #[test]
    fn previous_should_stop_at_first_page() {
        let mut pagination = Pagination::new(1, 3);
        assert!(pagination.previous());
        assert_eq!(pagination.current_page(), 0);
        assert!(!pagination.previous());
        assert_eq!(pagination.current_page(), 0);
    }

    #[test]
    fn go_to_should_not_check_bounds() {
        let mut pagination = Pagination::new(0, 3);
        pagination.go_to(42);
        assert_eq!(pagination.current_page(), 42);
    }

    #[test]
    fn last_should_land_on_minus_one_without_pages() {
        let mut pagination = Pagination::new(0, 0);
        pagination.last();
        assert_eq!(pagination.current_page(), -1);
    }

    #[test]
    fn next_should_be_noop_without_pages() {
        let mut pagination = Pagination::default();
        assert!(!pagination.next());
        assert_eq!(pagination.current_page(), 0);
    }
}
