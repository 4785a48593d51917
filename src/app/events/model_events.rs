//! # Model Events
//!
//! Events emitted when view model state changes.
//! Renderers and observers subscribe to these instead of polling state.

use super::types::{DashboardSection, Route};
use crate::app::models::{FilterIntent, PageIndex};
use crate::app::services::MovieQuery;

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// A movie list fetch was issued
    MoviesLoadingStarted { query: MovieQuery },

    /// A movie list fetch completed and replaced the displayed page
    MoviesLoaded {
        page: PageIndex,
        total_pages: PageIndex,
        total_elements: u64,
        count: usize,
    },

    /// A movie list fetch failed; the displayed list was cleared
    MoviesLoadFailed { message: String },

    /// The current page changed through navigation or a filter reset
    PageChanged {
        old_page: PageIndex,
        new_page: PageIndex,
    },

    /// A debounced filter intent settled and triggered a reload
    FilterSettled { intent: FilterIntent },

    /// A settled filter intent was dropped because its year is incomplete
    FilterDiscarded { intent: FilterIntent },

    /// A dashboard section received data
    DashboardSectionLoaded {
        section: DashboardSection,
        count: usize,
    },

    /// A dashboard section failed and was cleared
    DashboardSectionFailed {
        section: DashboardSection,
        message: String,
    },

    /// Active screen changed
    RouteChanged { old_route: Route, new_route: Route },

    /// Sidebar opened or closed
    SidebarToggled { open: bool },
}
