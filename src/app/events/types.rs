//! # Event Types
//!
//! Small value types shared by events, commands and view models.

use std::fmt;

/// Screens reachable from the sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Dashboard,
    Movies,
}

impl Route {
    /// Resolve a navigation path; the empty path redirects to the dashboard
    pub fn resolve(path: &str) -> Option<Route> {
        match path.trim().trim_matches('/') {
            "" | "dashboard" => Some(Route::Dashboard),
            "movies" => Some(Route::Movies),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Movies => "/movies",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Movies => "List",
        }
    }

    pub fn all() -> [Route; 2] {
        [Route::Dashboard, Route::Movies]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What keystrokes currently edit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the movie list's year filter
    EditingFilterYear,
    /// Typing into the dashboard's winners-by-year search box
    EditingSearchYear,
}

impl InputMode {
    pub fn is_editing(&self) -> bool {
        !matches!(self, InputMode::Normal)
    }
}

/// Independently loaded parts of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardSection {
    MultipleWinnerYears,
    TopStudios,
    ProducerIntervals,
    WinnersByYear,
}
