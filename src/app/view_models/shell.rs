//! # Shell State
//!
//! Application chrome: which screen is active and whether the sidebar is open.

use crate::app::events::{ModelEvent, Route};

/// Application title shown in the header
pub const APP_TITLE: &str = "raspberry-awards";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    route: Route,
    sidebar_open: bool,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn title(&self) -> &'static str {
        APP_TITLE
    }

    pub fn toggle_sidebar(&mut self) -> ModelEvent {
        self.sidebar_open = !self.sidebar_open;
        ModelEvent::SidebarToggled {
            open: self.sidebar_open,
        }
    }

    /// Close the sidebar; `None` when it was already closed
    pub fn close_sidebar(&mut self) -> Option<ModelEvent> {
        if !self.sidebar_open {
            return None;
        }
        self.sidebar_open = false;
        Some(ModelEvent::SidebarToggled { open: false })
    }

    /// Switch screens; `None` when `route` is already active
    pub fn navigate(&mut self, route: Route) -> Option<ModelEvent> {
        if self.route == route {
            return None;
        }
        let old_route = std::mem::replace(&mut self.route, route);
        tracing::debug!("Route changed from {} to {}", old_route, route);
        Some(ModelEvent::RouteChanged {
            old_route,
            new_route: route,
        })
    }
}
