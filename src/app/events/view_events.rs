//! # View Events
//!
//! Events that tell the renderer how much of the screen to redraw.

use super::model_events::ModelEvent;

/// Events emitted when view updates are needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Full screen redraw required (resize, route change, sidebar)
    FullRedrawRequired,

    /// Main content area changed (new data, loading flag)
    ContentRedrawRequired,

    /// Status bar needs updating (input mode, typed text)
    StatusBarUpdateRequired,
}

impl ViewEvent {
    /// Redraw needed to reflect a model change
    pub fn for_model_event(event: &ModelEvent) -> ViewEvent {
        match event {
            ModelEvent::RouteChanged { .. } | ModelEvent::SidebarToggled { .. } => {
                ViewEvent::FullRedrawRequired
            }
            ModelEvent::FilterDiscarded { .. } => ViewEvent::StatusBarUpdateRequired,
            _ => ViewEvent::ContentRedrawRequired,
        }
    }
}
