//! # Events Module
//!
//! Model events (what changed), view events (what to redraw) and the
//! observer-list event bus that carries model events to subscribers.

pub mod event_bus;
pub mod model_events;
pub mod types;
pub mod view_events;

pub use event_bus::{EventBus, ModelEventHandler, SimpleEventBus};
pub use model_events::ModelEvent;
pub use types::{DashboardSection, InputMode, Route};
pub use view_events::ViewEvent;
