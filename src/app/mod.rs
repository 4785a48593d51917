//! # MVVM Architecture Implementation
//!
//! Models, view models, views and the controller that ties them together,
//! plus the service layer that talks to the movie API.

pub mod commands;
pub mod controller;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod testing;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controller::AppController;
pub use events::*;
pub use models::*;
pub use services::*;
pub use view_models::*;
pub use views::{TerminalRenderer, ViewRenderer};

// Re-export specific items from commands to avoid conflicts
pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry};
