//! # Views Module
//!
//! Everything that draws to the terminal.

pub mod ansi_escape_codes;
pub mod layout;
pub mod terminal_renderer;

pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
