//! # raspberry-awards - Terminal Dashboard for the Golden Raspberry Awards
//!
//! Browses the Golden Raspberry Awards movie API from the terminal: a
//! dashboard of aggregate statistics and a paginated, filterable movie list.
//!
//! ## Architecture
//!
//! This application follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐    Fetches   ┌─────────────┐
//! │    View     │◄─────────────│  ViewModel   │─────────────►│  Services   │
//! │             │              │              │◄─────────────│             │
//! │ - Terminal  │              │ - Filters    │   Results    │ - Movie API │
//! │ - Rendering │              │ - Pagination │              │             │
//! └─────────────┘              └──────────────┘              └─────────────┘
//!                                      ▲
//!                                      │ Commands
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  Controller  │
//!                               │              │
//!                               │ - Key        │
//!                               │   Mapping    │
//!                               │ - Event Loop │
//!                               └──────────────┘
//! ```

pub mod app;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use app::*;
