//! # ViewModel Module
//!
//! Screen state and presentation logic, split by screen. [`AppViewModel`]
//! composes the others and is the only one the controller talks to.

pub mod app;
pub mod dashboard;
pub mod filter_debounce;
pub mod movies;
pub mod shell;

pub use app::{AppViewModel, MAX_YEAR_INPUT_LEN};
pub use dashboard::{DashboardViewModel, TOP_STUDIOS};
pub use filter_debounce::{FilterDebouncer, DEFAULT_QUIET_PERIOD};
pub use movies::{MoviesSettings, MoviesViewModel};
pub use shell::{ShellState, APP_TITLE};
