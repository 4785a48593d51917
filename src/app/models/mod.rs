//! # Models Module
//!
//! Plain data owned by the view models: API payloads, filter intents and
//! pagination state. Nothing here performs I/O.

pub mod filter;
pub mod movie;
pub mod pagination;

pub use filter::{digit_count, FilterIntent, MIN_YEAR_DIGITS};
pub use movie::{
    Movie, MovieWinner, MoviesPage, PageIndex, Pageable, ProducerInterval,
    ProducerIntervalsResponse, Studio, StudiosResponse, YearWithMultipleWinners,
    YearsWithMultipleWinnersResponse,
};
pub use pagination::{visible_pages, Pagination, VISIBLE_WINDOW};
