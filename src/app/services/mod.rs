//! # Services Layer
//!
//! Services wrap external resources. The only external resource of this
//! application is the remote movie API.

pub mod error;
pub mod movie_service;

pub use error::FetchError;
pub use movie_service::{
    winners_by_year_pairs, MovieQuery, MovieService, MovieSource, QueryPairs,
    DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, WINNERS_BY_YEAR_PAGE, WINNERS_BY_YEAR_SIZE,
};
