//! # Movie Service
//!
//! Gateway to the read-only movie API. Builds query parameters, issues GET
//! requests and decodes the JSON payloads. Failures are returned as
//! [`FetchError`]; nothing is retried.

use super::error::FetchError;
use crate::app::models::{
    MovieWinner, MoviesPage, PageIndex, ProducerIntervalsResponse, StudiosResponse,
    YearsWithMultipleWinnersResponse,
};
use serde::de::DeserializeOwned;
use std::future::Future;

/// Public movie API used when no profile overrides it
pub const DEFAULT_API_BASE_URL: &str = "https://challenge.outsera.tech/api/movies";

/// Items requested per movie list page
pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Page index sent by the winners-by-year lookup
pub const WINNERS_BY_YEAR_PAGE: PageIndex = 9;

/// Oversized page meant to hold every winner of a year in one response.
/// Larger result sets are truncated; further pages are never requested.
pub const WINNERS_BY_YEAR_SIZE: u32 = 99;

/// Type alias for query string pairs in the order they are sent
pub type QueryPairs = Vec<(&'static str, String)>;

/// Parameters of a movie list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieQuery {
    pub page: PageIndex,
    pub size: u32,
    pub year: Option<i32>,
    pub winner: Option<bool>,
}

impl MovieQuery {
    pub fn new(page: PageIndex, size: u32) -> Self {
        Self {
            page,
            size,
            year: None,
            winner: None,
        }
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_winner(mut self, winner: Option<bool>) -> Self {
        self.winner = winner;
        self
    }

    /// Query string pairs: `page` and `size` always, `year` and `winner`
    /// only when set
    pub fn query_pairs(&self) -> QueryPairs {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(year) = self.year {
            pairs.push(("year", year.to_string()));
        }
        if let Some(winner) = self.winner {
            pairs.push(("winner", winner.to_string()));
        }
        pairs
    }
}

impl Default for MovieQuery {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// Read operations the view models need from the movie API
///
/// Implemented by [`MovieService`] for the real API and by
/// `FakeMovieSource` in tests.
pub trait MovieSource: Send + Sync + 'static {
    /// One page of the movie list
    fn fetch_movies(
        &self,
        query: MovieQuery,
    ) -> impl Future<Output = Result<MoviesPage, FetchError>> + Send;

    fn fetch_years_with_multiple_winners(
        &self,
    ) -> impl Future<Output = Result<YearsWithMultipleWinnersResponse, FetchError>> + Send;

    fn fetch_studio_win_counts(
        &self,
    ) -> impl Future<Output = Result<StudiosResponse, FetchError>> + Send;

    fn fetch_producer_intervals(
        &self,
    ) -> impl Future<Output = Result<ProducerIntervalsResponse, FetchError>> + Send;

    /// Winners of `year`, looked up through a single oversized page
    fn fetch_winners_by_year(
        &self,
        year: i32,
    ) -> impl Future<Output = Result<Vec<MovieWinner>, FetchError>> + Send;
}

/// HTTP implementation of [`MovieSource`]
#[derive(Debug, Clone)]
pub struct MovieService {
    client: reqwest::Client,
    base_url: String,
}

impl MovieService {
    /// Create a service for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("Creating MovieService for {}", base_url);
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: QueryPairs,
    ) -> Result<T, FetchError> {
        let endpoint = self.endpoint(path);
        let mut builder = self.client.get(&endpoint);
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        let request = builder.build().map_err(|source| FetchError::Transport {
            url: endpoint.clone(),
            source,
        })?;
        let url = request.url().to_string();
        tracing::debug!("GET {}", url);

        let response =
            self.client
                .execute(request)
                .await
                .map_err(|source| FetchError::Transport {
                    url: url.clone(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        tracing::debug!("{} returned {} bytes", url, body.len());

        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

impl Default for MovieService {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl MovieSource for MovieService {
    fn fetch_movies(
        &self,
        query: MovieQuery,
    ) -> impl Future<Output = Result<MoviesPage, FetchError>> + Send {
        self.get_json("", query.query_pairs())
    }

    fn fetch_years_with_multiple_winners(
        &self,
    ) -> impl Future<Output = Result<YearsWithMultipleWinnersResponse, FetchError>> + Send {
        self.get_json("yearsWithMultipleWinners", Vec::new())
    }

    fn fetch_studio_win_counts(
        &self,
    ) -> impl Future<Output = Result<StudiosResponse, FetchError>> + Send {
        self.get_json("studiosWithWinCount", Vec::new())
    }

    fn fetch_producer_intervals(
        &self,
    ) -> impl Future<Output = Result<ProducerIntervalsResponse, FetchError>> + Send {
        self.get_json("maxMinWinIntervalForProducers", Vec::new())
    }

    fn fetch_winners_by_year(
        &self,
        year: i32,
    ) -> impl Future<Output = Result<Vec<MovieWinner>, FetchError>> + Send {
        self.get_json("", winners_by_year_pairs(year))
    }
}

/// Query pairs of the winners-by-year lookup, in wire order
pub fn winners_by_year_pairs(year: i32) -> QueryPairs {
    vec![
        ("page", WINNERS_BY_YEAR_PAGE.to_string()),
        ("size", WINNERS_BY_YEAR_SIZE.to_string()),
        ("winner", "true".to_string()),
        ("year", year.to_string()),
    ]
}
