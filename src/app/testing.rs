//! Testing infrastructure for view models
//!
//! Provides an in-memory [`MovieSource`] that records every request and can
//! be told to delay or fail responses, so view models can be exercised
//! without a network.

use crate::app::models::{
    Movie, MovieWinner, MoviesPage, PageIndex, Pageable, ProducerInterval,
    ProducerIntervalsResponse, Studio, StudiosResponse, YearWithMultipleWinners,
    YearsWithMultipleWinnersResponse,
};
use crate::app::services::{FetchError, MovieQuery, MovieSource};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn fake_failure(path: &str) -> FetchError {
    FetchError::Status {
        url: format!("fake://movies/{path}"),
        status: 500,
    }
}

/// Build a movie row
pub fn movie(id: i64, year: i32, title: &str, winner: bool) -> Movie {
    Movie {
        id,
        year,
        title: title.to_string(),
        studios: vec![format!("Studio {title}")],
        producers: vec![format!("Producer {title}")],
        winner,
    }
}

/// Build a page response with the given content and totals
pub fn movies_page(
    content: Vec<Movie>,
    page: PageIndex,
    total_pages: PageIndex,
    total_elements: u64,
) -> MoviesPage {
    MoviesPage {
        content,
        pageable: Pageable {
            page_number: page,
            page_size: 15,
        },
        total_pages,
        total_elements,
        first: page == 0,
        last: page == total_pages - 1,
        number: page,
        size: 15,
    }
}

/// Three movies on page 0 of 3, 45 in total
pub fn sample_page() -> MoviesPage {
    movies_page(
        vec![
            movie(1, 1980, "Movie A", true),
            movie(2, 1981, "Movie B", false),
            movie(3, 1982, "Movie C", true),
        ],
        0,
        3,
        45,
    )
}

/// In-memory movie source with scripted responses
pub struct FakeMovieSource {
    default_page: Mutex<MoviesPage>,
    pages: Mutex<HashMap<PageIndex, MoviesPage>>,
    delays: Mutex<HashMap<PageIndex, Duration>>,
    fail_movies: AtomicBool,
    fail_dashboard: AtomicBool,
    queries: Mutex<Vec<MovieQuery>>,
    winner_years: Mutex<Vec<i32>>,
    years: Mutex<Vec<YearWithMultipleWinners>>,
    studios: Mutex<Vec<Studio>>,
    intervals: Mutex<ProducerIntervalsResponse>,
    winners: Mutex<Vec<MovieWinner>>,
}

impl FakeMovieSource {
    pub fn new() -> Self {
        Self {
            default_page: Mutex::new(sample_page()),
            pages: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            fail_movies: AtomicBool::new(false),
            fail_dashboard: AtomicBool::new(false),
            queries: Mutex::new(Vec::new()),
            winner_years: Mutex::new(Vec::new()),
            years: Mutex::new(vec![
                YearWithMultipleWinners {
                    year: 1980,
                    winner_count: 2,
                },
                YearWithMultipleWinners {
                    year: 1990,
                    winner_count: 3,
                },
            ]),
            studios: Mutex::new(
                [("Studio A", 10), ("Studio B", 8), ("Studio C", 6), ("Studio D", 4)]
                    .into_iter()
                    .map(|(name, win_count)| Studio {
                        name: name.to_string(),
                        win_count,
                    })
                    .collect(),
            ),
            intervals: Mutex::new(ProducerIntervalsResponse {
                min: vec![ProducerInterval {
                    producer: "Min P".to_string(),
                    interval: 1,
                    previous_win: 1989,
                    following_win: 1990,
                }],
                max: vec![ProducerInterval {
                    producer: "Max P".to_string(),
                    interval: 10,
                    previous_win: 1980,
                    following_win: 1990,
                }],
            }),
            winners: Mutex::new(vec![
                MovieWinner {
                    id: 1,
                    year: 2000,
                    title: "Winner 1".to_string(),
                },
                MovieWinner {
                    id: 2,
                    year: 2000,
                    title: "Winner 2".to_string(),
                },
            ]),
        }
    }

    /// Response for every page without a page-specific override
    pub fn set_default_page(&self, page: MoviesPage) {
        *lock(&self.default_page) = page;
    }

    /// Response for one page index
    pub fn set_page(&self, index: PageIndex, page: MoviesPage) {
        lock(&self.pages).insert(index, page);
    }

    /// Hold the response for `index` back for `delay`
    pub fn set_delay(&self, index: PageIndex, delay: Duration) {
        lock(&self.delays).insert(index, delay);
    }

    pub fn set_fail_movies(&self, fail: bool) {
        self.fail_movies.store(fail, Ordering::SeqCst);
    }

    /// Make every dashboard endpoint fail
    pub fn set_fail_dashboard(&self, fail: bool) {
        self.fail_dashboard.store(fail, Ordering::SeqCst);
    }

    pub fn set_studios(&self, studios: Vec<Studio>) {
        *lock(&self.studios) = studios;
    }

    /// Every movie list query received so far
    pub fn queries(&self) -> Vec<MovieQuery> {
        lock(&self.queries).clone()
    }

    pub fn clear_queries(&self) {
        lock(&self.queries).clear();
    }

    /// Years passed to the winners-by-year lookup so far
    pub fn winner_years(&self) -> Vec<i32> {
        lock(&self.winner_years).clone()
    }

    fn dashboard_result<T>(&self, path: &str, value: T) -> Result<T, FetchError> {
        if self.fail_dashboard.load(Ordering::SeqCst) {
            Err(fake_failure(path))
        } else {
            Ok(value)
        }
    }
}

impl Default for FakeMovieSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieSource for FakeMovieSource {
    fn fetch_movies(
        &self,
        query: MovieQuery,
    ) -> impl Future<Output = Result<MoviesPage, FetchError>> + Send {
        lock(&self.queries).push(query);
        let delay = lock(&self.delays).get(&query.page).copied();
        let override_page = lock(&self.pages).get(&query.page).cloned();

        let result = if self.fail_movies.load(Ordering::SeqCst) {
            Err(fake_failure(&format!("?page={}", query.page)))
        } else {
            Ok(override_page.unwrap_or_else(|| lock(&self.default_page).clone()))
        };

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }

    fn fetch_years_with_multiple_winners(
        &self,
    ) -> impl Future<Output = Result<YearsWithMultipleWinnersResponse, FetchError>> + Send {
        let years = lock(&self.years).clone();
        let result = self.dashboard_result(
            "yearsWithMultipleWinners",
            YearsWithMultipleWinnersResponse { years },
        );
        async move { result }
    }

    fn fetch_studio_win_counts(
        &self,
    ) -> impl Future<Output = Result<StudiosResponse, FetchError>> + Send {
        let studios = lock(&self.studios).clone();
        let result = self.dashboard_result("studiosWithWinCount", StudiosResponse { studios });
        async move { result }
    }

    fn fetch_producer_intervals(
        &self,
    ) -> impl Future<Output = Result<ProducerIntervalsResponse, FetchError>> + Send {
        let intervals = lock(&self.intervals).clone();
        let result = self.dashboard_result("maxMinWinIntervalForProducers", intervals);
        async move { result }
    }

    fn fetch_winners_by_year(
        &self,
        year: i32,
    ) -> impl Future<Output = Result<Vec<MovieWinner>, FetchError>> + Send {
        lock(&self.winner_years).push(year);
        let winners = lock(&self.winners).clone();
        let result = self.dashboard_result(&format!("?year={year}"), winners);
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_source_should_record_queries() {
        let source = FakeMovieSource::new();
        let query = MovieQuery::new(2, 15).with_year(Some(1990));

        let page = source.fetch_movies(query).await.unwrap();

        assert_eq!(page, sample_page());
        assert_eq!(source.queries(), vec![query]);
        source.clear_queries();
        assert!(source.queries().is_empty());
    }

    #[tokio::test]
    async fn fake_source_should_serve_page_overrides_and_failures() {
        let source = FakeMovieSource::new();
        let second = movies_page(vec![movie(9, 1999, "Movie Z", false)], 1, 3, 45);
        source.set_page(1, second.clone());

        assert_eq!(source.fetch_movies(MovieQuery::new(1, 15)).await.unwrap(), second);

        source.set_fail_movies(true);
        assert!(source.fetch_movies(MovieQuery::new(1, 15)).await.is_err());
    }
}
