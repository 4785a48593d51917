//! # Dashboard View Model
//!
//! Aggregate statistics shown on the landing screen plus the winners-by-year
//! search. Each section loads independently; a failing section is logged and
//! shown empty while the others carry on.

use crate::app::events::{DashboardSection, ModelEvent};
use crate::app::models::{
    MovieWinner, ProducerInterval, ProducerIntervalsResponse, Studio, StudiosResponse,
    YearWithMultipleWinners, YearsWithMultipleWinnersResponse,
};
use crate::app::services::{FetchError, MovieSource};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Studios listed in the "top studios" table
pub const TOP_STUDIOS: usize = 3;

#[derive(Debug)]
enum DashboardUpdate {
    Years(Result<YearsWithMultipleWinnersResponse, FetchError>),
    Studios(Result<StudiosResponse, FetchError>),
    Intervals(Result<ProducerIntervalsResponse, FetchError>),
    Winners {
        year: i32,
        result: Result<Vec<MovieWinner>, FetchError>,
    },
}

pub struct DashboardViewModel<S: MovieSource> {
    source: Arc<S>,
    multiple_winner_years: Vec<YearWithMultipleWinners>,
    top_studios: Vec<Studio>,
    max_interval_producers: Vec<ProducerInterval>,
    min_interval_producers: Vec<ProducerInterval>,
    search_results: Vec<MovieWinner>,
    search_performed: bool,
    search_year: Option<i32>,
    update_sender: mpsc::UnboundedSender<DashboardUpdate>,
    update_receiver: mpsc::UnboundedReceiver<DashboardUpdate>,
    in_flight: usize,
    loaded: bool,
    model_events: Vec<ModelEvent>,
}

impl<S: MovieSource> DashboardViewModel<S> {
    pub fn new(source: Arc<S>) -> Self {
        let (update_sender, update_receiver) = mpsc::unbounded_channel();
        Self {
            source,
            multiple_winner_years: Vec::new(),
            top_studios: Vec::new(),
            max_interval_producers: Vec::new(),
            min_interval_producers: Vec::new(),
            search_results: Vec::new(),
            search_performed: false,
            search_year: None,
            update_sender,
            update_receiver,
            in_flight: 0,
            loaded: false,
            model_events: Vec::new(),
        }
    }

    /// Request the three aggregate sections. Later calls do nothing, so
    /// revisiting the dashboard shows the sections loaded at startup.
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        tracing::debug!("Loading dashboard sections");

        self.spawn(|source| async move {
            DashboardUpdate::Years(source.fetch_years_with_multiple_winners().await)
        });
        self.spawn(|source| async move {
            DashboardUpdate::Studios(source.fetch_studio_win_counts().await)
        });
        self.spawn(|source| async move {
            DashboardUpdate::Intervals(source.fetch_producer_intervals().await)
        });
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_search_year(&mut self, year: Option<i32>) {
        self.search_year = year;
    }

    pub fn search_year(&self) -> Option<i32> {
        self.search_year
    }

    /// Look up the winners of the search year
    ///
    /// An unset (or zero) year resets the search instead of fetching.
    pub fn search_movies_by_year(&mut self) {
        let year = match self.search_year {
            Some(year) if year != 0 => year,
            _ => {
                self.search_results.clear();
                self.search_performed = false;
                return;
            }
        };

        tracing::debug!("Searching winners of {}", year);
        self.spawn(move |source| async move {
            DashboardUpdate::Winners {
                year,
                result: source.fetch_winners_by_year(year).await,
            }
        });
    }

    pub fn multiple_winner_years(&self) -> &[YearWithMultipleWinners] {
        &self.multiple_winner_years
    }

    pub fn top_studios(&self) -> &[Studio] {
        &self.top_studios
    }

    pub fn max_interval_producers(&self) -> &[ProducerInterval] {
        &self.max_interval_producers
    }

    pub fn min_interval_producers(&self) -> &[ProducerInterval] {
        &self.min_interval_producers
    }

    pub fn search_results(&self) -> &[MovieWinner] {
        &self.search_results
    }

    pub fn search_performed(&self) -> bool {
        self.search_performed
    }

    pub fn in_flight_requests(&self) -> usize {
        self.in_flight
    }

    pub fn take_model_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.model_events)
    }

    /// Apply every update that has arrived; true when state changed
    pub fn process_pending(&mut self) -> bool {
        let mut changed = false;
        while let Ok(update) = self.update_receiver.try_recv() {
            self.apply(update);
            changed = true;
        }
        changed
    }

    /// Wait for the next update and apply it; false when nothing is pending
    pub async fn wait_for_update(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.update_receiver.recv().await {
            Some(update) => {
                self.apply(update);
                true
            }
            None => false,
        }
    }

    /// Wait until every issued request has been applied
    pub async fn wait_until_idle(&mut self) {
        while self.wait_for_update().await {}
    }

    fn spawn<F, Fut>(&mut self, request: F)
    where
        F: FnOnce(Arc<S>) -> Fut,
        Fut: std::future::Future<Output = DashboardUpdate> + Send + 'static,
    {
        self.in_flight += 1;
        let sender = self.update_sender.clone();
        let future = request(Arc::clone(&self.source));
        tokio::spawn(async move {
            let _ = sender.send(future.await);
        });
    }

    fn apply(&mut self, update: DashboardUpdate) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match update {
            DashboardUpdate::Years(result) => {
                self.multiple_winner_years = self
                    .section_result(DashboardSection::MultipleWinnerYears, result, |r| r.years.len())
                    .map(|r| r.years)
                    .unwrap_or_default();
            }
            DashboardUpdate::Studios(result) => {
                self.top_studios = self
                    .section_result(DashboardSection::TopStudios, result, |r| {
                        r.studios.len().min(TOP_STUDIOS)
                    })
                    .map(|r| r.studios.into_iter().take(TOP_STUDIOS).collect())
                    .unwrap_or_default();
            }
            DashboardUpdate::Intervals(result) => {
                let intervals = self
                    .section_result(DashboardSection::ProducerIntervals, result, |r| {
                        r.min.len() + r.max.len()
                    })
                    .unwrap_or_default();
                self.max_interval_producers = intervals.max;
                self.min_interval_producers = intervals.min;
            }
            DashboardUpdate::Winners { year, result } => {
                tracing::debug!("Winners of {} arrived", year);
                self.search_results = self
                    .section_result(DashboardSection::WinnersByYear, result, Vec::len)
                    .unwrap_or_default();
                self.search_performed = true;
            }
        }
    }

    /// Log and record the outcome of one section; failures become `None`
    fn section_result<T>(
        &mut self,
        section: DashboardSection,
        result: Result<T, FetchError>,
        count: impl FnOnce(&T) -> usize,
    ) -> Option<T> {
        match result {
            Ok(value) => {
                let count = count(&value);
                tracing::debug!("Dashboard section {:?} loaded ({} rows)", section, count);
                self.model_events
                    .push(ModelEvent::DashboardSectionLoaded { section, count });
                Some(value)
            }
            Err(error) => {
                tracing::error!("Error loading dashboard section {:?}: {}", section, error);
                self.model_events.push(ModelEvent::DashboardSectionFailed {
                    section,
                    message: error.to_string(),
                });
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::FakeMovieSource;

    async fn loaded_dashboard(source: Arc<FakeMovieSource>) -> DashboardViewModel<FakeMovieSource> {
        let mut dashboard = DashboardViewModel::new(source);
        dashboard.load();
        dashboard.wait_until_idle().await;
        dashboard
    }

    #[tokio::test]
    async fn load_should_fill_every_section() {
        let dashboard = loaded_dashboard(Arc::new(FakeMovieSource::new())).await;

        assert_eq!(dashboard.multiple_winner_years().len(), 2);
        assert_eq!(dashboard.multiple_winner_years()[0].year, 1980);
        assert_eq!(dashboard.max_interval_producers()[0].producer, "Max P");
        assert_eq!(dashboard.min_interval_producers()[0].producer, "Min P");
    }

    #[tokio::test]
    async fn load_should_keep_only_top_three_studios() {
        let dashboard = loaded_dashboard(Arc::new(FakeMovieSource::new())).await;

        let names: Vec<&str> = dashboard
            .top_studios()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Studio A", "Studio B", "Studio C"]);
    }

    #[tokio::test]
    async fn fewer_than_three_studios_should_be_kept_as_is() {
        let source = Arc::new(FakeMovieSource::new());
        source.set_studios(vec![Studio {
            name: "Only".to_string(),
            win_count: 1,
        }]);

        let dashboard = loaded_dashboard(source).await;
        assert_eq!(dashboard.top_studios().len(), 1);
    }

    #[tokio::test]
    async fn failing_sections_should_be_empty() {
        let source = Arc::new(FakeMovieSource::new());
        source.set_fail_dashboard(true);

        let mut dashboard = loaded_dashboard(source).await;

        assert!(dashboard.multiple_winner_years().is_empty());
        assert!(dashboard.top_studios().is_empty());
        assert!(dashboard.max_interval_producers().is_empty());
        assert!(dashboard.min_interval_producers().is_empty());
        let failures = dashboard
            .take_model_events()
            .into_iter()
            .filter(|e| matches!(e, ModelEvent::DashboardSectionFailed { .. }))
            .count();
        assert_eq!(failures, 3);
    }

    #[tokio::test]
    async fn load_should_only_run_once() {
        let mut dashboard = loaded_dashboard(Arc::new(FakeMovieSource::new())).await;
        dashboard.load();
        assert_eq!(dashboard.in_flight_requests(), 0);
    }

    #[tokio::test]
    async fn search_without_year_should_reset_results() {
        let source = Arc::new(FakeMovieSource::new());
        let mut dashboard = loaded_dashboard(source.clone()).await;
        dashboard.set_search_year(Some(2000));
        dashboard.search_movies_by_year();
        dashboard.wait_until_idle().await;
        assert!(dashboard.search_performed());

        dashboard.set_search_year(None);
        dashboard.search_movies_by_year();

        assert!(dashboard.search_results().is_empty());
        assert!(!dashboard.search_performed());
        assert_eq!(dashboard.in_flight_requests(), 0);
        assert_eq!(source.winner_years(), vec![2000]);
    }

    #[tokio::test]
    async fn search_with_zero_year_should_not_fetch() {
        let source = Arc::new(FakeMovieSource::new());
        let mut dashboard = DashboardViewModel::new(source.clone());
        dashboard.set_search_year(Some(0));
        dashboard.search_movies_by_year();

        assert!(!dashboard.search_performed());
        assert!(source.winner_years().is_empty());
    }

    #[tokio::test]
    async fn search_should_store_winners() {
        let source = Arc::new(FakeMovieSource::new());
        let mut dashboard = DashboardViewModel::new(source.clone());
        dashboard.set_search_year(Some(2000));

        dashboard.search_movies_by_year();
        assert!(dashboard.wait_for_update().await);

        assert_eq!(source.winner_years(), vec![2000]);
        assert_eq!(dashboard.search_results().len(), 2);
        assert_eq!(dashboard.search_results()[0].title, "Winner 1");
        assert!(dashboard.search_performed());
    }

    #[tokio::test]
    async fn failed_search_should_still_mark_search_performed() {
        let source = Arc::new(FakeMovieSource::new());
        source.set_fail_dashboard(true);
        let mut dashboard = DashboardViewModel::new(source);
        dashboard.set_search_year(Some(1999));

        dashboard.search_movies_by_year();
        dashboard.wait_for_update().await;

        assert!(dashboard.search_results().is_empty());
        assert!(dashboard.search_performed());
    }
}
