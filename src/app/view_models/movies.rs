//! # Movies View Model
//!
//! State behind the paginated, filterable movie list: the displayed page,
//! the loading flag, pagination, and the two raw filter fields.
//!
//! Fetches run as spawned tasks and report back through a channel, so every
//! navigation returns immediately. Nothing sequences or cancels in-flight
//! fetches: whichever response arrives last is the one displayed.

use super::filter_debounce::{FilterDebouncer, DEFAULT_QUIET_PERIOD};
use crate::app::events::ModelEvent;
use crate::app::models::{FilterIntent, Movie, MoviesPage, PageIndex, Pagination};
use crate::app::services::{FetchError, MovieQuery, MovieSource, DEFAULT_PAGE_SIZE};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Tunables of the movie list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoviesSettings {
    pub page_size: u32,
    pub quiet_period: Duration,
}

impl Default for MoviesSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

/// Result of one spawned fetch, tagged with the query that produced it
#[derive(Debug)]
struct FetchCompletion {
    query: MovieQuery,
    result: Result<MoviesPage, FetchError>,
}

pub struct MoviesViewModel<S: MovieSource> {
    source: Arc<S>,
    settings: MoviesSettings,
    movies: Vec<Movie>,
    loading: bool,
    pagination: Pagination,
    total_elements: u64,
    filter_year: Option<i32>,
    filter_winner: Option<bool>,
    debouncer: FilterDebouncer,
    completion_sender: mpsc::UnboundedSender<FetchCompletion>,
    completion_receiver: mpsc::UnboundedReceiver<FetchCompletion>,
    in_flight: usize,
    initialized: bool,
    model_events: Vec<ModelEvent>,
}

impl<S: MovieSource> MoviesViewModel<S> {
    pub fn new(source: Arc<S>, settings: MoviesSettings) -> Self {
        let (completion_sender, completion_receiver) = mpsc::unbounded_channel();
        Self {
            source,
            settings,
            movies: Vec::new(),
            loading: false,
            pagination: Pagination::default(),
            total_elements: 0,
            filter_year: None,
            filter_winner: None,
            debouncer: FilterDebouncer::new(settings.quiet_period),
            completion_sender,
            completion_receiver,
            in_flight: 0,
            initialized: false,
            model_events: Vec::new(),
        }
    }

    /// First load: page 0, no filters. Later calls do nothing, so
    /// returning to the list keeps its page, filters and rows.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        tracing::debug!("Initializing movie list");
        self.load_movies();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // === Filters ===

    pub fn set_filter_year(&mut self, year: Option<i32>) {
        self.filter_year = year;
    }

    pub fn set_filter_winner(&mut self, winner: Option<bool>) {
        self.filter_winner = winner;
    }

    pub fn filter_year(&self) -> Option<i32> {
        self.filter_year
    }

    pub fn filter_winner(&self) -> Option<bool> {
        self.filter_winner
    }

    /// Push the current filter fields into the debounce pipeline
    ///
    /// Neither fetches nor touches pagination; the reload happens once the
    /// intent settles.
    pub fn apply_filters(&mut self) {
        self.debouncer
            .on_filter_changed(FilterIntent::new(self.filter_year, self.filter_winner));
    }

    // === Navigation ===

    /// Jump to `page` without a bounds check
    pub fn go_to_page(&mut self, page: PageIndex) {
        let old_page = self.pagination.current_page();
        self.pagination.go_to(page);
        self.record_page_change(old_page);
        self.load_movies();
    }

    /// Returns false (and fetches nothing) on the last page
    pub fn next_page(&mut self) -> bool {
        let old_page = self.pagination.current_page();
        if !self.pagination.next() {
            return false;
        }
        self.record_page_change(old_page);
        self.load_movies();
        true
    }

    /// Returns false (and fetches nothing) on the first page
    pub fn previous_page(&mut self) -> bool {
        let old_page = self.pagination.current_page();
        if !self.pagination.previous() {
            return false;
        }
        self.record_page_change(old_page);
        self.load_movies();
        true
    }

    pub fn go_to_first_page(&mut self) {
        let old_page = self.pagination.current_page();
        self.pagination.first();
        self.record_page_change(old_page);
        self.load_movies();
    }

    /// Jump to the last known page; with zero pages this requests page -1
    pub fn go_to_last_page(&mut self) {
        let old_page = self.pagination.current_page();
        self.pagination.last();
        self.record_page_change(old_page);
        self.load_movies();
    }

    pub fn visible_pages(&self) -> Vec<PageIndex> {
        self.pagination.visible_pages()
    }

    // === State access ===

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_page(&self) -> PageIndex {
        self.pagination.current_page()
    }

    pub fn total_pages(&self) -> PageIndex {
        self.pagination.total_pages()
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn page_size(&self) -> u32 {
        self.settings.page_size
    }

    /// Fetches spawned but not yet applied
    pub fn in_flight_fetches(&self) -> usize {
        self.in_flight
    }

    /// Whether a filter edit is waiting for its quiet period
    pub fn has_pending_filter(&self) -> bool {
        self.debouncer.has_pending()
    }

    /// Drain model events recorded since the last call
    pub fn take_model_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.model_events)
    }

    // === Event processing ===

    /// Apply every settled filter and finished fetch that is ready
    ///
    /// Returns true when state changed.
    pub fn process_pending(&mut self) -> bool {
        let mut changed = false;

        while let Some(intent) = self.debouncer.poll_settled() {
            self.on_filter_settled(intent);
            changed = true;
        }

        while let Ok(completion) = self.completion_receiver.try_recv() {
            self.apply_completion(completion);
            changed = true;
        }

        changed
    }

    /// Wait for the next fetch to finish and apply it
    ///
    /// Returns false immediately when nothing is in flight.
    pub async fn wait_for_fetch(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.completion_receiver.recv().await {
            Some(completion) => {
                self.apply_completion(completion);
                true
            }
            None => false,
        }
    }

    /// Wait for the next settled filter intent and act on it
    pub async fn wait_for_settled_filter(&mut self) -> Option<FilterIntent> {
        let intent = self.debouncer.next_settled().await?;
        self.on_filter_settled(intent);
        Some(intent)
    }

    fn on_filter_settled(&mut self, intent: FilterIntent) {
        // The distinct marker is not rolled back here: a short year still
        // counts as the last emitted intent.
        if intent.has_incomplete_year() {
            tracing::debug!("Ignoring filter with incomplete year: {:?}", intent);
            self.model_events
                .push(ModelEvent::FilterDiscarded { intent });
            return;
        }

        tracing::debug!("Filter settled: {:?}", intent);
        self.model_events.push(ModelEvent::FilterSettled { intent });

        let old_page = self.pagination.current_page();
        self.pagination.first();
        self.record_page_change(old_page);
        self.load_movies();
    }

    fn record_page_change(&mut self, old_page: PageIndex) {
        let new_page = self.pagination.current_page();
        if old_page != new_page {
            self.model_events
                .push(ModelEvent::PageChanged { old_page, new_page });
        }
    }

    fn load_movies(&mut self) {
        self.loading = true;

        let query = MovieQuery::new(self.pagination.current_page(), self.settings.page_size)
            .with_year(self.filter_year)
            .with_winner(self.filter_winner);
        tracing::debug!("Loading movies: {:?}", query);
        self.model_events
            .push(ModelEvent::MoviesLoadingStarted { query });

        self.in_flight += 1;
        let source = Arc::clone(&self.source);
        let sender = self.completion_sender.clone();
        tokio::spawn(async move {
            let result = source.fetch_movies(query).await;
            // Receiver is owned by the view model; ignore send errors after drop
            let _ = sender.send(FetchCompletion { query, result });
        });
    }

    fn apply_completion(&mut self, completion: FetchCompletion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = false;

        match completion.result {
            Ok(page) => {
                tracing::debug!(
                    "Loaded page {} ({} movies, {} pages, {} total)",
                    completion.query.page,
                    page.content.len(),
                    page.total_pages,
                    page.total_elements
                );
                self.pagination.set_total_pages(page.total_pages);
                self.total_elements = page.total_elements;
                self.model_events.push(ModelEvent::MoviesLoaded {
                    page: completion.query.page,
                    total_pages: page.total_pages,
                    total_elements: page.total_elements,
                    count: page.content.len(),
                });
                self.movies = page.content;
            }
            Err(error) => {
                // Totals stay as they were; only the list is cleared
                tracing::error!("Error loading movies: {}", error);
                self.movies.clear();
                self.model_events.push(ModelEvent::MoviesLoadFailed {
                    message: error.to_string(),
                });
            }
        }
    }
}
