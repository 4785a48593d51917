//! # Application View Model
//!
//! Composition root of the view model layer. Owns the shell, the dashboard
//! and the movie list, tracks the active input mode, and turns the model
//! events of its children into bus notifications and redraw requests.

use super::dashboard::DashboardViewModel;
use super::movies::{MoviesSettings, MoviesViewModel};
use super::shell::ShellState;
use crate::app::events::{EventBus, InputMode, ModelEvent, Route, ViewEvent};
use crate::app::services::MovieSource;
use std::sync::Arc;

/// Type alias for event bus option to reduce complexity
type EventBusOption = Option<Box<dyn EventBus>>;

/// Longest number accepted in a year input box
pub const MAX_YEAR_INPUT_LEN: usize = 6;

pub struct AppViewModel<S: MovieSource> {
    shell: ShellState,
    dashboard: DashboardViewModel<S>,
    movies: MoviesViewModel<S>,
    input_mode: InputMode,
    input_buffer: String,
    terminal_size: (u16, u16),
    event_bus: EventBusOption,
    pending_view_events: Vec<ViewEvent>,
}

impl<S: MovieSource> AppViewModel<S> {
    pub fn new(source: Arc<S>, settings: MoviesSettings) -> Self {
        Self {
            shell: ShellState::new(),
            dashboard: DashboardViewModel::new(Arc::clone(&source)),
            movies: MoviesViewModel::new(source, settings),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            terminal_size: (80, 24),
            event_bus: None,
            pending_view_events: Vec::new(),
        }
    }

    pub fn set_event_bus(&mut self, event_bus: Box<dyn EventBus>) {
        self.event_bus = Some(event_bus);
    }

    /// Activate the initial screen
    pub fn start(&mut self) {
        self.activate(self.shell.route());
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    // === Accessors ===

    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    pub fn dashboard(&self) -> &DashboardViewModel<S> {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut DashboardViewModel<S> {
        &mut self.dashboard
    }

    pub fn movies(&self) -> &MoviesViewModel<S> {
        &self.movies
    }

    pub fn movies_mut(&mut self) -> &mut MoviesViewModel<S> {
        &mut self.movies
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.emit_view_event(ViewEvent::FullRedrawRequired);
    }

    // === Shell ===

    pub fn navigate(&mut self, route: Route) {
        if let Some(event) = self.shell.close_sidebar() {
            self.publish(event);
        }
        if let Some(event) = self.shell.navigate(route) {
            self.input_mode = InputMode::Normal;
            self.publish(event);
        }
        self.activate(route);
    }

    /// Navigate by path; returns false for unknown paths
    pub fn navigate_path(&mut self, path: &str) -> bool {
        match Route::resolve(path) {
            Some(route) => {
                self.navigate(route);
                true
            }
            None => {
                tracing::warn!("No route matches '{}'", path);
                false
            }
        }
    }

    pub fn toggle_sidebar(&mut self) {
        let event = self.shell.toggle_sidebar();
        self.publish(event);
    }

    pub fn close_sidebar(&mut self) {
        if let Some(event) = self.shell.close_sidebar() {
            self.publish(event);
        }
    }

    fn activate(&mut self, route: Route) {
        match route {
            Route::Dashboard => self.dashboard.load(),
            Route::Movies => self.movies.init(),
        }
    }

    // === Input editing ===

    /// Start editing a year box, seeded with its current value
    pub fn begin_input(&mut self, mode: InputMode) {
        let current = match mode {
            InputMode::Normal => None,
            InputMode::EditingFilterYear => self.movies.filter_year(),
            InputMode::EditingSearchYear => self.dashboard.search_year(),
        };
        self.input_mode = mode;
        self.input_buffer = current.map(|year| year.to_string()).unwrap_or_default();
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    pub fn end_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    /// Append a digit to the box being edited; other characters are ignored
    pub fn input_char(&mut self, ch: char) {
        if !self.input_mode.is_editing()
            || !ch.is_ascii_digit()
            || self.input_buffer.len() >= MAX_YEAR_INPUT_LEN
        {
            return;
        }
        self.input_buffer.push(ch);
        self.commit_input();
    }

    pub fn input_backspace(&mut self) {
        if !self.input_mode.is_editing() || self.input_buffer.pop().is_none() {
            return;
        }
        self.commit_input();
    }

    /// Finish editing; in the search box this also runs the search
    pub fn submit_input(&mut self) {
        if self.input_mode == InputMode::EditingSearchYear {
            self.dashboard.search_movies_by_year();
        }
        self.end_input();
    }

    fn commit_input(&mut self) {
        let value = self.input_buffer.parse::<i32>().ok();
        match self.input_mode {
            InputMode::EditingFilterYear => {
                self.movies.set_filter_year(value);
                self.movies.apply_filters();
            }
            InputMode::EditingSearchYear => self.dashboard.set_search_year(value),
            InputMode::Normal => {}
        }
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    // === Movie list shortcuts ===

    /// any -> winners only -> non-winners only -> any
    pub fn cycle_winner_filter(&mut self) {
        let next = match self.movies.filter_winner() {
            None => Some(true),
            Some(true) => Some(false),
            Some(false) => None,
        };
        self.movies.set_filter_winner(next);
        self.movies.apply_filters();
        self.emit_view_event(ViewEvent::StatusBarUpdateRequired);
    }

    /// Go to the `slot`-th page of the visible window (zero-based)
    pub fn go_to_visible_slot(&mut self, slot: usize) -> bool {
        match self.movies.visible_pages().get(slot) {
            Some(&page) => {
                self.movies.go_to_page(page);
                true
            }
            None => false,
        }
    }

    // === Event processing ===

    /// Apply ready results of the children; true when anything changed
    pub fn process_pending(&mut self) -> bool {
        let movies_changed = self.movies.process_pending();
        let dashboard_changed = self.dashboard.process_pending();
        self.flush_model_events();
        movies_changed || dashboard_changed
    }

    /// Take the redraw requests accumulated since the last call
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        self.flush_model_events();
        std::mem::take(&mut self.pending_view_events)
    }

    fn flush_model_events(&mut self) {
        let mut events = self.movies.take_model_events();
        events.extend(self.dashboard.take_model_events());
        for event in events {
            self.publish(event);
        }
    }

    fn publish(&mut self, event: ModelEvent) {
        self.emit_view_event(ViewEvent::for_model_event(&event));
        if let Some(bus) = self.event_bus.as_mut() {
            bus.publish_model_event(event);
        }
    }

    fn emit_view_event(&mut self, event: ViewEvent) {
        if !self.pending_view_events.contains(&event) {
            self.pending_view_events.push(event);
        }
    }
}
