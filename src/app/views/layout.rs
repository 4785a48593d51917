//! # Screen Layout
//!
//! Pure functions that turn view model state into lines of text. The
//! renderer only positions and styles what these produce, which keeps the
//! screen contents testable without a terminal.

use crate::app::events::{InputMode, Route};
use crate::app::models::Movie;
use crate::app::services::MovieSource;
use crate::app::view_models::{AppViewModel, DashboardViewModel, MoviesViewModel, ShellState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns taken by the open sidebar, separator included
pub const SIDEBAR_WIDTH: usize = 16;

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_MOVIES_TEXT: &str = "No movies found";

/// How a line is emphasised on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Title,
    Muted,
}

/// One line of screen content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: LineStyle,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Plain,
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Title,
        }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Muted,
        }
    }

    pub fn blank() -> Self {
        Self::plain("")
    }
}

/// Display width of text, ignoring ANSI escape sequences
pub fn visual_length(text: &str) -> usize {
    let mut length = 0;
    let mut in_escape = false;

    for ch in text.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape && ch == 'm' {
            in_escape = false;
        } else if !in_escape {
            length += ch.width().unwrap_or(0);
        }
    }

    length
}

/// Truncate or pad `text` to exactly `width` display columns
pub fn fit(text: &str, width: usize) -> String {
    let mut fitted = String::new();
    let mut used = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width {
            break;
        }
        fitted.push(ch);
        used += ch_width;
    }

    fitted.push_str(&" ".repeat(width - used));
    fitted
}

/// Place `right` flush against the right edge of a `width`-wide line
pub fn spread(left: &str, right: &str, width: usize) -> String {
    let right_width = right.width();
    if right_width >= width {
        return fit(right, width);
    }
    format!("{}{}", fit(left, width - right_width), right)
}

fn columns(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| fit(cell, *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn winner_filter_label(winner: Option<bool>) -> &'static str {
    match winner {
        None => "Any",
        Some(value) => yes_no(value),
    }
}

/// Text of a year box: the live buffer while editing, else the stored value
fn year_box(editing: bool, buffer: &str, value: Option<i32>) -> String {
    if editing {
        format!("[{buffer}_]")
    } else {
        format!("[{}]", value.map(|y| y.to_string()).unwrap_or_default())
    }
}

// === Chrome ===

pub fn header_line(shell: &ShellState, width: usize) -> String {
    let left = format!(" {} | {}", shell.title(), shell.route().title());
    spread(&left, "Tab menu ", width)
}

pub fn sidebar_lines(shell: &ShellState) -> Vec<Line> {
    let mut lines = vec![Line::muted(" Menu"), Line::blank()];
    for route in Route::all() {
        let marker = if route == shell.route() { '>' } else { ' ' };
        let key = match route {
            Route::Dashboard => 'd',
            Route::Movies => 'm',
        };
        lines.push(Line::plain(format!("{marker} {} ({key})", route.title())));
    }
    lines
}

pub fn status_line<S: MovieSource>(view_model: &AppViewModel<S>, width: usize) -> String {
    let left = match view_model.input_mode() {
        InputMode::Normal => match view_model.shell().route() {
            Route::Dashboard => " / search year  Enter search  m list  q quit".to_string(),
            Route::Movies => {
                " ←/→ page  g/G first/last  1-5 jump  y year  w winner  d dashboard  q quit"
                    .to_string()
            }
        },
        InputMode::EditingFilterYear => format!(
            " Filter year: {}_  Enter done  Esc cancel",
            view_model.input_buffer()
        ),
        InputMode::EditingSearchYear => format!(
            " Search year: {}_  Enter search  Esc cancel",
            view_model.input_buffer()
        ),
    };
    spread(&left, &format!("{} ", view_model.shell().route()), width)
}

// === Dashboard ===

pub fn dashboard_lines<S: MovieSource>(
    dashboard: &DashboardViewModel<S>,
    input_mode: InputMode,
    input_buffer: &str,
) -> Vec<Line> {
    let mut lines = Vec::new();

    lines.push(Line::title("List years with multiple winners"));
    lines.push(Line::muted(columns(
        &["Year".to_string(), "Win Count".to_string()],
        &[6, 9],
    )));
    for entry in dashboard.multiple_winner_years() {
        lines.push(Line::plain(columns(
            &[entry.year.to_string(), entry.winner_count.to_string()],
            &[6, 9],
        )));
    }
    lines.push(Line::blank());

    lines.push(Line::title("Top 3 studios with winners"));
    lines.push(Line::muted(columns(
        &["Name".to_string(), "Win Count".to_string()],
        &[30, 9],
    )));
    for studio in dashboard.top_studios() {
        lines.push(Line::plain(columns(
            &[studio.name.clone(), studio.win_count.to_string()],
            &[30, 9],
        )));
    }
    lines.push(Line::blank());

    lines.push(Line::title(
        "Producers with longest and shortest interval between wins",
    ));
    for (label, producers) in [
        ("Maximum", dashboard.max_interval_producers()),
        ("Minimum", dashboard.min_interval_producers()),
    ] {
        lines.push(Line::plain(label));
        lines.push(Line::muted(columns(
            &[
                "Producer".to_string(),
                "Interval".to_string(),
                "Previous Year".to_string(),
                "Following Year".to_string(),
            ],
            &[24, 8, 13, 14],
        )));
        for interval in producers {
            lines.push(Line::plain(columns(
                &[
                    interval.producer.clone(),
                    interval.interval.to_string(),
                    interval.previous_win.to_string(),
                    interval.following_win.to_string(),
                ],
                &[24, 8, 13, 14],
            )));
        }
    }
    lines.push(Line::blank());

    lines.push(Line::title("List movie winners by year"));
    lines.push(Line::plain(format!(
        "Search by year: {}",
        year_box(
            input_mode == InputMode::EditingSearchYear,
            input_buffer,
            dashboard.search_year()
        )
    )));
    if dashboard.search_performed() {
        if dashboard.search_results().is_empty() {
            lines.push(Line::muted(NO_MOVIES_TEXT));
        } else {
            lines.push(Line::muted(columns(
                &["Id".to_string(), "Year".to_string(), "Title".to_string()],
                &[6, 6, 40],
            )));
            for winner in dashboard.search_results() {
                lines.push(Line::plain(columns(
                    &[winner.id.to_string(), winner.year.to_string(), winner.title.clone()],
                    &[6, 6, 40],
                )));
            }
        }
    }

    lines
}

// === Movie list ===

fn movie_row(movie: &Movie) -> String {
    columns(
        &[
            movie.id.to_string(),
            movie.year.to_string(),
            movie.title.clone(),
            yes_no(movie.winner).to_string(),
        ],
        &[6, 6, 40, 7],
    )
}

/// Page selector: first/previous, the visible window, next/last
pub fn pagination_line<S: MovieSource>(movies: &MoviesViewModel<S>) -> String {
    let current = movies.current_page();
    let pages = movies
        .visible_pages()
        .into_iter()
        .map(|page| {
            if page == current {
                format!("[{}]", page + 1)
            } else {
                format!(" {} ", page + 1)
            }
        })
        .collect::<Vec<_>>()
        .join("");

    format!(
        "|< <  {pages}  > >|   Page {} of {} ({} movies)",
        current + 1,
        movies.total_pages().max(0),
        movies.total_elements()
    )
}

pub fn movies_lines<S: MovieSource>(
    movies: &MoviesViewModel<S>,
    input_mode: InputMode,
    input_buffer: &str,
) -> Vec<Line> {
    let mut lines = vec![
        Line::title("List movies"),
        Line::plain(format!(
            "Year: {}   Winner: {}",
            year_box(
                input_mode == InputMode::EditingFilterYear,
                input_buffer,
                movies.filter_year()
            ),
            winner_filter_label(movies.filter_winner())
        )),
        Line::blank(),
        Line::muted(columns(
            &[
                "ID".to_string(),
                "Year".to_string(),
                "Title".to_string(),
                "Winner?".to_string(),
            ],
            &[6, 6, 40, 7],
        )),
    ];

    if movies.is_loading() {
        lines.push(Line::muted(LOADING_TEXT));
    } else if movies.movies().is_empty() {
        lines.push(Line::muted(NO_MOVIES_TEXT));
    } else {
        lines.extend(movies.movies().iter().map(|m| Line::plain(movie_row(m))));
    }

    lines.push(Line::blank());
    lines.push(Line::plain(pagination_line(movies)));
    lines
}

/// Content of the active screen
pub fn body_lines<S: MovieSource>(view_model: &AppViewModel<S>) -> Vec<Line> {
    match view_model.shell().route() {
        Route::Dashboard => dashboard_lines(
            view_model.dashboard(),
            view_model.input_mode(),
            view_model.input_buffer(),
        ),
        Route::Movies => movies_lines(
            view_model.movies(),
            view_model.input_mode(),
            view_model.input_buffer(),
        ),
    }
}
