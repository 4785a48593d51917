//! # Filter Intent
//!
//! The pair of optional filter values the movie list can be narrowed by.

/// Shortest year that is considered fully typed
pub const MIN_YEAR_DIGITS: usize = 4;

/// A combination of movie list filters; `None` means "not filtered"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterIntent {
    pub year: Option<i32>,
    pub winner: Option<bool>,
}

impl FilterIntent {
    pub fn new(year: Option<i32>, winner: Option<bool>) -> Self {
        Self { year, winner }
    }

    /// Whether the year (if any) still looks like it is being typed
    ///
    /// A year with fewer than four decimal digits is treated as incomplete
    /// input and must not trigger a fetch.
    pub fn has_incomplete_year(&self) -> bool {
        self.year
            .is_some_and(|year| digit_count(year) < MIN_YEAR_DIGITS)
    }
}

/// Number of decimal digits in `value`, ignoring its sign
pub fn digit_count(value: i32) -> usize {
    value.unsigned_abs().to_string().len()
}
