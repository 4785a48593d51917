//! # Movie Models
//!
//! Wire-level data returned by the movie API. All types deserialize from the
//! camelCase JSON the API produces and are replaced wholesale on every fetch.

use serde::{Deserialize, Deserializer, Serialize};

/// Zero-based page index. Signed so that an unguarded "last page" jump on an
/// empty result (`total_pages - 1 == -1`) stays representable.
pub type PageIndex = i64;

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A nominated movie as listed on the movies page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub year: i32,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub studios: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub producers: Vec<String>,
    #[serde(default)]
    pub winner: bool,
}

/// Paging metadata nested in a movies page response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    #[serde(default)]
    pub page_number: PageIndex,
    #[serde(default)]
    pub page_size: u32,
}

/// One page of the movie collection (`MoviesPageResponse` on the wire)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviesPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: Vec<Movie>,
    #[serde(default)]
    pub pageable: Pageable,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: PageIndex,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_elements: u64,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub number: PageIndex,
    #[serde(default)]
    pub size: u32,
}

impl MoviesPage {
    /// Index of this page within the collection
    pub fn page_number(&self) -> PageIndex {
        self.pageable.page_number
    }

    /// Requested page size
    pub fn page_size(&self) -> u32 {
        self.pageable.page_size
    }
}

/// Winner row returned by the winners-by-year search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieWinner {
    pub id: i64,
    pub year: i32,
    pub title: String,
}

/// A year in which more than one movie won
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearWithMultipleWinners {
    pub year: i32,
    pub winner_count: u32,
}

/// Studio with its number of wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Studio {
    pub name: String,
    pub win_count: u32,
}

/// Gap between two consecutive wins of a producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerInterval {
    pub producer: String,
    pub interval: i32,
    pub previous_win: i32,
    pub following_win: i32,
}

/// Envelope of `GET /yearsWithMultipleWinners`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearsWithMultipleWinnersResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub years: Vec<YearWithMultipleWinners>,
}

/// Envelope of `GET /studiosWithWinCount`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudiosResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub studios: Vec<Studio>,
}

/// Envelope of `GET /maxMinWinIntervalForProducers`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerIntervalsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub min: Vec<ProducerInterval>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max: Vec<ProducerInterval>,
}
