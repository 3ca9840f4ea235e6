use serde::{Deserialize, Serialize};

use super::WatchedMovieRecord;

/// One calendar month of diary entries, newest watch first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiaryMonth {
    /// Sort key, `YYYY-MM`.
    pub month_year: String,
    /// Human form, e.g. "May 2021".
    pub display_name: String,
    pub movies: Vec<WatchedMovieRecord>,
}
