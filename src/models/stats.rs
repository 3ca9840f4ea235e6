use serde::{Deserialize, Serialize};

/// Aggregate statistics over one user's collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieStats {
    pub total_movies_watched: u32,
    pub total_runtime_minutes: u64,
    pub total_runtime_formatted: String,
    pub average_rating: Option<f64>,
    pub movies_with_rating: u32,
    pub movies_this_month: u32,
    pub movies_this_year: u32,
    pub top_genres: Vec<GenreCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: u32,
}
