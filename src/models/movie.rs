use serde::{Deserialize, Serialize};

/// A search candidate as the catalog returns it.
///
/// The field names follow the TMDB wire format so search responses can be
/// deserialized directly and passed through to clients unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
}

impl CatalogMovie {
    /// Release year, when the catalog supplied a usable release date.
    ///
    /// TMDB sends unreleased or obscure titles with an empty `release_date`;
    /// those yield `None` and are excluded from year-based matching.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.as_deref()?.get(..4)?.parse().ok()
    }
}

/// Full detail record for one catalog movie, with genres already resolved
/// to display names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub genres: Vec<String>,
    pub runtime: Option<u32>,
}
