use std::collections::HashMap;

/// Movie catalog provider abstraction
///
/// The import pipeline and the browse endpoints only ever talk to the
/// catalog through this trait, so TMDB can be swapped for another metadata
/// source (or a test double) without touching reconciliation logic.
use crate::{
    error::AppResult,
    models::{CatalogMovie, MovieDetails},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the catalog by title, optionally pinned to a release year.
    ///
    /// Results keep the catalog's own relevance order; the matcher's
    /// tie-break policy depends on it.
    async fn search_movies(&self, query: &str, year: Option<i32>) -> AppResult<Vec<CatalogMovie>>;

    /// Full detail record for one movie, genres resolved to names.
    async fn movie_details(&self, movie_id: i64) -> AppResult<MovieDetails>;

    /// The catalog's complete genre id → display name table.
    async fn genre_table(&self) -> AppResult<HashMap<i64, String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
