#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;

use watchquest_api::db::MemoryWatchedMovieStore;
use watchquest_api::error::{AppError, AppResult};
use watchquest_api::models::{CatalogMovie, MovieDetails};
use watchquest_api::routes::{create_router, AppState};
use watchquest_api::services::auth::{TokenVerifier, UserId};
use watchquest_api::services::providers::CatalogProvider;
use watchquest_api::services::rate_limit::FixedInterval;

pub const TOKEN: &str = "valid-token";
pub const USER: &str = "user-1";

/// Catalog double with a fixed set of movies. Search matches on substring,
/// case-insensitive, and keeps the declared order (it stands in for TMDB's
/// relevance ranking).
pub struct StubCatalog {
    pub movies: Vec<CatalogMovie>,
    pub runtimes: HashMap<i64, u32>,
    pub genres: HashMap<i64, String>,
    pub fail_search: bool,
}

impl StubCatalog {
    /// Two movies with genres and runtimes, enough for every happy path.
    pub fn standard() -> Self {
        Self {
            movies: vec![inception(), interstellar()],
            runtimes: HashMap::from([(27205, 148), (157336, 169)]),
            genres: HashMap::from([
                (28, "Action".to_string()),
                (878, "Science Fiction".to_string()),
                (12, "Adventure".to_string()),
            ]),
            fail_search: false,
        }
    }

    /// A catalog whose search endpoint always errors.
    pub fn offline() -> Self {
        Self {
            fail_search: true,
            ..Self::standard()
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StubCatalog {
    async fn search_movies(&self, query: &str, _year: Option<i32>) -> AppResult<Vec<CatalogMovie>> {
        if self.fail_search {
            return Err(AppError::ExternalApi("catalog unreachable".to_string()));
        }
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let needle = query.to_lowercase();
        Ok(self
            .movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn movie_details(&self, movie_id: i64) -> AppResult<MovieDetails> {
        let movie = self
            .movies
            .iter()
            .find(|movie| movie.id == movie_id)
            .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie_id)))?;

        Ok(MovieDetails {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            release_date: movie.release_date.clone(),
            genres: movie
                .genre_ids
                .iter()
                .filter_map(|id| self.genres.get(id).cloned())
                .collect(),
            runtime: self.runtimes.get(&movie_id).copied(),
        })
    }

    async fn genre_table(&self) -> AppResult<HashMap<i64, String>> {
        Ok(self.genres.clone())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Verifier that accepts exactly one token.
pub struct StaticVerifier;

#[async_trait::async_trait]
impl TokenVerifier for StaticVerifier {
    async fn verify(&self, token: &str) -> AppResult<UserId> {
        if token == TOKEN {
            Ok(USER.to_string())
        } else {
            Err(AppError::Unauthorized(
                "Invalid or expired token".to_string(),
            ))
        }
    }
}

pub fn inception() -> CatalogMovie {
    CatalogMovie {
        id: 27205,
        title: "Inception".to_string(),
        release_date: Some("2010-07-15".to_string()),
        poster_path: Some("/inception.jpg".to_string()),
        overview: None,
        genre_ids: vec![28, 878],
    }
}

pub fn interstellar() -> CatalogMovie {
    CatalogMovie {
        id: 157336,
        title: "Interstellar".to_string(),
        release_date: Some("2014-11-05".to_string()),
        poster_path: Some("/interstellar.jpg".to_string()),
        overview: None,
        genre_ids: vec![12, 878],
    }
}

pub fn test_state(catalog: StubCatalog) -> AppState {
    AppState {
        catalog: Arc::new(catalog),
        verifier: Arc::new(StaticVerifier),
        store: Arc::new(MemoryWatchedMovieStore::default()),
        import_limiter: Arc::new(FixedInterval::new(Duration::ZERO)),
    }
}

pub fn test_server(catalog: StubCatalog) -> TestServer {
    TestServer::new(create_router(test_state(catalog))).unwrap()
}

pub fn bearer() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_static("Bearer valid-token"),
    )
}
