/// TMDB catalog provider
///
/// Endpoints used:
/// 1. Search: /search/movie?query=&year= → relevance-ordered candidates
/// 2. Details: /movie/{id} → runtime, genres with names
/// 3. Genres: /genre/movie/list → full id→name table
///
/// All three responses go through the write-behind Redis cache; the genre
/// table in particular is requested once per import row, so without the
/// cache a large import would hammer the same endpoint hundreds of times.
use std::collections::HashMap;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{CatalogMovie, MovieDetails},
    services::providers::CatalogProvider,
};

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const DETAILS_CACHE_TTL: u64 = 86_400; // 1 day
const GENRES_CACHE_TTL: u64 = 86_400; // 1 day

pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<CatalogMovie>,
}

#[derive(Deserialize)]
struct DetailsResponse {
    id: i64,
    title: String,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    genres: Vec<GenreEntry>,
    #[serde(default)]
    runtime: Option<u32>,
}

#[derive(Deserialize)]
struct GenreEntry {
    id: i64,
    name: String,
}

#[derive(Deserialize)]
struct GenreListResponse {
    #[serde(default)]
    genres: Vec<GenreEntry>,
}

impl TmdbProvider {
    pub fn new(cache: Cache, api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            cache,
        }
    }

    async fn fetch_search(&self, query: &str, year: Option<i32>) -> AppResult<Vec<CatalogMovie>> {
        let url = format!("{}/search/movie", self.api_url);
        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("query", query.to_string()),
        ];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }

        let response = self.http_client.get(&url).query(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB search returned status {}: {}",
                status, body
            )));
        }

        let search: SearchResponse = response.json().await?;
        Ok(search.results)
    }

    async fn fetch_details(&self, movie_id: i64) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Movie {} not found", movie_id)));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB details returned status {}: {}",
                status, body
            )));
        }

        let details: DetailsResponse = response.json().await?;
        Ok(MovieDetails {
            id: details.id,
            title: details.title,
            poster_path: details.poster_path,
            release_date: details.release_date,
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            // TMDB reports an unknown runtime as 0
            runtime: details.runtime.filter(|&minutes| minutes > 0),
        })
    }

    async fn fetch_genre_table(&self) -> AppResult<HashMap<i64, String>> {
        let url = format!("{}/genre/movie/list", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalApi(format!(
                "TMDB genre list returned status {}",
                status
            )));
        }

        let list: GenreListResponse = response.json().await?;
        Ok(list.genres.into_iter().map(|g| (g.id, g.name)).collect())
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search_movies(&self, query: &str, year: Option<i32>) -> AppResult<Vec<CatalogMovie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let key = CacheKey::MovieSearch {
            query: query.to_string(),
            year,
        };
        self.cache
            .get_or_fetch(&key, SEARCH_CACHE_TTL, self.fetch_search(query, year))
            .await
    }

    async fn movie_details(&self, movie_id: i64) -> AppResult<MovieDetails> {
        let key = CacheKey::MovieDetails(movie_id);
        self.cache
            .get_or_fetch(&key, DETAILS_CACHE_TTL, self.fetch_details(movie_id))
            .await
    }

    async fn genre_table(&self) -> AppResult<HashMap<i64, String>> {
        self.cache
            .get_or_fetch(
                &CacheKey::GenreTable,
                GENRES_CACHE_TTL,
                self.fetch_genre_table(),
            )
            .await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
