use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{CatalogMovie, MovieDetails},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    year: Option<i32>,
}

/// Handler for catalog movie search
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<CatalogMovie>>> {
    let movies = state
        .catalog
        .search_movies(params.q.trim(), params.year)
        .await?;
    Ok(Json(movies))
}

/// Handler for catalog movie details
pub async fn details(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieDetails>> {
    let details = state.catalog.movie_details(movie_id).await?;
    Ok(Json(details))
}
