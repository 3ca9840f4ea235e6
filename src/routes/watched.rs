use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{FieldPatch, WatchMethod, WatchedMovieDraft, WatchedMovieRecord},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWatchedMovieRequest {
    pub movie_id: i64,
    #[serde(default)]
    pub watched_date: Option<NaiveDate>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub method: Option<WatchMethod>,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedMoviesResponse {
    pub watched_movies: Vec<WatchedMovieRecord>,
}

/// Lists the user's watched movies, newest watch first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<WatchedMoviesResponse>> {
    let watched_movies = state.store.list_for_user(&user.user_id).await?;
    Ok(Json(WatchedMoviesResponse { watched_movies }))
}

/// Records a movie as watched.
///
/// The client only supplies the movie id and its own diary fields; the
/// catalog snapshot (title, poster, genres, runtime) is fetched server-side
/// so clients cannot write stale or forged metadata.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateWatchedMovieRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let details = state.catalog.movie_details(request.movie_id).await?;

    let draft = WatchedMovieDraft {
        movie_id: details.id,
        movie_title: details.title,
        movie_poster: details.poster_path,
        movie_release_date: details.release_date,
        movie_genres: details.genres,
        runtime: details.runtime,
        watched_date: FieldPatch::from_option(request.watched_date),
        rating: FieldPatch::from_option(request.rating),
        notes: match request.notes {
            Some(notes) => FieldPatch::Value(notes),
            None => FieldPatch::Omit,
        },
        method: request.method.unwrap_or(WatchMethod::Other),
        platform: FieldPatch::from_option(request.platform),
    };

    state.store.insert(&user.user_id, &draft).await?;

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}
