use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::WatchedMovieStore;
use crate::services::auth::TokenVerifier;
use crate::services::providers::CatalogProvider;
use crate::services::rate_limit::RateLimiter;

pub mod diary;
pub mod import;
pub mod movies;
pub mod stats;
pub mod watched;

/// Shared application state handed to every handler.
///
/// Everything is a trait object so tests can swap in doubles for the
/// catalog, the identity provider, the store and the import pacing.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub store: Arc<dyn WatchedMovieStore>,
    pub import_limiter: Arc<dyn RateLimiter>,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies/search", get(movies::search))
        .route("/movies/:id", get(movies::details))
        .route(
            "/watched-movies",
            get(watched::list).post(watched::create),
        )
        .route("/stats", get(stats::stats))
        .route("/diary", get(diary::diary))
        .route("/import/letterboxd", post(import::import_letterboxd))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
