use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::{
    error::AppResult, middleware::AuthUser, models::MovieStats, routes::AppState,
    services::stats::compute_stats,
};

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: MovieStats,
}

/// Handler for the statistics endpoint
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<StatsResponse>> {
    let records = state.store.list_for_user(&user.user_id).await?;
    let stats = compute_stats(&records, Utc::now().date_naive());
    Ok(Json(StatsResponse { stats }))
}
