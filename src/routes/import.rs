use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{ImportSummary, ImportType},
    routes::AppState,
    services::import,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub csv_content: String,
    pub import_type: ImportType,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub results: ImportSummary,
}

/// Handler for the Letterboxd CSV import endpoint
pub async fn import_letterboxd(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ImportRequest>,
) -> AppResult<Json<ImportResponse>> {
    let run_id = Uuid::new_v4();
    tracing::info!(
        run_id = %run_id,
        user_id = %user.user_id,
        import_type = ?request.import_type,
        csv_bytes = request.csv_content.len(),
        "Processing Letterboxd import"
    );

    let results = import::run_import(
        state.catalog.as_ref(),
        state.store.as_ref(),
        state.import_limiter.as_ref(),
        &user.user_id,
        &request.csv_content,
        request.import_type,
    )
    .await?;

    tracing::info!(
        run_id = %run_id,
        processed = results.processed,
        failed = results.failed,
        "Letterboxd import completed"
    );

    Ok(Json(ImportResponse {
        success: true,
        results,
    }))
}
