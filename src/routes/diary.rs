use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    error::AppResult, middleware::AuthUser, models::DiaryMonth, routes::AppState,
    services::diary::build_diary,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryResponse {
    pub diary_data: Vec<DiaryMonth>,
}

/// Handler for the chronological diary endpoint
pub async fn diary(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DiaryResponse>> {
    let records = state.store.list_for_user(&user.user_id).await?;
    let diary_data = build_diary(records);
    Ok(Json(DiaryResponse { diary_data }))
}
