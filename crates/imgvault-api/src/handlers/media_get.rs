use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use imgvault_core::models::MediaRecordResponse;

use crate::constants::IMAGE_CONTENT_TYPE;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::category::category_from_segment;

#[utoipa::path(
    get,
    path = "/api/v1/{category}/{id}",
    tag = "media",
    params(
        ("category" = String, Path, description = "Media category: user, location (or local), media"),
        ("id" = String, Path, description = "Image id, with or without the category prefix")
    ),
    responses(
        (status = 200, description = "Image record", body = MediaRecordResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_media"))]
pub async fn get_media(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpAppError> {
    let category = category_from_segment(&category)?;
    let record = state.media.load(&id, category).await?;
    Ok(Json(MediaRecordResponse::from_record(record, category)))
}

#[utoipa::path(
    get,
    path = "/api/v1/{category}/{id}/content",
    tag = "media",
    params(
        ("category" = String, Path, description = "Media category: user, location (or local), media"),
        ("id" = String, Path, description = "Image id, with or without the category prefix")
    ),
    responses(
        (status = 200, description = "Image bytes", body = [u8], content_type = "image/jpeg"),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 409, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_media_content"))]
pub async fn get_media_content(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpAppError> {
    let category = category_from_segment(&category)?;
    let data = state.media.load_content(&id, category).await?;
    Ok(([(header::CONTENT_TYPE, IMAGE_CONTENT_TYPE)], data))
}

/// Existence check within one category. Answers with a bare status code.
#[utoipa::path(
    head,
    path = "/api/v1/{category}/{id}",
    tag = "media",
    params(
        ("category" = String, Path, description = "Media category: user, location (or local), media"),
        ("id" = String, Path, description = "Image id, with or without the category prefix")
    ),
    responses(
        (status = 200, description = "Image exists"),
        (status = 404, description = "Image not found")
    )
)]
#[tracing::instrument(skip(state), fields(operation = "media_exists"))]
pub async fn media_exists(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, String)>,
) -> Result<StatusCode, HttpAppError> {
    let category = category_from_segment(&category)?;
    if state.media.exists_in(&id, category).await {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}
