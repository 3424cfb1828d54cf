use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::category::category_from_segment;
use crate::utils::upload::extract_multipart_file;

/// Id of a stored image, without its category prefix.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MediaIdResponse {
    pub id: String,
}

/// Upload image handler
///
/// Stores the multipart field `file` under the category named in the path and
/// returns the new image's id (HTTP 201 Created).
#[utoipa::path(
    post,
    path = "/api/v1/{category}",
    tag = "media",
    params(
        ("category" = String, Path, description = "Media category: user, location (or local), media")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = MediaIdResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse),
        (status = 409, description = "Storage failure", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_media"))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let category = category_from_segment(&category)?;
    let file = extract_multipart_file(multipart, state.config.max_file_size_bytes).await?;

    let id = state
        .media
        .store(file.data, &file.filename, category)
        .await?;

    Ok((StatusCode::CREATED, Json(MediaIdResponse { id })))
}

/// Replace image handler
///
/// Replaces the image behind `id` with the multipart field `file`. The
/// replacement gets a new id, which is returned (HTTP 201 Created).
#[utoipa::path(
    put,
    path = "/api/v1/{category}/{id}",
    tag = "media",
    params(
        ("category" = String, Path, description = "Media category: user, location (or local), media"),
        ("id" = String, Path, description = "Image id, with or without the category prefix")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image replaced", body = MediaIdResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 409, description = "Storage failure", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Image and metadata out of sync", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "update_media"))]
pub async fn update_media(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let category = category_from_segment(&category)?;
    let file = extract_multipart_file(multipart, state.config.max_file_size_bytes).await?;

    let id = state
        .media
        .update(&id, file.data, &file.filename, category)
        .await?;

    Ok((StatusCode::CREATED, Json(MediaIdResponse { id })))
}
