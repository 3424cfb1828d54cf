use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::category::category_from_segment;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    delete,
    path = "/api/v1/{category}/{id}",
    tag = "media",
    params(
        ("category" = String, Path, description = "Media category: user, location (or local), media"),
        ("id" = String, Path, description = "Image id, with or without the category prefix")
    ),
    responses(
        (status = 200, description = "Image deleted", body = MessageResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 409, description = "Storage failure", body = ErrorResponse),
        (status = 500, description = "Image and metadata out of sync", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_media"))]
pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    Path((category, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpAppError> {
    let category = category_from_segment(&category)?;
    state.media.delete(&id, category).await?;

    Ok(Json(MessageResponse {
        message: format!("Image with id {} was successfully deleted.", id),
    }))
}
