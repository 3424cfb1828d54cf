//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use imgvault_core::models;
use imgvault_core::Category;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "imgvault API",
        version = "0.1.0",
        description = "Image storage API. Images are stored per category (user, location, or unscoped media) in an object store, with a metadata record kept in step. All media endpoints are versioned under /api/v1/."
    ),
    paths(
        handlers::media_upload::upload_media,
        handlers::media_upload::update_media,
        handlers::media_get::get_media,
        handlers::media_get::get_media_content,
        handlers::media_get::media_exists,
        handlers::media_delete::delete_media,
        handlers::health::health_check,
    ),
    components(schemas(
        models::MediaRecordResponse,
        Category,
        handlers::media_upload::MediaIdResponse,
        handlers::media_delete::MessageResponse,
        handlers::health::HealthCheckResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "media", description = "Image storage and retrieval"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_media_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/{category}"));
        assert!(doc.paths.paths.contains_key("/api/v1/{category}/{id}"));
        assert!(doc.paths.paths.contains_key("/api/v1/{category}/{id}/content"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
