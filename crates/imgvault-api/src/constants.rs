//! API constants

/// Versioned prefix for all media routes.
pub const API_PREFIX: &str = "/api/v1";

/// Path of the served OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Allowance for multipart boundaries and part headers on top of the file size limit.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Content type of served image bytes.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";
