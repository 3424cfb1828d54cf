use imgvault_core::{AppError, Category};

/// Resolve the category path segment of a media route.
///
/// `local` is accepted as an alias of `location`; `media` addresses unscoped
/// images. Unknown segments are not routes, so they read as not found.
pub fn category_from_segment(segment: &str) -> Result<Category, AppError> {
    match segment {
        "user" => Ok(Category::User),
        "location" | "local" => Ok(Category::Location),
        "media" => Ok(Category::Unscoped),
        other => Err(AppError::NotFound(format!("Unknown media category {}", other))),
    }
}
