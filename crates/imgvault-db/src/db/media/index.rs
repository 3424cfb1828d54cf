use async_trait::async_trait;
use imgvault_core::{AppError, MediaRecord};

/// Keyed store of media records.
///
/// Lookups are exact matches on the category-qualified `public_id`; an index
/// never scans for prefixed or unprefixed variants on its own.
#[async_trait]
pub trait MetadataIndex: Send + Sync {
    async fn find_by_public_id(&self, public_id: &str) -> Result<Option<MediaRecord>, AppError>;

    /// Insert the record when it has no id yet, otherwise update it in place.
    async fn save(&self, record: MediaRecord) -> Result<MediaRecord, AppError>;

    async fn delete(&self, record: &MediaRecord) -> Result<(), AppError>;
}
