use bytes::Bytes;
use imgvault_core::{validate_upload, AppError, Category, MediaRecord, StorageBackend};
use imgvault_storage::{generate_raw_id, ObjectBackend, ObjectKey, StorageError, UploadOptions};
use std::sync::Arc;

use super::index::MetadataIndex;

/// Media repository
///
/// The only component that sees both the object backend and the metadata
/// index. Every operation validates before touching either store and writes
/// to the backend before the index, so a reported success never leaves an
/// orphaned record or object behind. Failures that leave the two stores
/// disagreeing are reported as [`AppError::Inconsistent`].
///
/// Ids handed to callers are raw ids without the category prefix; every
/// method that takes an id accepts either form.
#[derive(Clone)]
pub struct MediaRepository {
    backend: Arc<dyn ObjectBackend>,
    index: Arc<dyn MetadataIndex>,
}

impl MediaRepository {
    pub fn new(backend: Arc<dyn ObjectBackend>, index: Arc<dyn MetadataIndex>) -> Self {
        Self { backend, index }
    }

    pub fn backend_type(&self) -> StorageBackend {
        self.backend.backend_type()
    }

    /// Run the backend's one-time startup work.
    pub async fn init(&self) -> Result<(), AppError> {
        self.backend
            .init()
            .await
            .map_err(|e| AppError::storage_failed("Failed to initialize storage", e))
    }

    /// Store a new image under `category` and return its raw id.
    #[tracing::instrument(skip(self, data), fields(category = %category, size_bytes = data.len()))]
    pub async fn store(
        &self,
        data: Bytes,
        filename: &str,
        category: Category,
    ) -> Result<String, AppError> {
        validate_upload(&data, filename)?;

        let key = ObjectKey::new(category, generate_raw_id());
        let options = UploadOptions::for_key(&key, data.len());
        let outcome = self
            .backend
            .put(&key, data, options)
            .await
            .map_err(|e| AppError::storage_failed(format!("Failed to store image {}", filename), e))?;

        // Backends may or may not report the id with its prefix.
        let raw_id = category.strip(&outcome.assigned_id).to_string();
        let public_id = category.qualify(&raw_id);
        let record = MediaRecord::new(public_id.clone(), outcome.url, outcome.secure_url);

        if let Err(e) = self.index.save(record).await {
            tracing::error!(
                error = %e,
                public_id = %public_id,
                "Failed to save media record, removing stored object"
            );
            if let Err(remove_err) = self.backend.remove(&key).await {
                return Err(AppError::Inconsistent(format!(
                    "Image {} was stored but its record could not be saved ({}) and removing it failed: {}",
                    public_id, e, remove_err
                )));
            }
            return Err(e);
        }

        tracing::info!(public_id = %public_id, "Image stored");
        Ok(raw_id)
    }

    /// Load the record for `id` within `category`.
    #[tracing::instrument(skip(self), fields(category = %category))]
    pub async fn load(&self, id: &str, category: Category) -> Result<MediaRecord, AppError> {
        let public_id = category.qualify(category.strip(id));
        self.index
            .find_by_public_id(&public_id)
            .await?
            .ok_or_else(|| not_found(&public_id))
    }

    /// Fetch the stored bytes for `id` within `category`.
    #[tracing::instrument(skip(self), fields(category = %category))]
    pub async fn load_content(&self, id: &str, category: Category) -> Result<Bytes, AppError> {
        let key = ObjectKey::resolve(id, category);
        self.backend.fetch(&key).await.map_err(|e| match e {
            StorageError::NotFound(_) => not_found(&key.qualified()),
            other => AppError::storage_failed(format!("Failed to read image {}", key), other),
        })
    }

    /// Replace the image behind `id` and return the raw id of the replacement.
    ///
    /// The replacement is stored under a fresh key, so the old URLs stop
    /// resolving once this returns. The existing record is updated in place.
    #[tracing::instrument(skip(self, data), fields(category = %category, size_bytes = data.len()))]
    pub async fn update(
        &self,
        id: &str,
        data: Bytes,
        filename: &str,
        category: Category,
    ) -> Result<String, AppError> {
        validate_upload(&data, filename)?;

        let old_key = ObjectKey::resolve(id, category);
        let old_public_id = old_key.qualified();
        let mut record = self
            .index
            .find_by_public_id(&old_public_id)
            .await?
            .ok_or_else(|| not_found(&old_public_id))?;

        self.backend.remove(&old_key).await.map_err(|e| {
            AppError::storage_failed(format!("Failed to remove image {}", old_public_id), e)
        })?;

        // From here on the old object is gone while its record still exists.
        let new_key = ObjectKey::new(category, generate_raw_id());
        let options = UploadOptions::for_key(&new_key, data.len());
        let outcome = self.backend.put(&new_key, data, options).await.map_err(|e| {
            AppError::Inconsistent(format!(
                "Image {} was removed but its replacement could not be stored: {}",
                old_public_id, e
            ))
        })?;

        let raw_id = category.strip(&outcome.assigned_id).to_string();
        let public_id = category.qualify(&raw_id);
        record.replace(public_id.clone(), outcome.url, outcome.secure_url);

        self.index.save(record).await.map_err(|e| {
            AppError::Inconsistent(format!(
                "Image {} was replaced by {} but its record could not be updated: {}",
                old_public_id, public_id, e
            ))
        })?;

        tracing::info!(old_public_id = %old_public_id, public_id = %public_id, "Image updated");
        Ok(raw_id)
    }

    /// Delete the image and record behind `id`.
    ///
    /// Deleting an id that has no record fails with `NotFound`, so a second
    /// delete of the same id is reported rather than silently accepted.
    #[tracing::instrument(skip(self), fields(category = %category))]
    pub async fn delete(&self, id: &str, category: Category) -> Result<(), AppError> {
        let key = ObjectKey::resolve(id, category);
        let public_id = key.qualified();
        let record = self
            .index
            .find_by_public_id(&public_id)
            .await?
            .ok_or_else(|| not_found(&public_id))?;

        self.backend.remove(&key).await.map_err(|e| {
            AppError::storage_failed(format!("Failed to delete image {}", public_id), e)
        })?;

        self.index.delete(&record).await.map_err(|e| {
            AppError::Inconsistent(format!(
                "Image {} was removed but its record could not be deleted: {}",
                public_id, e
            ))
        })?;

        tracing::info!(public_id = %public_id, "Image deleted");
        Ok(())
    }

    /// Whether a record exists for `id` in any category.
    ///
    /// Tolerant of the id's form: the id as given is tried first, then its
    /// raw part qualified by each category. Lookup errors read as absent.
    #[tracing::instrument(skip(self))]
    pub async fn exists(&self, id: &str) -> bool {
        let (_, raw_id) = Category::split(id);
        let mut candidates = vec![id.to_string()];
        for category in Category::ALL {
            let candidate = category.qualify(raw_id);
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }

        for candidate in candidates {
            if self.find_quietly(&candidate).await {
                return true;
            }
        }
        false
    }

    /// Whether a record exists for `id` within `category` only.
    #[tracing::instrument(skip(self), fields(category = %category))]
    pub async fn exists_in(&self, id: &str, category: Category) -> bool {
        self.find_quietly(&category.qualify(category.strip(id)))
            .await
    }

    async fn find_quietly(&self, public_id: &str) -> bool {
        match self.index.find_by_public_id(public_id).await {
            Ok(found) => found.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, public_id = %public_id, "Media record lookup failed");
                false
            }
        }
    }
}

fn not_found(public_id: &str) -> AppError {
    AppError::NotFound(format!("Image with public id {} not found", public_id))
}
