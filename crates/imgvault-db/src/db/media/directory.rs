use async_trait::async_trait;
use chrono::{DateTime, Utc};
use imgvault_core::{AppError, Category, MediaRecord};
use imgvault_storage::LocalFileBackend;
use std::io::ErrorKind;
use tokio::fs;

use super::index::MetadataIndex;

/// Metadata index for the local file backend.
///
/// There is no sidecar metadata: a record exists exactly when its file exists
/// under the backend's root. Records are rebuilt on every lookup, so `save`
/// and `delete` have nothing to persist.
#[derive(Clone)]
pub struct DirectoryIndex {
    files: LocalFileBackend,
}

impl DirectoryIndex {
    pub fn new(files: LocalFileBackend) -> Self {
        Self { files }
    }
}

#[async_trait]
impl MetadataIndex for DirectoryIndex {
    #[tracing::instrument(skip(self), fields(root = %self.files.root().display()))]
    async fn find_by_public_id(&self, public_id: &str) -> Result<Option<MediaRecord>, AppError> {
        // Files are named by raw id alone.
        let (_, raw_id) = Category::split(public_id);
        let Ok(path) = self.files.file_path(raw_id) else {
            return Ok(None);
        };

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let modified: DateTime<Utc> = metadata.modified()?.into();
        let (url, secure_url) = self.files.generate_urls(raw_id);

        Ok(Some(MediaRecord {
            id: None,
            public_id: public_id.to_string(),
            url,
            secure_url,
            uploaded_at: modified,
            updated_at: modified,
        }))
    }

    async fn save(&self, record: MediaRecord) -> Result<MediaRecord, AppError> {
        Ok(record)
    }

    async fn delete(&self, _record: &MediaRecord) -> Result<(), AppError> {
        Ok(())
    }
}
