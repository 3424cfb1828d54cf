use crate::keys::ObjectKey;
use crate::traits::{ObjectBackend, StorageError, StorageResult, UploadOptions, UploadOutcome};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use imgvault_core::UploadStrategy;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// File extension used for every stored object.
pub const FILE_EXTENSION: &str = "jpg";

/// Write size used by chunked uploads.
const CHUNK_SIZE: usize = 256 * 1024;

/// Local filesystem backend
///
/// One file per object at `{root}/{raw id}.jpg`. Categories are not used as
/// folders: the raw id alone names the file.
#[derive(Clone)]
pub struct LocalFileBackend {
    root: PathBuf,
    base_url: String,
}

impl LocalFileBackend {
    /// Create a new LocalFileBackend instance
    ///
    /// The root directory is not created here; call [`ObjectBackend::init`]
    /// once before use.
    ///
    /// # Arguments
    /// * `root` - Directory holding the files (e.g., "imgs")
    /// * `base_url` - Base URL of the unscoped media routes (e.g., "http://localhost:4000/api/v1/media")
    pub fn new(root: impl Into<PathBuf>, base_url: String) -> Self {
        LocalFileBackend {
            root: root.into(),
            base_url,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `raw_id`, rejecting ids that could escape the root.
    pub fn file_path(&self, raw_id: &str) -> StorageResult<PathBuf> {
        if raw_id.is_empty()
            || raw_id.contains("..")
            || raw_id.contains('/')
            || raw_id.contains('\\')
        {
            return Err(StorageError::InvalidKey(format!(
                "Object id {} contains invalid characters",
                raw_id
            )));
        }
        Ok(self.root.join(format!("{}.{}", raw_id, FILE_EXTENSION)))
    }

    /// Public URLs for `raw_id`: as configured, and with an `https` scheme.
    ///
    /// URLs point at the content route under `base_url`, which serves the
    /// file's bytes.
    pub fn generate_urls(&self, raw_id: &str) -> (String, String) {
        let url = format!("{}/{}/content", self.base_url.trim_end_matches('/'), raw_id);
        let secure_url = match url.strip_prefix("http://") {
            Some(rest) => format!("https://{}", rest),
            None => url.clone(),
        };
        (url, secure_url)
    }

    async fn write_file(path: &Path, data: &Bytes, strategy: UploadStrategy) -> std::io::Result<()> {
        let mut file = fs::File::create(path).await?;
        match strategy {
            UploadStrategy::Standard => file.write_all(data).await?,
            UploadStrategy::Chunked => {
                for chunk in data.chunks(CHUNK_SIZE) {
                    file.write_all(chunk).await?;
                }
            }
        }
        file.sync_all().await
    }
}

#[async_trait]
impl ObjectBackend for LocalFileBackend {
    async fn init(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                self.root.display(),
                e
            ))
        })?;
        tracing::info!(root = %self.root.display(), "Local storage initialized");
        Ok(())
    }

    async fn put(
        &self,
        key: &ObjectKey,
        data: Bytes,
        options: UploadOptions,
    ) -> StorageResult<UploadOutcome> {
        let path = self.file_path(key.raw_id())?;
        // Written beside the target and renamed so readers never see a partial file.
        let staging = path.with_extension(format!("{}.part", FILE_EXTENSION));
        let size = data.len();
        let start = std::time::Instant::now();

        if let Err(e) = Self::write_file(&staging, &data, options.strategy).await {
            let _ = fs::remove_file(&staging).await;
            tracing::error!(
                error = %e,
                path = %path.display(),
                size_bytes = size,
                strategy = %options.strategy,
                "Local storage upload failed"
            );
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        fs::rename(&staging, &path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to move file {}: {}", path.display(), e))
        })?;

        let (url, secure_url) = self.generate_urls(key.raw_id());

        tracing::info!(
            path = %path.display(),
            key = %key.raw_id(),
            size_bytes = size,
            strategy = %options.strategy,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(UploadOutcome {
            assigned_id: key.raw_id().to_string(),
            url,
            secure_url,
        })
    }

    async fn fetch(&self, key: &ObjectKey) -> StorageResult<Bytes> {
        let path = self.file_path(key.raw_id())?;
        let start = std::time::Instant::now();

        let data = fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(key.raw_id().to_string()),
            _ => {
                tracing::error!(error = %e, path = %path.display(), "Local storage fetch failed");
                StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
            }
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key.raw_id(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage fetch successful"
        );

        Ok(Bytes::from(data))
    }

    async fn remove(&self, key: &ObjectKey) -> StorageResult<()> {
        let path = self.file_path(key.raw_id())?;
        let start = std::time::Instant::now();

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "Local storage delete failed");
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        tracing::info!(
            path = %path.display(),
            key = %key.raw_id(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &ObjectKey) -> bool {
        match self.file_path(key.raw_id()) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
