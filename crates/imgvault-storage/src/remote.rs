use crate::keys::ObjectKey;
use crate::traits::{ObjectBackend, StorageError, StorageResult, UploadOptions, UploadOutcome};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use imgvault_core::UploadStrategy;
use object_store::aws::AmazonS3Builder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStore, ObjectStoreExt, PutMode, PutPayload, Result as ObjectResult};
use std::sync::Arc;

/// Part size used by chunked uploads (the S3 minimum for non-final parts).
pub const CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// Remote object store backend
///
/// Objects live at the key's qualified form (`{category prefix}{raw id}`)
/// for every operation. Public URLs are built from `public_host` in both `http` and
/// `https` form.
#[derive(Clone)]
pub struct RemoteObjectBackend {
    store: Arc<dyn ObjectStore>,
    public_host: String,
    backend: StorageBackend,
}

impl RemoteObjectBackend {
    /// Wrap an existing object store.
    pub fn new(store: Arc<dyn ObjectStore>, public_host: String, backend: StorageBackend) -> Self {
        let public_host = public_host
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_string();
        Self {
            store,
            public_host,
            backend,
        }
    }

    /// Create an S3-backed instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `public_host` - Host serving the bucket's objects to clients
    pub fn s3(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        public_host: String,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket);

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::new(Arc::new(store), public_host, StorageBackend::S3))
    }

    /// Create an instance over an in-process store.
    pub fn in_memory(public_host: String) -> Self {
        Self::new(
            Arc::new(InMemory::new()),
            public_host,
            StorageBackend::Memory,
        )
    }

    fn generate_urls(&self, path: &str) -> (String, String) {
        (
            format!("http://{}/{}", self.public_host, path),
            format!("https://{}/{}", self.public_host, path),
        )
    }

    async fn put_standard(&self, location: &Path, data: Bytes) -> ObjectResult<()> {
        self.store
            .put_opts(location, PutPayload::from(data), PutMode::Overwrite.into())
            .await?;
        Ok(())
    }

    async fn put_chunked(&self, location: &Path, data: Bytes) -> ObjectResult<()> {
        let mut upload = self.store.put_multipart(location).await?;

        let mut parts = Vec::with_capacity(data.len().div_ceil(CHUNK_SIZE));
        let mut offset = 0;
        while offset < data.len() {
            let end = usize::min(offset + CHUNK_SIZE, data.len());
            parts.push(upload.put_part(PutPayload::from(data.slice(offset..end))));
            offset = end;
        }

        if let Err(e) = futures::future::try_join_all(parts).await {
            // Nothing becomes visible until complete(); abort releases the parts.
            if let Err(abort_err) = upload.abort().await {
                tracing::warn!(error = %abort_err, path = %location, "Failed to abort multipart upload");
            }
            return Err(e);
        }

        upload.complete().await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectBackend for RemoteObjectBackend {
    async fn put(
        &self,
        key: &ObjectKey,
        data: Bytes,
        options: UploadOptions,
    ) -> StorageResult<UploadOutcome> {
        let path = key.qualified();
        let location = Path::from(path.clone());
        let size = data.len();
        let start = std::time::Instant::now();

        let result = match options.strategy {
            UploadStrategy::Standard => self.put_standard(&location, data).await,
            UploadStrategy::Chunked => self.put_chunked(&location, data).await,
        };

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                key = %path,
                size_bytes = size,
                strategy = %options.strategy,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Remote upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let (url, secure_url) = self.generate_urls(&path);

        tracing::info!(
            key = %path,
            folder = options.folder.unwrap_or_default(),
            size_bytes = size,
            strategy = %options.strategy,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remote upload successful"
        );

        Ok(UploadOutcome {
            assigned_id: path,
            url,
            secure_url,
        })
    }

    async fn fetch(&self, key: &ObjectKey) -> StorageResult<Bytes> {
        let start = std::time::Instant::now();
        let path = key.qualified();
        let location = Path::from(path.clone());

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(path.clone()),
            other => {
                tracing::error!(
                    error = %other,
                    key = %path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Remote fetch failed"
                );
                StorageError::ReadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;

        tracing::info!(
            key = %path,
            size_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remote fetch successful"
        );

        Ok(bytes)
    }

    async fn remove(&self, key: &ObjectKey) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let path = key.qualified();
        let location = Path::from(path.clone());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        match result {
            Ok(()) | Err(ObjectStoreError::NotFound { .. }) => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    key = %path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Remote delete failed"
                );
                return Err(StorageError::DeleteFailed(e.to_string()));
            }
        }

        tracing::info!(
            key = %path,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remote delete successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &ObjectKey) -> bool {
        let location = Path::from(key.qualified());
        match self.store.head(&location).await {
            Ok(_) => true,
            Err(ObjectStoreError::NotFound { .. }) => false,
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Remote existence check failed");
                false
            }
        }
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }
}
