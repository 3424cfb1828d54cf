#[cfg(feature = "storage-local")]
use crate::LocalFileBackend;
#[cfg(feature = "storage-remote")]
use crate::RemoteObjectBackend;
use crate::{ObjectBackend, StorageBackend, StorageError, StorageResult};
use imgvault_core::Config;
use std::sync::Arc;

/// Create the object backend selected by configuration.
///
/// The backend is returned uninitialized; callers run `init` once at startup.
pub fn create_backend(config: &Config) -> StorageResult<Arc<dyn ObjectBackend>> {
    match config.storage_backend {
        #[cfg(feature = "storage-remote")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.s3_region.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let public_host = public_host(config)?;

            let backend =
                RemoteObjectBackend::s3(bucket, region, config.s3_endpoint.clone(), public_host)?;
            Ok(Arc::new(backend))
        }

        #[cfg(feature = "storage-remote")]
        StorageBackend::Memory => Ok(Arc::new(RemoteObjectBackend::in_memory(public_host(
            config,
        )?))),

        #[cfg(not(feature = "storage-remote"))]
        StorageBackend::S3 | StorageBackend::Memory => Err(StorageError::ConfigError(
            "Remote storage backend not available (storage-remote feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => Ok(Arc::new(LocalFileBackend::new(
            config.local_storage_path.clone(),
            config.local_storage_base_url.clone(),
        ))),

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(feature = "storage-remote")]
fn public_host(config: &Config) -> StorageResult<String> {
    config
        .cdn_public_host
        .clone()
        .ok_or_else(|| StorageError::ConfigError("CDN_PUBLIC_HOST not configured".to_string()))
}
