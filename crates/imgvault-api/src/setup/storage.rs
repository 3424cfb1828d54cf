//! Storage setup and initialization

use anyhow::{Context, Result};
use imgvault_core::{Config, StorageBackend};
use imgvault_db::{MediaRecordRepository, MediaRepository, MetadataIndex};
use imgvault_storage::create_backend;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Build the media repository for the configured backend and run its
/// one-time initialization.
pub async fn setup_media_repository(
    config: &Config,
    db_pool: Option<SqlitePool>,
) -> Result<MediaRepository> {
    tracing::info!("Initializing storage backend...");
    let backend = create_backend(config).context("Failed to create storage backend")?;

    let index: Arc<dyn MetadataIndex> = match (config.storage_backend, db_pool) {
        #[cfg(feature = "storage-local")]
        (StorageBackend::Local, _) => Arc::new(imgvault_db::DirectoryIndex::new(
            imgvault_storage::LocalFileBackend::new(
                config.local_storage_path.clone(),
                config.local_storage_base_url.clone(),
            ),
        )),
        (_, Some(pool)) => Arc::new(MediaRecordRepository::new(pool)),
        (backend, None) => {
            anyhow::bail!("Storage backend {} requires a metadata database", backend)
        }
    };

    let media = MediaRepository::new(backend, index);
    media
        .init()
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = %media.backend_type(),
        "Storage backend initialized successfully"
    );

    Ok(media)
}
