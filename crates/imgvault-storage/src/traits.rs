//! Binary object backend trait
//!
//! This module defines the ObjectBackend trait that all storage backends must implement.

use crate::keys::ObjectKey;
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use imgvault_core::{select_strategy, UploadStrategy};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Per-call upload options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    pub strategy: UploadStrategy,
    /// Category folder, informational only: object paths always come from the key.
    pub folder: Option<&'static str>,
}

impl UploadOptions {
    /// Options for uploading `size` bytes under `key`.
    pub fn for_key(key: &ObjectKey, size: usize) -> Self {
        Self {
            strategy: select_strategy(size),
            folder: key.category().folder(),
        }
    }
}

/// Result of a successful put.
///
/// `assigned_id` is whatever id the backend reports for the stored object. It
/// may or may not carry the category prefix, so callers must not assume it
/// equals the key they asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub assigned_id: String,
    pub url: String,
    pub secure_url: String,
}

/// Binary object backend
///
/// Implementations must be safe for concurrent use by independent callers.
/// The media repository is the only component that combines a backend with
/// a metadata index; backends never look at the index.
#[async_trait]
pub trait ObjectBackend: Send + Sync {
    /// One-time startup work (e.g. creating a root directory). Idempotent.
    async fn init(&self) -> StorageResult<()> {
        Ok(())
    }

    /// Store `data` under `key`.
    ///
    /// Fails with `UploadFailed` on any transport or backend error and never
    /// leaves a partially written object visible to `fetch`.
    async fn put(
        &self,
        key: &ObjectKey,
        data: Bytes,
        options: UploadOptions,
    ) -> StorageResult<UploadOutcome>;

    /// Fetch the bytes stored under `key`.
    ///
    /// Fails with `NotFound` when absent and `ReadFailed` when present but unreadable.
    async fn fetch(&self, key: &ObjectKey) -> StorageResult<Bytes>;

    /// Remove the object under `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &ObjectKey) -> StorageResult<()>;

    /// Whether an object exists under `key`. Backend errors read as `false`.
    async fn exists(&self, key: &ObjectKey) -> bool;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
