//! Test helpers: repositories over an in-memory SQLite index and object store,
//! plus backend and index wrappers that fail on demand.
//!
//! Run from workspace root: `cargo test -p imgvault-db`.

use async_trait::async_trait;
use bytes::Bytes;
use imgvault_core::{AppError, MediaRecord, StorageBackend};
use imgvault_db::{MediaRecordRepository, MediaRepository, MetadataIndex, MIGRATOR};
use imgvault_storage::{
    ObjectBackend, ObjectKey, RemoteObjectBackend, StorageError, StorageResult, UploadOptions,
    UploadOutcome,
};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub const PUBLIC_HOST: &str = "cdn.example.com";

/// In-memory SQLite pool with migrations applied.
///
/// A single connection that never expires keeps the in-memory database alive
/// for the lifetime of the pool.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Repository wired to an in-memory object store and SQLite index.
pub struct TestRepository {
    pub repository: MediaRepository,
    pub backend: Arc<FlakyBackend>,
    pub index: Arc<FlakyIndex>,
}

pub async fn setup_repository() -> TestRepository {
    let backend = Arc::new(FlakyBackend::new(RemoteObjectBackend::in_memory(
        PUBLIC_HOST.to_string(),
    )));
    let index = Arc::new(FlakyIndex::new(MediaRecordRepository::new(test_pool().await)));
    let repository = MediaRepository::new(backend.clone(), index.clone());
    TestRepository {
        repository,
        backend,
        index,
    }
}

/// Object backend wrapper with switchable failures.
pub struct FlakyBackend {
    inner: RemoteObjectBackend,
    pub fail_put: AtomicBool,
    pub fail_remove: AtomicBool,
    pub fail_fetch: AtomicBool,
    pub calls: AtomicUsize,
}

impl FlakyBackend {
    pub fn new(inner: RemoteObjectBackend) -> Self {
        Self {
            inner,
            fail_put: AtomicBool::new(false),
            fail_remove: AtomicBool::new(false),
            fail_fetch: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectBackend for FlakyBackend {
    async fn put(
        &self,
        key: &ObjectKey,
        data: Bytes,
        options: UploadOptions,
    ) -> StorageResult<UploadOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("injected put failure".to_string()));
        }
        self.inner.put(key, data, options).await
    }

    async fn fetch(&self, key: &ObjectKey) -> StorageResult<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StorageError::ReadFailed("injected fetch failure".to_string()));
        }
        self.inner.fetch(key).await
    }

    async fn remove(&self, key: &ObjectKey) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed("injected remove failure".to_string()));
        }
        self.inner.remove(key).await
    }

    async fn exists(&self, key: &ObjectKey) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(key).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}

/// Metadata index wrapper with switchable failures.
pub struct FlakyIndex {
    inner: MediaRecordRepository,
    pub fail_find: AtomicBool,
    pub fail_save: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FlakyIndex {
    pub fn new(inner: MediaRecordRepository) -> Self {
        Self {
            inner,
            fail_find: AtomicBool::new(false),
            fail_save: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl MetadataIndex for FlakyIndex {
    async fn find_by_public_id(&self, public_id: &str) -> Result<Option<MediaRecord>, AppError> {
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(AppError::Internal("injected find failure".to_string()));
        }
        self.inner.find_by_public_id(public_id).await
    }

    async fn save(&self, record: MediaRecord) -> Result<MediaRecord, AppError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(AppError::Internal("injected save failure".to_string()));
        }
        self.inner.save(record).await
    }

    async fn delete(&self, record: &MediaRecord) -> Result<(), AppError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::Internal("injected delete failure".to_string()));
        }
        self.inner.delete(record).await
    }
}

pub fn image(len: usize) -> Bytes {
    Bytes::from(vec![0xAB; len])
}
