//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p imgvault-api --test media_api_test`.

#![allow(dead_code)]

pub mod fixtures;
pub mod workflows;

use axum_test::TestServer;
use imgvault_api::setup::routes;
use imgvault_api::state::AppState;
use imgvault_core::{Config, StorageBackend};
use imgvault_db::{DirectoryIndex, MediaRecordRepository, MediaRepository, MIGRATOR};
use imgvault_storage::{LocalFileBackend, RemoteObjectBackend};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tempfile::TempDir;

pub const PUBLIC_HOST: &str = "cdn.example.com";

/// Body limit used by test configs.
pub const TEST_MAX_FILE_SIZE_BYTES: usize = 2 * 1024 * 1024;

/// Test application: server plus the resources it owns.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: Option<TempDir>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config(storage_backend: StorageBackend, local_storage_path: &str) -> Config {
    Config {
        server_port: 4000,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        max_file_size_bytes: TEST_MAX_FILE_SIZE_BYTES,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        storage_backend,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        cdn_public_host: Some(PUBLIC_HOST.to_string()),
        local_storage_path: local_storage_path.to_string(),
        local_storage_base_url: "http://localhost:4000/api/v1/media".to_string(),
    }
}

/// Setup test app over an in-memory object store and SQLite index.
pub async fn setup_test_app() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open test database");
    MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let config = create_test_config(StorageBackend::Memory, "imgs");
    let media = MediaRepository::new(
        Arc::new(RemoteObjectBackend::in_memory(PUBLIC_HOST.to_string())),
        Arc::new(MediaRecordRepository::new(pool.clone())),
    );

    build(config, media, Some(pool), None).await
}

/// Setup test app over the local file backend in a temporary directory.
pub async fn setup_local_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let root = temp_dir.path().join("imgs");
    let config = create_test_config(
        StorageBackend::Local,
        root.to_str().expect("temp path is valid UTF-8"),
    );

    let files = LocalFileBackend::new(&root, config.local_storage_base_url.clone());
    let media = MediaRepository::new(
        Arc::new(files.clone()),
        Arc::new(DirectoryIndex::new(files)),
    );

    build(config, media, None, Some(temp_dir)).await
}

async fn build(
    config: Config,
    media: MediaRepository,
    db_pool: Option<sqlx::SqlitePool>,
    temp_dir: Option<TempDir>,
) -> TestApp {
    media.init().await.expect("Failed to initialize storage");

    let state = Arc::new(AppState {
        media,
        config: config.clone(),
        db_pool,
    });
    let app = routes::setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}
