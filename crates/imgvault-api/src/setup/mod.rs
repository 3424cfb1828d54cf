//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use imgvault_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(&config.environment)?;

    tracing::info!(
        storage_backend = %config.storage_backend,
        "Configuration loaded and validated successfully"
    );

    // The local backend keeps no metadata database.
    let db_pool = if config.storage_backend.uses_metadata_database() {
        Some(database::setup_database(&config).await?)
    } else {
        None
    };

    let media = storage::setup_media_repository(&config, db_pool.clone()).await?;

    let state = Arc::new(AppState {
        media,
        config: config.clone(),
        db_pool,
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
