//! Database repositories for data access layer
//!
//! `media/` holds the metadata indexes and the media repository built on them.

use imgvault_core::AppError;
use sqlx::migrate::Migrator;
use sqlx::SqlitePool;

pub mod media;

/// Embedded schema migrations for the metadata database.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply pending migrations to `pool`.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to run migrations: {}", e)))?;
    tracing::info!("Database migrations applied");
    Ok(())
}
