//! Media record repository: the SQLite-backed metadata index.

use async_trait::async_trait;
use imgvault_core::{AppError, MediaRecord};
use sqlx::{Sqlite, SqlitePool};

use super::index::MetadataIndex;

const RECORD_COLUMNS: &str = "id, public_id, url, secure_url, uploaded_at, updated_at";

/// Repository for the media_records table.
#[derive(Clone)]
pub struct MediaRecordRepository {
    pool: SqlitePool,
}

impl MediaRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "media_records", db.operation = "insert", public_id = %record.public_id))]
    async fn insert(&self, record: &MediaRecord) -> Result<MediaRecord, AppError> {
        let saved = sqlx::query_as::<Sqlite, MediaRecord>(&format!(
            r#"
            INSERT INTO media_records (public_id, url, secure_url, uploaded_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {}
            "#,
            RECORD_COLUMNS
        ))
        .bind(&record.public_id)
        .bind(&record.url)
        .bind(&record.secure_url)
        .bind(record.uploaded_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "media_records", db.operation = "update", db.record_id = id))]
    async fn update(&self, id: i64, record: &MediaRecord) -> Result<MediaRecord, AppError> {
        let saved = sqlx::query_as::<Sqlite, MediaRecord>(&format!(
            r#"
            UPDATE media_records
            SET public_id = ?1, url = ?2, secure_url = ?3, updated_at = ?4
            WHERE id = ?5
            RETURNING {}
            "#,
            RECORD_COLUMNS
        ))
        .bind(&record.public_id)
        .bind(&record.url)
        .bind(&record.secure_url)
        .bind(record.updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        saved.ok_or_else(|| AppError::NotFound(format!("Media record {} not found", id)))
    }
}

#[async_trait]
impl MetadataIndex for MediaRecordRepository {
    #[tracing::instrument(skip(self), fields(db.table = "media_records", db.operation = "select"))]
    async fn find_by_public_id(&self, public_id: &str) -> Result<Option<MediaRecord>, AppError> {
        let record = sqlx::query_as::<Sqlite, MediaRecord>(&format!(
            "SELECT {} FROM media_records WHERE public_id = ?1",
            RECORD_COLUMNS
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn save(&self, record: MediaRecord) -> Result<MediaRecord, AppError> {
        match record.id {
            None => self.insert(&record).await,
            Some(id) => self.update(id, &record).await,
        }
    }

    #[tracing::instrument(skip(self, record), fields(db.table = "media_records", db.operation = "delete", public_id = %record.public_id))]
    async fn delete(&self, record: &MediaRecord) -> Result<(), AppError> {
        let query = match record.id {
            Some(id) => sqlx::query::<Sqlite>("DELETE FROM media_records WHERE id = ?1").bind(id),
            None => sqlx::query::<Sqlite>("DELETE FROM media_records WHERE public_id = ?1")
                .bind(record.public_id.clone()),
        };
        let rows_affected = query.execute(&self.pool).await?.rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "Media record {} not found",
                record.public_id
            )));
        }
        Ok(())
    }
}
