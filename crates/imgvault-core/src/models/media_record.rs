use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use crate::namespace::Category;

/// Metadata kept for one stored object.
///
/// `public_id` is the category-qualified id (e.g. `user/abc123`) and is unique
/// across the index. `id` is the index's own key; it is `None` until the record
/// has been persisted, and stays `None` for indexes without a row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MediaRecord {
    pub id: Option<i64>,
    pub public_id: String,
    pub url: String,
    pub secure_url: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MediaRecord {
    /// Build a record that has not been saved yet.
    pub fn new(public_id: String, url: String, secure_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            public_id,
            url,
            secure_url,
            uploaded_at: now,
            updated_at: now,
        }
    }

    /// Point the record at a replacement object.
    pub fn replace(&mut self, public_id: String, url: String, secure_url: String) {
        self.public_id = public_id;
        self.url = url;
        self.secure_url = secure_url;
        self.updated_at = Utc::now();
    }
}

/// Media record as returned by the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaRecordResponse {
    /// Id as handed to callers, without the category prefix
    pub id: String,
    pub public_id: String,
    pub url: String,
    pub secure_url: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MediaRecordResponse {
    pub fn from_record(record: MediaRecord, category: Category) -> Self {
        Self {
            id: category.strip(&record.public_id).to_string(),
            public_id: record.public_id,
            url: record.url,
            secure_url: record.secure_url,
            uploaded_at: record.uploaded_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_updates_fields() {
        let mut record = MediaRecord::new(
            "user/old".to_string(),
            "http://cdn/user/old".to_string(),
            "https://cdn/user/old".to_string(),
        );
        let uploaded_at = record.uploaded_at;
        record.replace(
            "user/new".to_string(),
            "http://cdn/user/new".to_string(),
            "https://cdn/user/new".to_string(),
        );
        assert_eq!(record.public_id, "user/new");
        assert_eq!(record.url, "http://cdn/user/new");
        assert_eq!(record.secure_url, "https://cdn/user/new");
        assert_eq!(record.uploaded_at, uploaded_at);
        assert!(record.updated_at >= uploaded_at);
    }

    #[test]
    fn test_response_strips_category_prefix() {
        let record = MediaRecord::new(
            "user/abc".to_string(),
            "http://cdn/user/abc".to_string(),
            "https://cdn/user/abc".to_string(),
        );
        let response = MediaRecordResponse::from_record(record, Category::User);
        assert_eq!(response.id, "abc");
        assert_eq!(response.public_id, "user/abc");
    }
}
