//! Upload validation and upload-strategy policy.
//!
//! Both checks run before any backend is touched, on create and update alike.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

/// Largest blob, in bytes, sent with a single standard upload.
pub const STANDARD_UPLOAD_MAX_BYTES: usize = 1_024_000;

/// How a backend should transfer a blob.
///
/// Both strategies produce the same stored object; they only differ in how
/// the bytes are streamed to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStrategy {
    Standard,
    Chunked,
}

impl Display for UploadStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadStrategy::Standard => write!(f, "standard"),
            UploadStrategy::Chunked => write!(f, "chunked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Failed to store empty image {0}")]
    EmptyFile(String),

    #[error("Image {0} has an invalid name")]
    InvalidFilename(String),
}

/// Reject empty blobs and filenames containing a parent-directory sequence.
pub fn validate_upload(data: &[u8], filename: &str) -> Result<(), ValidationError> {
    if data.is_empty() {
        return Err(ValidationError::EmptyFile(filename.to_string()));
    }
    if filename.contains("..") {
        return Err(ValidationError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

/// Pick the upload strategy for a blob of `size` bytes.
pub fn select_strategy(size: usize) -> UploadStrategy {
    if size <= STANDARD_UPLOAD_MAX_BYTES {
        UploadStrategy::Standard
    } else {
        UploadStrategy::Chunked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_blob() {
        let result = validate_upload(&[], "photo.png");
        assert_eq!(
            result,
            Err(ValidationError::EmptyFile("photo.png".to_string()))
        );
    }

    #[test]
    fn test_rejects_traversal_filename() {
        let result = validate_upload(b"data", "../../etc/passwd");
        assert!(matches!(result, Err(ValidationError::InvalidFilename(_))));

        let result = validate_upload(b"data", "photo..png");
        assert!(matches!(result, Err(ValidationError::InvalidFilename(_))));
    }

    #[test]
    fn test_accepts_empty_filename_with_content() {
        assert!(validate_upload(b"data", "").is_ok());
        assert!(validate_upload(b"data", "photo.png").is_ok());
    }

    #[test]
    fn test_strategy_threshold() {
        assert_eq!(select_strategy(1), UploadStrategy::Standard);
        assert_eq!(select_strategy(1_024_000), UploadStrategy::Standard);
        assert_eq!(select_strategy(1_024_001), UploadStrategy::Chunked);
    }
}
