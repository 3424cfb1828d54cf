//! imgvault Core Library
//!
//! This crate provides the domain types shared by every imgvault component:
//! the category namespacer, upload validation policy, the media record model,
//! the error taxonomy, and environment configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod namespace;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::MediaRecord;
pub use namespace::Category;
pub use storage_types::StorageBackend;
pub use validation::{select_strategy, validate_upload, UploadStrategy, ValidationError};
