//! imgvault Storage Library
//!
//! This crate provides the binary object backend abstraction and its two
//! implementations: a remote object store (S3-compatible or in-process) and a
//! local directory holding one file per object.
//!
//! # Object key format
//!
//! Objects are addressed by an [`ObjectKey`]: a category plus a 20-character
//! alphanumeric raw id. The remote backend stores the object at
//! `{category prefix}{raw id}` (e.g. `user/AbC...`); the local backend ignores
//! the category and writes `{root}/{raw id}.jpg`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-remote")]
pub mod remote;
pub mod traits;

// Re-export commonly used types
pub use factory::create_backend;
pub use imgvault_core::StorageBackend;
pub use keys::{generate_raw_id, ObjectKey, RAW_ID_LEN};
#[cfg(feature = "storage-local")]
pub use local::LocalFileBackend;
#[cfg(feature = "storage-remote")]
pub use remote::RemoteObjectBackend;
pub use traits::{ObjectBackend, StorageError, StorageResult, UploadOptions, UploadOutcome};
