//! imgvault database layer
//!
//! Metadata indexes and the media repository that keeps an object backend and
//! an index consistent with each other.

pub mod db;

pub use db::media::{DirectoryIndex, MediaRecordRepository, MediaRepository, MetadataIndex};
pub use db::{run_migrations, MIGRATOR};
