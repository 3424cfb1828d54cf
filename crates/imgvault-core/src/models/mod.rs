//! Data models for the application

mod media_record;

pub use media_record::{MediaRecord, MediaRecordResponse};
