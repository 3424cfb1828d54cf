//! Validation modules

pub mod upload;

pub use upload::{
    select_strategy, validate_upload, UploadStrategy, ValidationError, STANDARD_UPLOAD_MAX_BYTES,
};
