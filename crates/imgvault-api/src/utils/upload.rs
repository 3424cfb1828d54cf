use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use imgvault_core::AppError;

/// File received in a multipart upload.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Bytes,
    pub filename: String,
}

/// Extract the file from a multipart form.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<UploadedFile, AppError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_large(max_size)
        } else {
            AppError::BadRequest(format!("Failed to read multipart: {}", e))
        }
    })? {
        if field.name() != Some("file") {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::BadRequest(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                too_large(max_size)
            } else {
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            }
        })?;

        if data.len() > max_size {
            return Err(too_large(max_size));
        }
        upload = Some(UploadedFile { data, filename });
    }

    upload.ok_or_else(|| AppError::BadRequest("No file provided in field 'file'".to_string()))
}

fn too_large(max_size: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File size exceeds maximum allowed size of {} MB",
        max_size / 1024 / 1024
    ))
}
