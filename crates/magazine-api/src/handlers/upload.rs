use axum::{Extension, Json};
use magazine_core::AppError;
use magazine_processing::UploadedFiles;
use serde::Serialize;

use crate::error::HttpAppError;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Storage key of the stored file
    pub url: String,
}

/// Upload file handler
///
/// The upload middleware has already stored the files; this answers with the
/// key of the first one.
///
/// # Errors
/// - `AppError::BadRequest` - No configured field carried a file
pub async fn upload_file(
    Extension(uploaded): Extension<UploadedFiles>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let first = uploaded
        .first()
        .ok_or_else(|| HttpAppError(AppError::BadRequest("no image uploaded".to_string())))?;

    tracing::info!(
        field = %first.field_name,
        key = %first.storage_key,
        artifact_id = %first.artifact_id,
        size_bytes = first.size_bytes,
        "File uploaded"
    );

    Ok(Json(UploadResponse {
        url: first.storage_key.clone(),
    }))
}
