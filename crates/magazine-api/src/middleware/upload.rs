//! Upload middleware
//!
//! Reads the multipart body, runs the route's [`UploadOrchestrator`] and hands
//! the stored files to the handler through the request extensions. The body is
//! consumed here; the handler sees an empty body.

use crate::error::HttpAppError;
use crate::middleware::get_request_id;
use axum::{
    body::Body,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use magazine_core::AppError;
use magazine_processing::{FormFile, FormFiles, UploadError, UploadOrchestrator};

pub async fn upload_middleware(
    State(uploads): State<UploadOrchestrator>,
    request: Request,
    next: Next,
) -> Result<Response, HttpAppError> {
    let request_id = get_request_id(&request).unwrap_or_default();
    let (parts, body) = request.into_parts();

    let files = match Multipart::from_request(Request::from_parts(parts.clone(), body), &()).await
    {
        Ok(multipart) => read_form_files(multipart).await?,
        Err(rejection) => {
            tracing::debug!(
                request_id = %request_id,
                reason = %rejection.body_text(),
                "Request is not multipart, nothing to upload"
            );
            FormFiles::new()
        }
    };

    let uploaded = uploads.run(&files).await.map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Upload failed");
        HttpAppError::from(e)
    })?;

    tracing::debug!(
        request_id = %request_id,
        files = uploaded.len(),
        "Upload middleware stored files"
    );

    let mut request = Request::from_parts(parts, Body::empty());
    request.extensions_mut().insert(uploaded);

    Ok(next.run(request).await)
}

/// Collect file parts by field name; parts without a file name are ignored.
async fn read_form_files(mut multipart: Multipart) -> Result<FormFiles, HttpAppError> {
    let mut files = FormFiles::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await.map_err(multipart_error)?;

        if !files.insert(field_name.clone(), FormFile::new(file_name, data)) {
            tracing::debug!(field = %field_name, "Ignoring repeated file part");
        }
    }

    Ok(files)
}

fn multipart_error(err: MultipartError) -> HttpAppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return HttpAppError(AppError::PayloadTooLarge(
            "Request body exceeds the upload size limit".to_string(),
        ));
    }
    HttpAppError::from(UploadError::FileRead(err.body_text()))
}
