//! HTTP error response conversion
//!
//! Handlers and middleware return `Result<_, HttpAppError>`. `UploadError`
//! converts into `AppError` variants that keep the caller-mistake vs
//! infrastructure-failure distinction, so the status code follows from the
//! variant.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use magazine_core::{AppError, ErrorMetadata, LogLevel};
use magazine_processing::UploadError;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client (e.g., "Retry the upload")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// The error body without `details` and `error_type`.
///
/// Every error response carries it as an extension; in production
/// [`error_details_middleware`](crate::middleware::error_details_middleware)
/// swaps it in for the full body.
#[derive(Debug, Clone)]
pub struct PublicErrorBody(pub ErrorResponse);

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from magazine-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<UploadError> for HttpAppError {
    fn from(err: UploadError) -> Self {
        let app_error = match err {
            e @ UploadError::ExtensionMismatch { .. } => AppError::ExtensionMismatch(e.to_string()),
            e @ UploadError::ThumbnailExtensionMismatch { .. } => {
                AppError::ThumbnailExtensionMismatch(e.to_string())
            }
            UploadError::FileRead(msg) => AppError::FileRead(msg),
            UploadError::Image(e) => AppError::ImageProcessing(e.to_string()),
            // A storage failure while uploading is never the caller's fault
            UploadError::Storage(e) => AppError::Storage(e.to_string()),
            UploadError::TaskFailed(msg) => AppError::Internal(msg),
        };
        HttpAppError(app_error)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let public = ErrorResponse {
            error: app_error.client_message(),
            details: None,
            error_type: None,
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
            suggested_action: app_error.suggested_action().map(String::from),
        };

        // Sensitive errors never expose details
        let body = if app_error.is_sensitive() {
            public.clone()
        } else {
            ErrorResponse {
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                ..public.clone()
            }
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(PublicErrorBody(public));
        response
    }
}
