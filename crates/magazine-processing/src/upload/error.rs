use crate::image::ImageError;
use magazine_storage::StorageError;
use thiserror::Error;

/// Upload pipeline errors
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("file extension {extension:?} not allowed for field {field:?}")]
    ExtensionMismatch { field: String, extension: String },

    #[error("thumbnail not supported for extension {extension:?} in field {field:?}")]
    ThumbnailExtensionMismatch { field: String, extension: String },

    #[error("failed to read file: {0}")]
    FileRead(String),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("upload task failed: {0}")]
    TaskFailed(String),
}

impl UploadError {
    /// True for caller mistakes, false for infrastructure failures
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            UploadError::ExtensionMismatch { .. } | UploadError::ThumbnailExtensionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        let mismatch = UploadError::ExtensionMismatch {
            field: "file".to_string(),
            extension: ".gif".to_string(),
        };
        assert!(mismatch.is_client_error());

        let thumb = UploadError::ThumbnailExtensionMismatch {
            field: "file".to_string(),
            extension: ".pdf".to_string(),
        };
        assert!(thumb.is_client_error());
    }

    #[test]
    fn test_server_errors() {
        assert!(!UploadError::FileRead("eof".to_string()).is_client_error());
        assert!(!UploadError::TaskFailed("panicked".to_string()).is_client_error());
        assert!(
            !UploadError::Storage(StorageError::UploadFailed("503".to_string())).is_client_error()
        );
        assert!(!UploadError::Image(ImageError::Encode("x".to_string())).is_client_error());
    }

    #[test]
    fn test_storage_error_message_preserved() {
        let err = UploadError::from(StorageError::UploadFailed("bucket gone".to_string()));
        assert!(err.to_string().contains("bucket gone"));
    }
}
