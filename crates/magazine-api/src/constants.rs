//! API constants

/// Versioned API path prefix
pub const API_PREFIX: &str = "/api/v1";

/// Storage folder for files uploaded through the upload endpoint
pub const UPLOAD_FOLDER: &str = "docs_upload";

/// Message of the root endpoint
pub const API_UP_MESSAGE: &str = "Magazine API Up and Running";
