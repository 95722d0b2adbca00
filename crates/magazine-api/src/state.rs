//! Application state shared by handlers and middleware.

use magazine_core::Config;
use magazine_processing::UploadOrchestrator;
use magazine_storage::{Storage, UrlSigner};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    /// Signs stored-object references; injected instead of a process-wide client
    pub signer: Arc<dyn UrlSigner>,
    /// Upload pipeline for `POST /upload`
    pub uploads: UploadOrchestrator,
}
