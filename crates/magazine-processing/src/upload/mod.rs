//! Upload pipeline: validate → fan out derivatives → store → join.

pub mod artifact;
pub mod config;
pub mod derivative;
pub mod error;
pub mod files;
pub mod orchestrator;

pub use artifact::{UploadedArtifact, UploadedFiles};
pub use config::UploadConfig;
pub use derivative::Derivative;
pub use error::UploadError;
pub use files::{FormFile, FormFiles};
pub use orchestrator::{UploadOptions, UploadOrchestrator, DEFAULT_MAX_CONCURRENCY};
