//! Magazine Media Processing Library
//!
//! This crate provides the image derivative pipeline (web-format copies and
//! thumbnails) and the upload orchestrator that stores uploaded files together
//! with their derivatives.

pub mod image;
pub mod upload;

// Re-export commonly used types
pub use crate::image::{ImageError, ImageKind, ImageResize, ResizeDimensions, VariantSpec};
pub use upload::{
    Derivative, FormFile, FormFiles, UploadConfig, UploadError, UploadOptions,
    UploadOrchestrator, UploadedArtifact, UploadedFiles,
};
