//! Image derivative pipeline
//!
//! Pure transformations used to build upload derivatives:
//! - decoding JPEG/PNG input (format)
//! - aspect-preserving Lanczos resize (resize)
//! - re-encoding in the source format or as lossless WebP (codec)

pub mod codec;
pub mod format;
pub mod resize;

pub use codec::{decode, encode_lossless_web, encode_original_format, render_variant, VariantSpec};
pub use format::ImageKind;
pub use resize::{ImageResize, ResizeDimensions};

use thiserror::Error;

/// Derivative pipeline errors
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("unsupported image extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(String),
}
