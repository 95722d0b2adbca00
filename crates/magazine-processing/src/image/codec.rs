//! Decode and encode steps of the derivative pipeline.
//!
//! Everything here is synchronous and CPU-bound; callers on the async runtime
//! run it through `tokio::task::spawn_blocking`.

use super::format::ImageKind;
use super::resize::{ImageResize, ResizeDimensions};
use super::ImageError;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;

/// JPEG quality used when re-encoding thumbnails
pub const JPEG_QUALITY: u8 = 75;

/// Largest width or height libwebp can encode
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Compression effort for lossless WebP (libwebp's default)
const WEBP_LOSSLESS_EFFORT: f32 = 75.0;

/// What to do to an image before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSpec {
    /// Resize to this width, keeping the aspect ratio
    pub resize_width: Option<u32>,
    /// Encode as lossless WebP instead of the source format
    pub lossless_web: bool,
}

/// Decode an image whose format is given by its dot-prefixed extension.
pub fn decode(data: &[u8], extension: &str) -> Result<DynamicImage, ImageError> {
    let kind = ImageKind::from_extension(extension)
        .ok_or_else(|| ImageError::UnsupportedExtension(extension.to_string()))?;

    let reader = ImageReader::with_format(Cursor::new(data), kind.image_format());
    reader.decode().map_err(ImageError::Decode)
}

/// Re-encode as JPEG or PNG, matching `extension`.
pub fn encode_original_format(img: &DynamicImage, extension: &str) -> Result<Vec<u8>, ImageError> {
    let kind = ImageKind::from_extension(extension)
        .ok_or_else(|| ImageError::UnsupportedExtension(extension.to_string()))?;

    let mut buffer = Vec::new();
    match kind {
        ImageKind::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
            rgb.write_with_encoder(encoder)
                .map_err(|e| ImageError::Encode(e.to_string()))?;
        }
        ImageKind::Png => {
            img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
                .map_err(|e| ImageError::Encode(e.to_string()))?;
        }
    }

    Ok(buffer)
}

/// Re-encode as lossless WebP regardless of the source format.
pub fn encode_lossless_web(img: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageError::Encode("image has no pixels".to_string()));
    }
    if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(ImageError::Encode(format!(
            "{}x{} exceeds the WebP limit of {} pixels per side",
            width, height, WEBP_MAX_DIMENSION
        )));
    }

    let rgba_img = img.to_rgba8();
    let encoder = webp::Encoder::from_rgba(&rgba_img, width, height);
    let webp_data = encoder
        .encode_simple(true, WEBP_LOSSLESS_EFFORT)
        .map_err(|e| ImageError::Encode(format!("WebP encoding failed: {:?}", e)))?;

    Ok(webp_data.to_vec())
}

/// Decode `data`, apply `spec`, and encode the result.
pub fn render_variant(
    data: &[u8],
    extension: &str,
    spec: VariantSpec,
) -> Result<Vec<u8>, ImageError> {
    let img = decode(data, extension)?;
    let img = match spec.resize_width {
        Some(width) => ImageResize::resize(&img, ResizeDimensions::width(width)),
        None => img,
    };

    if spec.lossless_web {
        encode_lossless_web(&img)
    } else {
        encode_original_format(&img, extension)
    }
}
