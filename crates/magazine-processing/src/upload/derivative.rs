use crate::image::VariantSpec;
use uuid::Uuid;

/// One object written to storage for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Derivative {
    /// The uploaded bytes, unchanged
    Original,
    /// Lossless WebP copy
    WebVariant,
    /// Resized copy in the source format
    Thumbnail,
    /// Resized lossless WebP copy
    ThumbnailWebVariant,
}

impl Derivative {
    /// Derivatives to write for a file, original first.
    ///
    /// `is_image` is whether the extension is one the image pipeline can decode;
    /// other files only get their original stored.
    pub fn plan(is_image: bool, webp: bool, thumbnail: bool) -> Vec<Derivative> {
        let mut derivatives = vec![Derivative::Original];
        if !is_image {
            return derivatives;
        }
        if webp {
            derivatives.push(Derivative::WebVariant);
        }
        if thumbnail {
            derivatives.push(Derivative::Thumbnail);
            if webp {
                derivatives.push(Derivative::ThumbnailWebVariant);
            }
        }
        derivatives
    }

    /// Object file name for this derivative
    pub fn file_name(self, artifact_id: Uuid, extension: &str) -> String {
        match self {
            Derivative::Original => format!("{}{}", artifact_id, extension),
            Derivative::WebVariant => format!("{}.webp", artifact_id),
            Derivative::Thumbnail => format!("{}_thumb{}", artifact_id, extension),
            Derivative::ThumbnailWebVariant => format!("{}_thumb.webp", artifact_id),
        }
    }

    /// Image work needed before upload; `None` for the original
    pub fn variant_spec(self, thumbnail_width: u32) -> Option<VariantSpec> {
        match self {
            Derivative::Original => None,
            Derivative::WebVariant => Some(VariantSpec {
                resize_width: None,
                lossless_web: true,
            }),
            Derivative::Thumbnail => Some(VariantSpec {
                resize_width: Some(thumbnail_width),
                lossless_web: false,
            }),
            Derivative::ThumbnailWebVariant => Some(VariantSpec {
                resize_width: Some(thumbnail_width),
                lossless_web: true,
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Derivative::Original => "original",
            Derivative::WebVariant => "web",
            Derivative::Thumbnail => "thumbnail",
            Derivative::ThumbnailWebVariant => "thumbnail_web",
        }
    }
}
