use image::ImageFormat;

/// Image formats the derivative pipeline can decode and re-encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Map a dot-prefixed extension to an image kind.
    ///
    /// Matching is case-sensitive: `.JPG` is not recognized.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".jpg" | ".jpeg" => Some(ImageKind::Jpeg),
            ".png" => Some(ImageKind::Png),
            _ => None,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            ImageKind::Jpeg => ImageFormat::Jpeg,
            ImageKind::Png => ImageFormat::Png,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
        }
    }
}
