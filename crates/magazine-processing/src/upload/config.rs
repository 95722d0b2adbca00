//! Per-field upload configuration.

use serde::Serialize;

/// Default multipart field name
pub const DEFAULT_FIELD_NAME: &str = "file";
/// Default thumbnail width in pixels
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 100;
/// Extensions accepted when none are configured
pub const DEFAULT_EXTENSIONS: [&str; 3] = [".jpeg", ".png", ".jpg"];

/// Upload rules for one multipart field.
///
/// Builder methods take `&self` and return a modified copy, so a config can be
/// shared between requests without any of them seeing another's changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadConfig {
    field_name: String,
    storage_prefix: String,
    allowed_extensions: Vec<String>,
    thumbnail_enabled: bool,
    thumbnail_width: u32,
    webp_variant_enabled: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            field_name: DEFAULT_FIELD_NAME.to_string(),
            storage_prefix: String::new(),
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            thumbnail_enabled: false,
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            webp_variant_enabled: false,
        }
    }
}

impl UploadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the file from `field_name`
    pub fn field(&self, field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..self.clone()
        }
    }

    /// Store objects under `prefix`
    pub fn folder(&self, prefix: impl Into<String>) -> Self {
        Self {
            storage_prefix: prefix.into(),
            ..self.clone()
        }
    }

    /// Replace the allowed extensions (dot-prefixed, case-sensitive)
    pub fn extensions<I, S>(&self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_extensions: extensions.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    pub fn thumbnail(&self, enabled: bool) -> Self {
        Self {
            thumbnail_enabled: enabled,
            ..self.clone()
        }
    }

    /// Thumbnail width in pixels; zero is raised to one
    pub fn thumbnail_width(&self, width: u32) -> Self {
        Self {
            thumbnail_width: width.max(1),
            ..self.clone()
        }
    }

    /// Also store a lossless WebP copy of each image (and of its thumbnail)
    pub fn webp(&self, enabled: bool) -> Self {
        Self {
            webp_variant_enabled: enabled,
            ..self.clone()
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn storage_prefix(&self) -> &str {
        &self.storage_prefix
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn thumbnail_enabled(&self) -> bool {
        self.thumbnail_enabled
    }

    pub fn thumbnail_width_px(&self) -> u32 {
        self.thumbnail_width
    }

    pub fn webp_enabled(&self) -> bool {
        self.webp_variant_enabled
    }

    /// Exact, case-sensitive match against the allowed extensions
    pub fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == extension)
    }
}
