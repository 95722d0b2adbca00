use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Resampling filter used for every derivative.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Target dimensions for a resize; a height of zero is derived from the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDimensions {
    pub width: u32,
    pub height: u32,
}

impl ResizeDimensions {
    /// Resize to `width`, keeping the aspect ratio
    pub fn width(width: u32) -> Self {
        Self { width, height: 0 }
    }
}

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Calculate target dimensions based on resize specification
    pub fn calculate_dimensions(
        orig_width: u32,
        orig_height: u32,
        dimensions: ResizeDimensions,
    ) -> (u32, u32) {
        let width = dimensions.width.max(1);
        if dimensions.height > 0 {
            return (width, dimensions.height);
        }
        if orig_width == 0 {
            return (width, 1);
        }

        let aspect_ratio = orig_height as f64 / orig_width as f64;
        let height = (width as f64 * aspect_ratio).round() as u32;
        (width, height.max(1))
    }

    /// Resize image to the given width, deriving the height when it is zero
    pub fn resize(img: &DynamicImage, dimensions: ResizeDimensions) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::calculate_dimensions(orig_width, orig_height, dimensions);
        img.resize_exact(width, height, RESIZE_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_calculate_dimensions_width_only() {
        let (w, h) = ImageResize::calculate_dimensions(400, 200, ResizeDimensions::width(100));
        assert_eq!((w, h), (100, 50));

        let (w, h) = ImageResize::calculate_dimensions(1000, 750, ResizeDimensions::width(100));
        assert_eq!((w, h), (100, 75));
    }

    #[test]
    fn test_calculate_dimensions_both_specified() {
        let dims = ResizeDimensions {
            width: 120,
            height: 30,
        };
        assert_eq!(ImageResize::calculate_dimensions(400, 200, dims), (120, 30));
    }

    #[test]
    fn test_calculate_dimensions_never_zero() {
        // Very wide images still get a one pixel high thumbnail
        let (w, h) = ImageResize::calculate_dimensions(10_000, 10, ResizeDimensions::width(100));
        assert_eq!((w, h), (100, 1));
    }

    #[test]
    fn test_resize_preserves_aspect_ratio() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 200, Rgb([200, 10, 10])));
        let resized = ImageResize::resize(&img, ResizeDimensions::width(100));
        assert_eq!(resized.dimensions(), (100, 50));
    }

    #[test]
    fn test_resize_upscales() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 20, Rgb([0, 0, 0])));
        let resized = ImageResize::resize(&img, ResizeDimensions::width(100));
        assert_eq!(resized.dimensions(), (100, 40));
    }
}
