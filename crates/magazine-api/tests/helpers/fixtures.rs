//! Test fixtures: images generated in memory.

use axum_test::multipart::{MultipartForm, Part};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Encoded gradient image of the given size.
pub fn create_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 200])
    }));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode test image");
    buffer
}

pub fn create_test_jpeg() -> Vec<u8> {
    create_test_image(400, 200, ImageFormat::Jpeg)
}

/// Multipart form with one file part.
pub fn file_form(field: &str, file_name: &str, data: Vec<u8>, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part(field, Part::bytes(data).file_name(file_name).mime_type(mime))
}
