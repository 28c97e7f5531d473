//! Image inspection utilities for testing.
//!
//! This module provides helper functions for checking the legend PNGs
//! returned by the snowmap server.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::error::Error;

/// Detect the format of an image from its bytes
pub fn detect_image_format(bytes: &[u8]) -> Result<ImageFormat, Box<dyn Error>> {
    Ok(image::guess_format(bytes)?)
}

/// Assert that an image has the expected dimensions
pub fn assert_image_dimensions(
    img: &DynamicImage,
    expected_width: u32,
    expected_height: u32,
) -> Result<(), Box<dyn Error>> {
    let (width, height) = img.dimensions();
    if width != expected_width || height != expected_height {
        return Err(format!(
            "Unexpected image dimensions: expected {}x{}, got {}x{}",
            expected_width, expected_height, width, height
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        let img = DynamicImage::new_rgba8(4, 4);
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();

        let format = detect_image_format(&bytes.into_inner()).unwrap();
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn test_assert_image_dimensions() {
        let img = DynamicImage::new_rgba8(40, 320);
        assert!(assert_image_dimensions(&img, 40, 320).is_ok());
        assert!(assert_image_dimensions(&img, 41, 320).is_err());
    }
}
