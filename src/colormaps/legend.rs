//! Vertical color-legend bar rendering.
//!
//! The legend stacks the palette's discrete colors bottom-up, matching the
//! ascending sort of the bucketed regions: the first color sits at the
//! bottom of the bar next to the minimum value.

use image::{ImageBuffer, RgbaImage};

use super::palette::Rgb;
use crate::error::{Result, SnowmapError};

/// Render a vertical legend bar for a discrete palette.
pub fn render_legend(palette: &[Rgb], width: u32, height: u32) -> Result<RgbaImage> {
    if palette.is_empty() {
        return Err(SnowmapError::ImageGeneration {
            message: "Cannot render a legend for an empty palette".to_string(),
        });
    }
    if width == 0 || height == 0 {
        return Err(SnowmapError::ImageGeneration {
            message: format!("Invalid legend dimensions: {}x{}", width, height),
        });
    }

    let n_colors = palette.len() as u32;
    let mut img = ImageBuffer::new(width, height);

    for y in 0..height {
        // y = 0 is the top of the image; the last palette color goes there
        let band = ((height - 1 - y) * n_colors / height).min(n_colors - 1);
        let [r, g, b] = palette[band as usize];
        for x in 0..width {
            img.put_pixel(x, y, image::Rgba([r, g, b, 255]));
        }
    }

    Ok(img)
}
