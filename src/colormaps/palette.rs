//! Named palette registry and discrete sampling.

use colorgrad::Gradient;
use once_cell::sync::Lazy;

use super::{diverging, sequential};
use crate::error::{Result, SnowmapError};

/// An RGB triple as attached to rendered regions
pub type Rgb = [u8; 3];

/// Every palette name, sequential families first
static ALL_NAMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    sequential::NAMES
        .iter()
        .chain(diverging::NAMES.iter())
        .copied()
        .collect()
});

/// Names of all available palettes, in menu order
pub fn available_palettes() -> &'static [&'static str] {
    &ALL_NAMES
}

/// Get a continuous gradient by palette name
pub fn get_gradient(name: &str) -> Result<Gradient> {
    let name = name.to_lowercase();
    sequential::gradient(&name)
        .or_else(|| diverging::gradient(&name))
        .ok_or_else(|| SnowmapError::InvalidParameter {
            param: "palette".to_string(),
            message: format!(
                "Unknown palette: {}. Available palettes: {}",
                name,
                available_palettes().join(", ")
            ),
        })
}

/// Sample `n_colors` evenly spaced discrete colors from a named palette.
pub fn get_palette(name: &str, n_colors: usize) -> Result<Vec<Rgb>> {
    if n_colors == 0 {
        return Err(SnowmapError::InvalidParameter {
            param: "colors".to_string(),
            message: "Palette must contain at least one color".to_string(),
        });
    }

    let gradient = get_gradient(name)?;
    Ok(gradient
        .colors(n_colors)
        .iter()
        .map(|color| {
            let [r, g, b, _] = color.to_rgba8();
            [r, g, b]
        })
        .collect())
}
