//! Palette handling for choropleth rendering.
//!
//! This module provides the named palette registry, discrete palette
//! sampling, rank-bucket color assignment, and the legend bar image.

pub mod bucketer;
pub mod diverging;
pub mod legend;
pub mod palette;
pub mod sequential;

pub use bucketer::{bucket_colors, ColoredCollection, ColoredRegion};
pub use legend::render_legend;
pub use palette::{available_palettes, get_gradient, get_palette, Rgb};
