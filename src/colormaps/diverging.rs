//! Diverging palettes (two hues meeting at a midpoint).

use colorgrad::Gradient;

/// Names of the diverging palettes, in menu order
pub const NAMES: &[&str] = &["spectral", "rdbu", "rdylbu", "rdylgn", "brbg", "piyg", "prgn", "puor"];

/// Look up a diverging gradient by name
pub fn gradient(name: &str) -> Option<Gradient> {
    match name {
        "spectral" => Some(colorgrad::spectral()),
        "rdbu" => Some(colorgrad::rd_bu()),
        "rdylbu" => Some(colorgrad::rd_yl_bu()),
        "rdylgn" => Some(colorgrad::rd_yl_gn()),
        "brbg" => Some(colorgrad::br_bg()),
        "piyg" => Some(colorgrad::pi_yg()),
        "prgn" => Some(colorgrad::pr_gn()),
        "puor" => Some(colorgrad::pu_or()),
        _ => None,
    }
}
