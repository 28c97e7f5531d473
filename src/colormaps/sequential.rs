//! Sequential palettes (low-to-high progression).
//!
//! These suit case counts, which progress from small to large with no
//! meaningful midpoint.

use colorgrad::Gradient;

/// Names of the sequential palettes, in menu order
pub const NAMES: &[&str] = &[
    "viridis", "plasma", "inferno", "magma", "cividis", "turbo", "blues", "greens", "oranges",
    "purples", "reds",
];

/// Look up a sequential gradient by name
pub fn gradient(name: &str) -> Option<Gradient> {
    match name {
        "viridis" => Some(colorgrad::viridis()),
        "plasma" => Some(colorgrad::plasma()),
        "inferno" => Some(colorgrad::inferno()),
        "magma" => Some(colorgrad::magma()),
        "cividis" => Some(colorgrad::cividis()),
        "turbo" => Some(colorgrad::turbo()),
        "blues" => Some(colorgrad::blues()),
        "greens" => Some(colorgrad::greens()),
        "oranges" => Some(colorgrad::oranges()),
        "purples" => Some(colorgrad::purples()),
        "reds" => Some(colorgrad::reds()),
        _ => None,
    }
}
