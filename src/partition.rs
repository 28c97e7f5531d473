//! Null/non-null partitioning of the joined collection.
//!
//! Regions with a reported value render with the palette; regions whose value
//! is zero or missing render as a flat "no data" layer. A count of exactly 0
//! is treated the same as a missing value, so true zeroes are visually
//! indistinguishable from absent data.

use crate::join::JoinedCollection;

/// Keep the regions whose value is present and non-zero.
pub fn select_non_null(joined: &JoinedCollection) -> JoinedCollection {
    JoinedCollection {
        scale: joined.scale,
        attribute: joined.attribute.clone(),
        crs: joined.crs.clone(),
        regions: joined
            .regions
            .iter()
            .filter(|region| matches!(region.value, Some(value) if value != 0))
            .cloned()
            .collect(),
    }
}

/// Keep the regions whose value is zero or missing.
pub fn select_null(joined: &JoinedCollection) -> JoinedCollection {
    JoinedCollection {
        scale: joined.scale,
        attribute: joined.attribute.clone(),
        crs: joined.crs.clone(),
        regions: joined
            .regions
            .iter()
            .filter(|region| region.value.unwrap_or(0) == 0)
            .cloned()
            .collect(),
    }
}
