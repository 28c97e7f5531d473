//! Merging statistics onto boundary geometry.
//!
//! The joiner combines a boundary collection and a projected statistics table
//! on the scale's key column with outer-merge semantics: regions present on
//! either side are kept when possible, padded with a missing value otherwise.
//! Rows without geometry cannot be rendered and are dropped, so the result
//! covers exactly the regions for which geometry exists. The source
//! coordinate reference system is re-asserted on the output.

use geojson::{Geometry, JsonObject, JsonValue};
use std::collections::HashMap;

use crate::geometry::BoundaryCollection;
use crate::stats::StatsTable;
use crate::survey::Scale;

/// One renderable region: geometry is always present, the value may not be.
#[derive(Debug, Clone)]
pub struct JoinedRegion {
    /// Join key, when the boundary feature carries the key column
    pub key: Option<String>,
    pub geometry: Geometry,
    /// Descriptive fields from the boundary feature (name, FIPS codes, ...)
    pub properties: JsonObject,
    /// Case count; `None` for regions absent from the selected month
    pub value: Option<u64>,
}

/// The joined collection for one selection.
#[derive(Debug, Clone)]
pub struct JoinedCollection {
    pub scale: Scale,
    pub attribute: String,
    pub crs: Option<JsonValue>,
    pub regions: Vec<JoinedRegion>,
}

impl JoinedCollection {
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Sort regions ascending by value; rows keep insertion order on ties.
    /// Missing values sort as 0.
    pub fn sort_by_value_ascending(&mut self) {
        self.regions.sort_by_key(|region| region.value.unwrap_or(0));
    }
}

/// Merge boundaries and statistics on the scale's key column.
///
/// Statistics rows without a matching boundary end up with null geometry
/// under outer-merge semantics and are dropped along with any boundary
/// feature that has no geometry, which leaves geometry-bearing rows only.
pub fn join_attributes(
    boundaries: &BoundaryCollection,
    stats: &StatsTable,
    scale: Scale,
) -> JoinedCollection {
    let values: HashMap<&str, u64> = stats
        .rows
        .iter()
        .map(|row| (row.region.as_str(), row.value))
        .collect();

    let mut regions = Vec::with_capacity(boundaries.len());
    for feature in &boundaries.features {
        let geometry = match &feature.geometry {
            Some(geometry) => geometry.clone(),
            None => continue,
        };

        let properties = feature.properties.clone().unwrap_or_default();
        let key = properties
            .get(scale.key_column())
            .and_then(|value| value.as_str())
            .map(|value| value.to_string());
        let value = key.as_deref().and_then(|key| values.get(key)).copied();

        regions.push(JoinedRegion {
            key,
            geometry,
            properties,
            value,
        });
    }

    JoinedCollection {
        scale,
        attribute: stats.attribute.clone(),
        crs: boundaries.crs.clone(),
        regions,
    }
}
