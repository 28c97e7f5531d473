//! Boundary geometry loading.
//!
//! This module reads the static Census cartographic boundary files (state or
//! county polygons) into memory. Features are kept exactly as parsed,
//! including their property set and the file-level coordinate reference
//! system; the collection is cached per scale for the process lifetime.

use geojson::{Feature, FeatureCollection, GeoJson, JsonValue};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use crate::cache::{get_or_try_insert, Cache};
use crate::error::{Result, SnowmapError};
use crate::logging::log_data_load_stats;
use crate::survey::Scale;

/// A loaded boundary dataset for one scale.
#[derive(Debug, Clone)]
pub struct BoundaryCollection {
    pub scale: Scale,
    /// The source file's `crs` member, verbatim, when present
    pub crs: Option<JsonValue>,
    pub features: Vec<Feature>,
}

impl BoundaryCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Load the boundary collection for a scale, memoized per scale.
pub fn load_boundaries(
    cache: &dyn Cache<Scale, Arc<BoundaryCollection>>,
    data_dir: &Path,
    scale: Scale,
) -> Result<Arc<BoundaryCollection>> {
    get_or_try_insert(cache, scale, || {
        let path = data_dir.join(scale.boundary_file());
        let collection = read_boundary_file(&path, scale)?;
        Ok(Arc::new(collection))
    })
}

/// Read and parse one boundary GeoJSON file.
fn read_boundary_file(path: &Path, scale: Scale) -> Result<BoundaryCollection> {
    if !path.exists() {
        return Err(SnowmapError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let geojson = GeoJson::from_reader(reader)?;
    let collection = FeatureCollection::try_from(geojson)?;

    let crs = collection
        .foreign_members
        .as_ref()
        .and_then(|members| members.get("crs"))
        .cloned();

    if collection.features.is_empty() {
        return Err(SnowmapError::DataNotFound {
            message: format!("No features found in {}", path.display()),
        });
    }

    log_data_load_stats(&path.display().to_string(), 1, collection.features.len());

    Ok(BoundaryCollection {
        scale,
        crs,
        features: collection.features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use std::io::Write;
    use tempfile::tempdir;

    const STATES_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:OGC:1.3:CRS84"}},
        "features": [
            {
                "type": "Feature",
                "properties": {"STUSPS": "GA", "NAME": "Georgia", "STATEFP": "13"},
                "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}
            },
            {
                "type": "Feature",
                "properties": {"STUSPS": "NC", "NAME": "North Carolina", "STATEFP": "37"},
                "geometry": {"type": "Polygon", "coordinates": [[[2.0, 0.0], [3.0, 0.0], [3.0, 1.0], [2.0, 0.0]]]}
            }
        ]
    }"#;

    fn write_fixture(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(Scale::State.boundary_file());
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_preserves_features_and_crs() {
        let (dir, _path) = write_fixture(STATES_GEOJSON);
        let cache: MemoryCache<Scale, Arc<BoundaryCollection>> = MemoryCache::new();

        let boundaries = load_boundaries(&cache, dir.path(), Scale::State).unwrap();
        assert_eq!(boundaries.len(), 2);
        assert!(boundaries.crs.is_some());

        let keys: Vec<&str> = boundaries
            .features
            .iter()
            .filter_map(|f| {
                f.properties
                    .as_ref()
                    .and_then(|props| props.get("STUSPS"))
                    .and_then(|value| value.as_str())
            })
            .collect();
        assert_eq!(keys, vec!["GA", "NC"]);
    }

    #[test]
    fn test_load_is_cached_per_scale() {
        let (dir, _path) = write_fixture(STATES_GEOJSON);
        let cache: MemoryCache<Scale, Arc<BoundaryCollection>> = MemoryCache::new();

        let first = load_boundaries(&cache, dir.path(), Scale::State).unwrap();
        let second = load_boundaries(&cache, dir.path(), Scale::State).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_missing_file_propagates() {
        let dir = tempdir().unwrap();
        let cache: MemoryCache<Scale, Arc<BoundaryCollection>> = MemoryCache::new();

        let result = load_boundaries(&cache, dir.path(), Scale::County);
        assert!(matches!(result, Err(SnowmapError::Io(_))));
    }

    #[test]
    fn test_malformed_file_propagates() {
        let (dir, _path) = write_fixture("{\"type\": \"not geojson\"");
        let cache: MemoryCache<Scale, Arc<BoundaryCollection>> = MemoryCache::new();

        let result = load_boundaries(&cache, dir.path(), Scale::State);
        assert!(result.is_err());
    }
}
