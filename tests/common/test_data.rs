//! Test fixture generation.
//!
//! Builds a miniature data directory with the same shape as production data:
//! two boundary GeoJSON files and two statistics lookups. The state fixture
//! covers the interesting join cases: a region with a zero count (TX), a
//! region with geometry but no statistics (VT), a statistics row with no
//! geometry (PR), and a boundary feature with null geometry (GU).

use serde_json::{json, Value};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

/// One region's record with all four characteristics populated
fn record(female: u64, male: u64) -> Value {
    json!({
        "age_group": {
            "0 - 17 years": female / 10,
            "18 to 49 years": female + male,
            "65+ years": male / 10
        },
        "sex": {
            "Female": female,
            "Male": male,
            "Unknown": 3
        },
        "race": {
            "White": (female + male) / 2,
            "Black": (female + male) / 3
        },
        "ethnicity": {
            "Hispanic": female / 4,
            "Non-Hispanic": male
        }
    })
}

fn polygon(x: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[x, 0.0], [x + 1.0, 0.0], [x + 1.0, 1.0], [x, 1.0], [x, 0.0]]]
    })
}

fn state_feature(stusps: &str, name: &str, statefp: &str, geometry: Value) -> Value {
    json!({
        "type": "Feature",
        "properties": {"STUSPS": stusps, "NAME": name, "STATEFP": statefp},
        "geometry": geometry
    })
}

fn county_feature(name: &str, statefp: &str, countyfp: &str, geometry: Value) -> Value {
    json!({
        "type": "Feature",
        "properties": {"NAME": name, "STATEFP": statefp, "COUNTYFP": countyfp},
        "geometry": geometry
    })
}

fn states_geojson() -> Value {
    json!({
        "type": "FeatureCollection",
        "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:OGC:1.3:CRS84"}},
        "features": [
            state_feature("GA", "Georgia", "13", polygon(0.0)),
            state_feature("NC", "North Carolina", "37", polygon(2.0)),
            state_feature("SC", "South Carolina", "45", polygon(4.0)),
            state_feature("VA", "Virginia", "51", polygon(6.0)),
            state_feature("TX", "Texas", "48", polygon(8.0)),
            state_feature("VT", "Vermont", "50", polygon(10.0)),
            state_feature("GU", "Guam", "66", Value::Null)
        ]
    })
}

fn counties_geojson() -> Value {
    json!({
        "type": "FeatureCollection",
        "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:OGC:1.3:CRS84"}},
        "features": [
            county_feature("Autauga County", "01", "001", polygon(0.0)),
            county_feature("Baldwin County", "01", "003", polygon(2.0)),
            county_feature("Barbour County", "01", "005", polygon(4.0))
        ]
    })
}

fn state_statistics() -> Value {
    json!({
        "2020-04": {
            "ga": record(210, 195),
            "nc": record(180, 175),
            "sc": record(95, 90),
            "va": record(120, 110),
            "tx": record(0, 5),
            "pr": record(77, 70)
        },
        "2021-10": {
            "ga": record(420, 400),
            "nc": record(360, 340),
            "sc": record(190, 185),
            "va": record(240, 230),
            "tx": record(15, 10),
            "pr": record(150, 140)
        }
    })
}

fn county_statistics() -> Value {
    json!({
        "2020-04": {
            "autauga county": record(42, 39),
            "baldwin county": record(66, 61)
        },
        "2021-10": {
            "autauga county": record(90, 85),
            "baldwin county": record(130, 120),
            "barbour county": record(20, 18)
        }
    })
}

fn write_json(dir: &TempDir, file_name: &str, value: &Value) {
    let path = dir.path().join(file_name);
    let mut file = File::create(&path).expect("Failed to create fixture file");
    file.write_all(serde_json::to_string_pretty(value).unwrap().as_bytes())
        .expect("Failed to write fixture file");
}

/// Create a complete test data directory with all four input files
pub fn create_test_data_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    write_json(&dir, "us_states.geojson", &states_geojson());
    write_json(&dir, "us_counties.geojson", &counties_geojson());
    write_json(&dir, "covid19_by_state.json", &state_statistics());
    write_json(&dir, "covid19_by_county.json", &county_statistics());

    dir
}

/// Number of state boundary features with non-null geometry
pub const STATES_WITH_GEOMETRY: usize = 6;

/// State regions with a non-zero Female count in 2020-04 and geometry
pub const STATES_WITH_DATA_2020_04: usize = 4;
