//! Case-surveillance statistics loading.
//!
//! This module deserializes the nested monthly lookup structure
//! (month -> region -> characteristic -> {attribute: count}) and projects one
//! (month, characteristic, attribute) selection into a flat table with one
//! row per region, keyed by the scale's region key convention.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::cache::{get_or_try_insert, Cache};
use crate::error::{Result, SnowmapError};
use crate::logging::log_data_load_stats;
use crate::survey::{Characteristic, MonthKey, Scale};

/// Counts per attribute within one characteristic, e.g. {"Female": 1041, ...}
pub type AttributeCounts = HashMap<String, u64>;

/// One region's breakdown for one month, keyed by characteristic
pub type RegionRecord = HashMap<String, AttributeCounts>;

/// One month of the lookup, keyed by raw region name
pub type MonthTable = HashMap<String, RegionRecord>;

/// The full serialized lookup, keyed by "YYYY-MM"
pub type SurveillanceData = HashMap<String, MonthTable>;

/// Cache key for one projected statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatsKey {
    pub path: PathBuf,
    pub month: String,
    pub characteristic: Characteristic,
    pub attribute: String,
    pub scale: Scale,
}

/// One region's value for the selected attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRow {
    /// Region key in the scale's casing convention
    pub region: String,
    /// Case count; 0 when the attribute was absent for this region
    pub value: u64,
}

/// Flat projection of one (month, characteristic, attribute) selection.
#[derive(Debug, Clone)]
pub struct StatsTable {
    pub scale: Scale,
    pub attribute: String,
    pub rows: Vec<StatsRow>,
}

impl StatsTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a region's value by its key
    pub fn value_for(&self, region: &str) -> Option<u64> {
        self.rows
            .iter()
            .find(|row| row.region == region)
            .map(|row| row.value)
    }
}

/// Load and project one statistics selection, memoized per parameter tuple.
pub fn load_statistics(
    cache: &dyn Cache<StatsKey, Arc<StatsTable>>,
    path: &Path,
    month: &MonthKey,
    characteristic: Characteristic,
    attribute: &str,
    scale: Scale,
) -> Result<Arc<StatsTable>> {
    let key = StatsKey {
        path: path.to_path_buf(),
        month: month.to_string(),
        characteristic,
        attribute: attribute.to_string(),
        scale,
    };

    get_or_try_insert(cache, key, || {
        let data = read_statistics_file(path)?;
        let table = project(&data, month, characteristic, attribute, scale)?;
        Ok(Arc::new(table))
    })
}

/// Read and deserialize the full lookup structure from disk.
fn read_statistics_file(path: &Path) -> Result<SurveillanceData> {
    if !path.exists() {
        return Err(SnowmapError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let data: SurveillanceData = serde_json::from_reader(reader)?;

    if data.is_empty() {
        return Err(SnowmapError::DataNotFound {
            message: format!("No months found in {}", path.display()),
        });
    }

    let region_count = data.values().map(|table| table.len()).max().unwrap_or(0);
    log_data_load_stats(&path.display().to_string(), data.len(), region_count);

    Ok(data)
}

/// Project one month's table into flat (region key, value) rows.
///
/// The month and characteristic are trusted to exist; a missing attribute for
/// a region defaults to 0. Row order follows map iteration and carries no
/// guarantee.
fn project(
    data: &SurveillanceData,
    month: &MonthKey,
    characteristic: Characteristic,
    attribute: &str,
    scale: Scale,
) -> Result<StatsTable> {
    let month_key = month.to_string();
    let month_table = data.get(&month_key).ok_or_else(|| SnowmapError::DataNotFound {
        message: format!("Month {} not present in the statistics lookup", month_key),
    })?;

    let mut rows = Vec::with_capacity(month_table.len());
    for (raw_region, record) in month_table {
        let counts = record.get(characteristic.key()).ok_or_else(|| {
            SnowmapError::DataNotFound {
                message: format!(
                    "Characteristic {} missing for region {} in {}",
                    characteristic.key(),
                    raw_region,
                    month_key
                ),
            }
        })?;

        rows.push(StatsRow {
            region: scale.region_key(raw_region),
            value: counts.get(attribute).copied().unwrap_or(0),
        });
    }

    debug!(
        month = %month_key,
        characteristic = characteristic.key(),
        attribute = attribute,
        rows = rows.len(),
        "Projected statistics table"
    );

    Ok(StatsTable {
        scale,
        attribute: attribute.to_string(),
        rows,
    })
}
