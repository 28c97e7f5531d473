//! Application state management for snowmap.
//!
//! This module defines the shared state that is passed to all handlers: the
//! configuration, the data directory, and the process-wide caches for
//! boundary geometry and projected statistics tables.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::error::{Result, SnowmapError};
use crate::geometry::{load_boundaries, BoundaryCollection};
use crate::stats::{load_statistics, StatsKey, StatsTable};
use crate::survey::{Characteristic, MonthKey, Scale};

/// The main application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Directory holding boundary and statistics files
    pub data_dir: PathBuf,
    /// Boundary collections, one entry per scale
    pub boundary_cache: MemoryCache<Scale, Arc<BoundaryCollection>>,
    /// Projected statistics tables, one entry per selection tuple
    pub stats_cache: MemoryCache<StatsKey, Arc<StatsTable>>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, data_dir: PathBuf) -> Self {
        Self {
            config,
            data_dir,
            boundary_cache: MemoryCache::new(),
            stats_cache: MemoryCache::new(),
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, data_dir: PathBuf) -> Arc<Self> {
        Arc::new(Self::new(config, data_dir))
    }

    /// Get the boundary collection for a scale, loading it on first use
    pub fn boundaries(&self, scale: Scale) -> Result<Arc<BoundaryCollection>> {
        load_boundaries(&self.boundary_cache, &self.data_dir, scale)
    }

    /// Get one projected statistics table, loading it on first use
    pub fn statistics(
        &self,
        month: &MonthKey,
        characteristic: Characteristic,
        attribute: &str,
        scale: Scale,
    ) -> Result<Arc<StatsTable>> {
        let path = self.data_dir.join(scale.statistics_file());
        load_statistics(
            &self.stats_cache,
            &path,
            month,
            characteristic,
            attribute,
            scale,
        )
    }

    /// Validate that the data directory is usable before serving
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            return Err(SnowmapError::Config {
                message: format!("Data directory not found: {}", self.data_dir.display()),
            });
        }

        for scale in Scale::all() {
            for file in [scale.boundary_file(), scale.statistics_file()] {
                let path = self.data_dir.join(file);
                if !path.is_file() {
                    return Err(SnowmapError::DataNotFound {
                        message: format!("Missing data file: {}", path.display()),
                    });
                }
            }
        }

        Ok(())
    }
}
