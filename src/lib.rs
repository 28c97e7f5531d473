//! # snowmap
//!
//! An in-memory case-surveillance-to-choropleth API server.
//!
//! This library provides the core functionality for loading U.S. COVID-19
//! case-surveillance statistics and Census cartographic boundaries into
//! memory and serving choropleth map layers, legends, and raw-data tables
//! over a small HTTP API.
//!
//! ## Key Features
//!
//! - **Zero-configuration data serving**: point at a data directory and
//!   instantly serve state- and county-level choropleth layers
//! - **One pipeline per request**: each selection re-runs the full
//!   load-join-partition-bucket pipeline on top of process-wide caches
//! - **Rank-bucketed palettes**: colorgrad-backed palettes sampled into
//!   discrete, quantile-style color buckets
//!
//! ## Architecture
//!
//! - **Data Layer**: deserializes the monthly statistics lookup and the
//!   boundary GeoJSON into memoized in-memory collections
//! - **Pipeline**: joins statistics onto geometry, partitions data/no-data
//!   regions, and assigns palette colors by sorted rank
//! - **API Layer**: exposes map layers, legend bars, tables, and metadata
//!   through a RESTful HTTP API

pub mod cache;
pub mod colormaps;
pub mod config;
pub mod error;
pub mod geometry;
pub mod handlers;
pub mod join;
pub mod logging;
pub mod partition;
pub mod state;
pub mod stats;
pub mod survey;

pub use config::Config;
pub use error::{Result, SnowmapError};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_data_load_stats,
    log_request_error,
};
pub use state::AppState;
pub use survey::{Characteristic, MonthKey, Scale};
