//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime and the state of the
//! process-wide data caches.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::state::AppState;

/// Static server ID generated at startup
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> = once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Data cache information
    pub data: DataInfo,
    /// Server status
    pub status: String,
}

/// Cache and dataset information structure
#[derive(Serialize)]
pub struct DataInfo {
    /// Directory the boundary and statistics files are read from
    pub data_dir: String,
    /// Number of boundary collections held in memory
    pub boundary_collections_cached: usize,
    /// Number of projected statistics tables held in memory
    pub statistics_tables_cached: usize,
    /// Lookups answered from the caches
    pub cache_hits: u64,
    /// Lookups that required a fresh load
    pub cache_misses: u64,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    // Get current timestamp
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    // Calculate uptime
    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    let data = DataInfo {
        data_dir: state.data_dir.display().to_string(),
        boundary_collections_cached: state.boundary_cache.len(),
        statistics_tables_cached: state.stats_cache.len(),
        cache_hits: state.boundary_cache.hits() + state.stats_cache.hits(),
        cache_misses: state.boundary_cache.misses() + state.stats_cache.misses(),
    };

    let response = HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        data,
        status: "healthy".to_string(),
    };

    Json(response)
}
