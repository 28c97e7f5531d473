//! Metadata endpoint handler.
//!
//! Returns JSON describing the selection space a client can present: scales,
//! characteristics and their attribute vocabularies, valid months, palettes,
//! and the configured defaults.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::colormaps::available_palettes;
use crate::logging::generate_request_id;
use crate::state::AppState;
use crate::survey::{Characteristic, MonthKey, Scale};

/// Handle GET /metadata requests
pub async fn metadata_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    // Log request
    debug!(
        endpoint = "/metadata",
        request_id = %request_id,
        "Processing metadata request"
    );

    let characteristics: serde_json::Map<String, serde_json::Value> = Characteristic::all()
        .iter()
        .map(|ch| {
            (
                ch.label().to_string(),
                serde_json::json!(ch.attributes()),
            )
        })
        .collect();

    let months: Vec<String> = MonthKey::all().iter().map(|m| m.to_string()).collect();

    // Generate response
    let response = serde_json::json!({
        "scales": Scale::all(),
        "characteristics": characteristics,
        "months": months,
        "palettes": available_palettes(),
        "defaults": {
            "palette": state.config.render.palette,
            "colors": state.config.render.n_colors,
        },
        "data_dir": state.data_dir.display().to_string(),
    });

    // Log successful request
    let duration = start_time.elapsed();
    info!(
        endpoint = "/metadata",
        request_id = %request_id,
        duration_us = duration.as_micros() as u64,
        "Metadata request successful"
    );

    Json(response)
}
