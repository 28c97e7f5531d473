//! Legend bar endpoint handler.
//!
//! Returns the vertical color-legend bar for a palette as a PNG image.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::colormaps::{get_palette, render_legend};
use crate::error::{Result, SnowmapError};
use crate::logging::{generate_request_id, log_request_error};
use crate::state::AppState;

/// Default legend bar dimensions in pixels
const DEFAULT_WIDTH: u32 = 40;
const DEFAULT_HEIGHT: u32 = 320;

/// Query parameters for the legend endpoint
#[derive(Debug, Deserialize)]
pub struct LegendQuery {
    /// Palette name (defaults to the configured palette)
    pub palette: Option<String>,
    /// Number of discrete colors, 2-20 (defaults to the configured count)
    pub colors: Option<usize>,
    /// Bar width in pixels
    pub width: Option<u32>,
    /// Bar height in pixels
    pub height: Option<u32>,
}

/// Handle GET /legend requests
pub async fn legend_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LegendQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/legend",
        request_id = %request_id,
        palette = ?params.palette,
        colors = ?params.colors,
        "Processing legend request"
    );

    match generate_legend_response(state, &params) {
        Ok(response) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = "/legend",
                request_id = %request_id,
                duration_ms = duration.as_millis() as u64,
                "Legend generation successful"
            );
            response
        }
        Err(error) => {
            log_request_error(&error, "/legend", &request_id, None);

            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": error.to_string(),
                    "request_id": request_id
                })),
            )
                .into_response()
        }
    }
}

/// Helper function to render and encode the legend bar
fn generate_legend_response(state: Arc<AppState>, params: &LegendQuery) -> Result<Response> {
    let palette_name = params
        .palette
        .clone()
        .unwrap_or_else(|| state.config.render.palette.clone());
    let n_colors = params.colors.unwrap_or(state.config.render.n_colors);
    if !(2..=20).contains(&n_colors) {
        return Err(SnowmapError::InvalidParameter {
            param: "colors".to_string(),
            message: format!("Color count {} is out of range: must be 2-20", n_colors),
        });
    }

    let width = params.width.unwrap_or(DEFAULT_WIDTH);
    let height = params.height.unwrap_or(DEFAULT_HEIGHT);

    let palette = get_palette(&palette_name, n_colors)?;
    let img = render_legend(&palette, width, height)?;

    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| SnowmapError::ImageGeneration {
            message: format!("Failed to encode legend PNG: {}", e),
        })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/png")],
        buffer.into_inner(),
    )
        .into_response())
}
