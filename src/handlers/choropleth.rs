//! Choropleth endpoint handler.
//!
//! Runs the full pipeline for one selection — load statistics, load
//! boundaries, join, partition, sort, bucket — and returns the map layer
//! pair together with legend, tooltip, and initial view information.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::Selection;
use crate::colormaps::{self, bucket_colors, ColoredCollection, Rgb};
use crate::error::{Result, SnowmapError};
use crate::join::{join_attributes, JoinedCollection};
use crate::logging::{generate_request_id, log_request_error};
use crate::partition::{select_non_null, select_null};
use crate::state::AppState;
use crate::survey::{title_case, Scale};

/// Fill opacity of the data layer
const DATA_OPACITY: f64 = 0.5;

/// Fill opacity of the nodata layer
const NODATA_OPACITY: f64 = 0.2;

/// Flat gray fill for regions without data
const NODATA_FILL: Rgb = [200, 200, 200];

/// Region outline color and widths
const LINE_COLOR: Rgb = [0, 0, 0];
const LINE_WIDTH: u32 = 2;
const LINE_WIDTH_MIN_PIXELS: u32 = 1;

/// Query parameters for the choropleth endpoint
#[derive(Debug, Deserialize)]
pub struct ChoroplethQuery {
    /// Geographic scale ("state" or "county")
    pub scale: String,
    /// Patient characteristic (Age_group, Sex, Race, Ethnicity)
    pub characteristic: String,
    /// Specific attribute within the characteristic
    pub attribute: String,
    /// Reporting year (2020 or 2021)
    pub year: u16,
    /// Reporting month (1-12 for 2020, 1-10 for 2021)
    pub month: u8,
    /// Palette name (defaults to the configured palette)
    pub palette: Option<String>,
    /// Number of discrete colors, 2-20 (defaults to the configured count)
    pub colors: Option<usize>,
    /// Include the nodata layer (default true)
    pub show_nodata: Option<bool>,
}

/// Initial view over the contiguous United States
#[derive(Debug, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    pub max_zoom: u8,
    pub pitch: u8,
    pub bearing: u8,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            latitude: 40.0,
            longitude: -100.0,
            zoom: 3,
            max_zoom: 16,
            pitch: 0,
            bearing: 0,
        }
    }
}

/// Rendering hints for one layer
#[derive(Debug, Serialize)]
pub struct LayerStyle {
    pub opacity: f64,
    pub stroked: bool,
    pub filled: bool,
    pub wireframe: bool,
    /// Either a fill-color expression over feature properties or a constant
    pub get_fill_color: JsonValue,
    pub get_line_color: Rgb,
    pub get_line_width: u32,
    pub line_width_min_pixels: u32,
}

/// A GeoJSON layer plus its rendering hints
#[derive(Debug, Serialize)]
pub struct MapLayer {
    pub geojson: FeatureCollection,
    pub style: LayerStyle,
}

/// The data/nodata layer pair
#[derive(Debug, Serialize)]
pub struct LayerPair {
    pub data: MapLayer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodata: Option<MapLayer>,
}

/// Color-legend description for the selection
#[derive(Debug, Serialize)]
pub struct LegendInfo {
    pub palette: String,
    pub label: String,
    pub colors: Vec<Rgb>,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

/// Hover tooltip template
#[derive(Debug, Serialize)]
pub struct TooltipSpec {
    pub html: String,
    pub style: TooltipStyle,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipStyle {
    pub background_color: &'static str,
    pub color: &'static str,
}

/// Response for the choropleth endpoint
#[derive(Debug, Serialize)]
pub struct ChoroplethResponse {
    pub month: String,
    pub scale: Scale,
    pub characteristic: &'static str,
    pub attribute: String,
    pub view: ViewState,
    pub layers: LayerPair,
    pub legend: LegendInfo,
    pub tooltip: TooltipSpec,
}

/// Handle GET /choropleth requests
pub async fn choropleth_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChoroplethQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/choropleth",
        request_id = %request_id,
        scale = %params.scale,
        characteristic = %params.characteristic,
        attribute = %params.attribute,
        year = params.year,
        month = params.month,
        palette = ?params.palette,
        colors = ?params.colors,
        "Processing choropleth request"
    );

    match generate_choropleth_response(state, &params) {
        Ok(response) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = "/choropleth",
                request_id = %request_id,
                month = %response.month,
                attribute = %response.attribute,
                data_regions = response.layers.data.geojson.features.len(),
                duration_ms = duration.as_millis() as u64,
                "Choropleth generation successful"
            );
            Json(response).into_response()
        }
        Err(error) => {
            log_request_error(&error, "/choropleth", &request_id, None);

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

/// Helper function to run the pipeline and assemble the response
fn generate_choropleth_response(
    state: Arc<AppState>,
    params: &ChoroplethQuery,
) -> Result<ChoroplethResponse> {
    let selection = Selection::parse(
        &params.scale,
        &params.characteristic,
        &params.attribute,
        params.year,
        params.month,
    )?;

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
    let show_nodata = params.show_nodata.unwrap_or(true);

    let boundaries = state.boundaries(selection.scale)?;
    let statistics = state.statistics(
        &selection.month,
        selection.characteristic,
        &selection.attribute,
        selection.scale,
    )?;

    let joined = join_attributes(&boundaries, &statistics, selection.scale);
    let nodata = select_null(&joined);
    let mut with_data = select_non_null(&joined);
    with_data.sort_by_value_ascending();

    let palette = colormaps::get_palette(&palette_name, n_colors)?;
    let colored = bucket_colors(with_data, &palette)?;

    let legend = LegendInfo {
        palette: palette_name,
        label: humanize_label(&selection.attribute),
        colors: palette,
        min: colored.min_value(),
        max: colored.max_value(),
    };

    let tooltip = TooltipSpec {
        html: format!(
            "<b>Name:</b> {{NAME}}<br><b>Value:</b> {{{}}}<br><b>Date:</b> {}",
            selection.attribute, selection.month
        ),
        style: TooltipStyle {
            background_color: "steelblue",
            color: "white",
        },
    };

    let layers = LayerPair {
        data: MapLayer {
            geojson: data_feature_collection(&colored),
            style: data_layer_style(),
        },
        nodata: show_nodata.then(|| MapLayer {
            geojson: nodata_feature_collection(&nodata),
            style: nodata_layer_style(),
        }),
    };

    Ok(ChoroplethResponse {
        month: selection.month.to_string(),
        scale: selection.scale,
        characteristic: selection.characteristic.label(),
        attribute: selection.attribute,
        view: ViewState::default(),
        layers,
        legend,
        tooltip,
    })
}

/// Humanize an attribute name for the legend label
fn humanize_label(attribute: &str) -> String {
    title_case(&attribute.replace('_', " "))
}

fn data_layer_style() -> LayerStyle {
    LayerStyle {
        opacity: DATA_OPACITY,
        stroked: true,
        filled: true,
        wireframe: true,
        // The client resolves the per-feature R/G/B columns
        get_fill_color: JsonValue::from("[R, G, B]"),
        get_line_color: LINE_COLOR,
        get_line_width: LINE_WIDTH,
        line_width_min_pixels: LINE_WIDTH_MIN_PIXELS,
    }
}

fn nodata_layer_style() -> LayerStyle {
    LayerStyle {
        opacity: NODATA_OPACITY,
        stroked: true,
        filled: true,
        wireframe: true,
        get_fill_color: serde_json::json!(NODATA_FILL),
        get_line_color: LINE_COLOR,
        get_line_width: LINE_WIDTH,
        line_width_min_pixels: LINE_WIDTH_MIN_PIXELS,
    }
}

/// Wrap a source crs into foreign members for a derived collection
fn crs_members(crs: &Option<JsonValue>) -> Option<JsonObject> {
    crs.as_ref().map(|crs| {
        let mut members = JsonObject::new();
        members.insert("crs".to_string(), crs.clone());
        members
    })
}

/// Build the data layer: original properties plus the value and R/G/B columns
fn data_feature_collection(colored: &ColoredCollection) -> FeatureCollection {
    let features = colored
        .regions
        .iter()
        .map(|entry| {
            let mut properties = entry.region.properties.clone();
            properties.insert(
                colored.attribute.clone(),
                JsonValue::from(entry.region.value.unwrap_or(0)),
            );
            properties.insert("R".to_string(), JsonValue::from(entry.color[0]));
            properties.insert("G".to_string(), JsonValue::from(entry.color[1]));
            properties.insert("B".to_string(), JsonValue::from(entry.color[2]));

            Feature {
                bbox: None,
                geometry: Some(entry.region.geometry.clone()),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: crs_members(&colored.crs),
    }
}

/// Build the nodata layer; missing values report as 0
fn nodata_feature_collection(nodata: &JoinedCollection) -> FeatureCollection {
    let features = nodata
        .regions
        .iter()
        .map(|region| {
            let mut properties = region.properties.clone();
            properties.insert(
                nodata.attribute.clone(),
                JsonValue::from(region.value.unwrap_or(0)),
            );

            Feature {
                bbox: None,
                geometry: Some(region.geometry.clone()),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: crs_members(&nodata.crs),
    }
}
