//! Raw-data table endpoint handler.
//!
//! Returns the tabular view of one selection: region identifiers plus the
//! selected attribute column, over the regions that have data, sorted
//! ascending by value.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geojson::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::Selection;
use crate::error::Result;
use crate::join::join_attributes;
use crate::logging::{generate_request_id, log_request_error};
use crate::partition::select_non_null;
use crate::state::AppState;
use crate::survey::Scale;

/// Query parameters for the table endpoint
#[derive(Debug, Deserialize)]
pub struct TableQuery {
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
}

/// Response for the table endpoint
#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub month: String,
    pub columns: Vec<String>,
    pub rows: Vec<JsonObject>,
}

/// Identifier columns shown per scale, ahead of the attribute column
fn identifier_columns(scale: Scale) -> &'static [&'static str] {
    match scale {
        Scale::State => &["NAME", "STUSPS"],
        Scale::County => &["NAME", "STATEFP", "COUNTYFP"],
    }
}

/// Handle GET /table requests
pub async fn table_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TableQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/table",
        request_id = %request_id,
        scale = %params.scale,
        attribute = %params.attribute,
        "Processing table request"
    );

    match generate_table_response(state, &params) {
        Ok(response) => {
            let duration = start_time.elapsed();
            info!(
                endpoint = "/table",
                request_id = %request_id,
                rows = response.rows.len(),
                duration_ms = duration.as_millis() as u64,
                "Table request successful"
            );
            Json(response).into_response()
        }
        Err(error) => {
            log_request_error(&error, "/table", &request_id, None);

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

/// Helper function to build the raw-data rows
fn generate_table_response(state: Arc<AppState>, params: &TableQuery) -> Result<TableResponse> {
    let selection = Selection::parse(
        &params.scale,
        &params.characteristic,
        &params.attribute,
        params.year,
        params.month,
    )?;

    let boundaries = state.boundaries(selection.scale)?;
    let statistics = state.statistics(
        &selection.month,
        selection.characteristic,
        &selection.attribute,
        selection.scale,
    )?;

    let joined = join_attributes(&boundaries, &statistics, selection.scale);
    let mut with_data = select_non_null(&joined);
    with_data.sort_by_value_ascending();

    let identifiers = identifier_columns(selection.scale);
    let mut columns: Vec<String> = identifiers.iter().map(|c| c.to_string()).collect();
    columns.push(selection.attribute.clone());

    let rows = with_data
        .regions
        .iter()
        .map(|region| {
            let mut row = JsonObject::new();
            for column in identifiers {
                let value = region
                    .properties
                    .get(*column)
                    .cloned()
                    .unwrap_or(JsonValue::Null);
                row.insert(column.to_string(), value);
            }
            row.insert(
                selection.attribute.clone(),
                JsonValue::from(region.value.unwrap_or(0)),
            );
            row
        })
        .collect();

    Ok(TableResponse {
        month: selection.month.to_string(),
        columns,
        rows,
    })
}
