//! Request handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use pipeweight_domain::model::PipeSpec;
use pipeweight_domain::service::calculate;
use pipeweight_types::{CalculationRequest, CalculationResponse};
use serde_json::{json, Value};

use crate::error::Result;
use crate::state::AppState;

/// `POST /calculate-weight`
pub async fn calculate_weight(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CalculationRequest>, JsonRejection>,
) -> Result<Json<CalculationResponse>> {
    let Json(request) = payload?;
    let count = request.pipes_data.as_ref().map_or(0, Vec::len);
    tracing::debug!(count, "calculation request");

    let response = calculate(&request, &state.table)?;
    tracing::debug!(
        total_weight = %response.total_weight,
        total_price = %response.total_price,
        "calculation done"
    );
    Ok(Json(response))
}

/// `GET /specs`
pub async fn list_specs(State(state): State<AppState>) -> Json<Vec<PipeSpec>> {
    Json(state.table.specs().to_vec())
}

/// `GET /health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
