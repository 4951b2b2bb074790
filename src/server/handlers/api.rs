//! Crime data API handlers.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    Json,
};

use super::params::{parse_year, TopDistrictsParams};
use crate::dataset::TOP_DISTRICTS_LIMIT;
use crate::server::error::ApiError;
use crate::server::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the Karnataka Crime API";

/// Home route.
pub async fn home() -> impl IntoResponse {
    Json(serde_json::json!({ "message": WELCOME_MESSAGE }))
}

/// Service health, including whether the dataset loaded.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.load_error.is_some() { "degraded" } else { "ok" };
    let mut body = serde_json::json!({
        "status": status,
        "records": state.table.len(),
        "columns": state.table.columns().names(),
    });
    if let Some(ref reason) = state.load_error {
        body["error"] = serde_json::json!(reason.as_ref());
    }
    Json(body)
}

/// Every record in load order.
pub async fn all_records(State(state): State<AppState>) -> Response {
    Json(state.table.records()).into_response()
}

pub async fn records_by_district(
    State(state): State<AppState>,
    district: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(district) = district?;
    let records = state.table.by_district(&district);
    if records.is_empty() {
        return Err(ApiError::DistrictNotFound);
    }
    Ok(Json(records).into_response())
}

pub async fn records_by_year(
    State(state): State<AppState>,
    year: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(raw) = year?;
    let records = state.table.by_year(parse_year(&raw)?);
    if records.is_empty() {
        return Err(ApiError::YearNotFound);
    }
    Ok(Json(records).into_response())
}

/// Top crime districts, optionally for a single year.
pub async fn top_crime_districts(
    State(state): State<AppState>,
    params: Result<Query<TopDistrictsParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let top = state
        .table
        .top_districts(params.year()?, TOP_DISTRICTS_LIMIT)
        .ok_or(ApiError::NoData)?;
    Ok(Json(top).into_response())
}

pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.table.summary())
}

pub async fn filters(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.table.filters())
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
