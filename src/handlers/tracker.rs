//! Category tracker handlers
//!
//! Every mutation is written through to storage by the tracker itself. Each
//! handler answers from the same lock guard it mutated under.

use crate::handlers::AppState;
use crate::models::{TrackerCategory, TrackerState, TrackerSummary};
use crate::services::tracker::CategoryBudgetTracker;
use crate::utils::error::{helpers::not_found_error, AppResult};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
pub struct TrackerResponse {
    pub state: TrackerState,
    pub summary: TrackerSummary,
}

#[derive(Debug, Deserialize)]
pub struct EstimatedRequest {
    pub estimated: f64,
}

#[derive(Debug, Deserialize)]
pub struct CategoryAmountRequest {
    pub amount: f64,
}

fn snapshot(tracker: &CategoryBudgetTracker) -> Json<TrackerResponse> {
    Json(TrackerResponse {
        state: *tracker.state(),
        summary: tracker.summary(),
    })
}

/// GET /v1/tracker
pub async fn get_tracker(State(state): State<Arc<AppState>>) -> AppResult<Json<TrackerResponse>> {
    let tracker = state.tracker()?;
    Ok(snapshot(&tracker))
}

/// PUT /v1/tracker
pub async fn replace_tracker(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TrackerState>, JsonRejection>,
) -> AppResult<Json<TrackerResponse>> {
    let Json(body) = payload?;
    let mut tracker = state.tracker()?;
    tracker.replace(body);
    Ok(snapshot(&tracker))
}

/// DELETE /v1/tracker
pub async fn reset_tracker(State(state): State<Arc<AppState>>) -> AppResult<Json<TrackerResponse>> {
    let mut tracker = state.tracker()?;
    tracker.reset();
    info!("Tracker state reset");
    Ok(snapshot(&tracker))
}

/// PUT /v1/tracker/estimated
pub async fn set_estimated(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EstimatedRequest>, JsonRejection>,
) -> AppResult<Json<TrackerResponse>> {
    let Json(body) = payload?;
    let mut tracker = state.tracker()?;
    tracker.set_estimated(body.estimated);
    Ok(snapshot(&tracker))
}

/// PATCH /v1/tracker/categories/:name
pub async fn set_category(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    payload: Result<Json<CategoryAmountRequest>, JsonRejection>,
) -> AppResult<Json<TrackerResponse>> {
    let category = name.parse::<TrackerCategory>().map_err(not_found_error)?;
    let Json(body) = payload?;
    let mut tracker = state.tracker()?;
    tracker.set_category(category, body.amount);
    Ok(snapshot(&tracker))
}
