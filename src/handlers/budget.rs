//! Budget estimation handlers
//!
//! POST /v1/budget/estimate
//! POST /v1/budget/recommend
//! GET  /v1/budget/styles

use crate::handlers::AppState;
use crate::models::{RecommendationForm, StyleTier, StyleTierInfo, TripBudgetForm, TripBudgetInput};
use crate::services::allocator::BudgetPlan;
use crate::services::recommendation::{recommend_budget, BudgetRecommendation};
use crate::services::view::BudgetView;
use crate::utils::error::AppResult;
use crate::utils::logging::plan_log_summary;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct EstimateParams {
    /// Coerce out-of-range form values instead of rejecting them
    #[serde(default)]
    pub lenient: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EstimateResponse {
    pub plan: BudgetPlan,
    pub view: BudgetView,
}

/// Compute breakdown, suggestions and daily table for a trip
pub async fn estimate(
    State(state): State<Arc<AppState>>,
    params: Result<Query<EstimateParams>, QueryRejection>,
    payload: Result<Json<TripBudgetForm>, JsonRejection>,
) -> AppResult<Json<EstimateResponse>> {
    let Query(params) = params?;
    let Json(form) = payload?;

    let input = if params.lenient {
        TripBudgetInput::sanitized(form)
    } else {
        TripBudgetInput::try_from(form)?
    };

    let plan = BudgetPlan::estimate(&input)?;
    let view = BudgetView::render(&plan, state.settings.view.display_day_cap);

    if let Ok(summary) = serde_json::to_string(&plan_log_summary(&plan)) {
        debug!("Estimated plan: {}", summary);
    }

    Ok(Json(EstimateResponse { plan, view }))
}

/// Suggest a total budget from the destination country and trip length
pub async fn recommend(
    params: Result<Query<EstimateParams>, QueryRejection>,
    payload: Result<Json<RecommendationForm>, JsonRejection>,
) -> AppResult<Json<BudgetRecommendation>> {
    let Query(params) = params?;
    let Json(form) = payload?;

    let duration = if params.lenient {
        form.coerced_duration()
    } else {
        form.strict_duration()?
    };

    Ok(Json(recommend_budget(&form.country, duration)?))
}

/// List the travel style tiers
pub async fn list_styles() -> Json<Vec<StyleTierInfo>> {
    Json(StyleTier::ALL.into_iter().map(StyleTierInfo::from).collect())
}
