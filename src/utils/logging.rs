//! Logging utilities
//!
//! Compact summaries of computed plans for debug logs

use crate::services::allocator::BudgetPlan;

/// Set to true to log every suggestion and schedule row
/// Default is false to reduce log verbosity
pub const VERBOSE_PLAN_LOGGING: bool = false;

/// Summary of a plan that keeps the breakdown but collapses the long lists
pub fn plan_log_summary(plan: &BudgetPlan) -> serde_json::Value {
    if VERBOSE_PLAN_LOGGING {
        return serde_json::to_value(plan).unwrap_or(serde_json::json!({"error": "serialize failed"}));
    }

    serde_json::json!({
        "destination": plan.input.destination,
        "duration": plan.input.duration,
        "travelers": plan.input.travelers,
        "style": plan.input.style,
        "totalBudget": plan.input.total_budget,
        "breakdown": plan.breakdown,
        "totalEstimated": plan.breakdown.total(),
        "suggestions": format!("[...{} suggestions]", plan.suggestions.len()),
        "totalPotentialSavings": plan.total_potential_savings,
        "dailySchedule": format!("[...{} days]", plan.daily_schedule.len()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StyleTier, TripBudgetInput};

    #[test]
    fn test_summary_collapses_lists() {
        let plan = BudgetPlan::estimate(&TripBudgetInput {
            destination: "Kyoto".to_string(),
            duration: 30,
            travelers: 1,
            total_budget: 3000.0,
            style: StyleTier::Budget,
        })
        .unwrap();

        let summary = plan_log_summary(&plan);
        assert_eq!(summary["destination"], "Kyoto");
        assert_eq!(summary["style"], "budget");
        assert_eq!(summary["dailySchedule"], "[...30 days]");
        assert_eq!(summary["breakdown"]["accommodation"], plan.breakdown.accommodation);
    }
}
