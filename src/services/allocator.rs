//! Budget allocator
//!
//! Turns trip parameters into a per-category breakdown, savings suggestions
//! and a per-day table. Everything here is pure: identical input always
//! produces identical output.
//!
//! The style multiplier scales every category, so the breakdown sums to
//! `total_budget * multiplier` rather than `total_budget`. Callers compare the
//! two to report over/under budget.

use crate::models::{
    Category, CategoryBreakdown, DailyBudgetEntry, Priority, SavingsSuggestion, TripBudgetInput,
    MAX_TOTAL_BUDGET,
};
use crate::utils::error::{helpers::validation_error, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Savings rule for one category
#[derive(Debug, Clone, Copy)]
pub struct SavingsRule {
    pub category: Category,
    pub priority: Priority,
    pub fraction: f64,
    pub description: &'static str,
}

/// Only these four categories produce suggestions, in this order
pub const SAVINGS_RULES: [SavingsRule; 4] = [
    SavingsRule {
        category: Category::Accommodation,
        priority: Priority::High,
        fraction: 0.15,
        description: "Book accommodations 2 months in advance for better rates",
    },
    SavingsRule {
        category: Category::Food,
        priority: Priority::Medium,
        fraction: 0.25,
        description: "Mix local markets with restaurants for authentic & budget-friendly meals",
    },
    SavingsRule {
        category: Category::Activities,
        priority: Priority::Medium,
        fraction: 0.2,
        description: "Look for city passes and group discounts for major attractions",
    },
    SavingsRule {
        category: Category::Transport,
        priority: Priority::Low,
        fraction: 0.3,
        description: "Use public transport and walk when possible",
    },
];

/// Complete result of one recomputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPlan {
    pub input: TripBudgetInput,
    pub breakdown: CategoryBreakdown,
    pub suggestions: Vec<SavingsSuggestion>,
    pub total_potential_savings: u64,
    pub daily_schedule: Vec<DailyBudgetEntry>,
}

impl BudgetPlan {
    /// Regenerate breakdown, suggestions and schedule from `input` in one go
    pub fn estimate(input: &TripBudgetInput) -> AppResult<Self> {
        let breakdown = compute_breakdown(input)?;
        let suggestions = generate_suggestions(&breakdown);
        let total_potential_savings = total_potential_savings(&suggestions);
        let daily_schedule = build_daily_schedule(&breakdown, input.duration)?;

        debug!(
            "Estimated plan for {} ({} days, {}): total {} / potential savings {}",
            input.destination,
            input.duration,
            input.style,
            breakdown.total(),
            total_potential_savings
        );

        Ok(Self {
            input: input.clone(),
            breakdown,
            suggestions,
            total_potential_savings,
            daily_schedule,
        })
    }
}

/// Split the total budget into the six categories
pub fn compute_breakdown(input: &TripBudgetInput) -> AppResult<CategoryBreakdown> {
    validate_input(input)?;

    let duration = f64::from(input.duration);
    let daily_budget = input.total_budget / duration;
    let multiplier = input.style.multiplier();

    let mut breakdown = CategoryBreakdown::default();
    for category in Category::ALL {
        let amount = daily_budget * category.share() * multiplier * duration;
        breakdown.set(category, round_amount(amount));
    }

    Ok(breakdown)
}

/// Suggestions for accommodation, food, activities and transport
pub fn generate_suggestions(breakdown: &CategoryBreakdown) -> Vec<SavingsSuggestion> {
    SAVINGS_RULES
        .iter()
        .map(|rule| {
            let estimated_cost = breakdown.get(rule.category);
            SavingsSuggestion {
                category: rule.category,
                description: rule.description.to_string(),
                priority: rule.priority,
                estimated_cost,
                estimated_savings: round_amount(estimated_cost as f64 * rule.fraction),
            }
        })
        .collect()
}

pub fn total_potential_savings(suggestions: &[SavingsSuggestion]) -> u64 {
    suggestions
        .iter()
        .map(|s| s.estimated_savings)
        .fold(0, u64::saturating_add)
}

/// One entry per day, each carrying the same evenly spread amount
pub fn build_daily_schedule(
    breakdown: &CategoryBreakdown,
    duration: u32,
) -> AppResult<Vec<DailyBudgetEntry>> {
    if duration == 0 {
        return Err(validation_error("duration must be at least 1 day"));
    }

    let per_day = round_amount(breakdown.total() as f64 / f64::from(duration));
    Ok((1..=duration)
        .map(|day| DailyBudgetEntry { day, amount: per_day })
        .collect())
}

fn validate_input(input: &TripBudgetInput) -> AppResult<()> {
    if input.duration == 0 {
        return Err(validation_error("duration must be at least 1 day"));
    }
    if input.travelers == 0 {
        return Err(validation_error("travelers must be at least 1"));
    }
    if !input.total_budget.is_finite() || input.total_budget < 0.0 {
        return Err(validation_error(format!(
            "total budget must be a non-negative amount, got {}",
            input.total_budget
        )));
    }
    if input.total_budget > MAX_TOTAL_BUDGET {
        return Err(validation_error(format!(
            "total budget must not exceed {}, got {}",
            MAX_TOTAL_BUDGET, input.total_budget
        )));
    }
    Ok(())
}

/// Round to the nearest whole currency unit. Inputs are validated non-negative.
fn round_amount(value: f64) -> u64 {
    value.round().max(0.0) as u64
}
