//! Presentation views over a computed plan
//!
//! Chart shares, summary figures and the capped daily table. None of this
//! feeds back into the allocator.

use crate::models::{Category, DailyBudgetEntry};
use crate::services::allocator::BudgetPlan;
use serde::{Deserialize, Serialize};

/// Days shown in the daily table before collapsing into an overflow count
pub const DEFAULT_DISPLAY_DAY_CAP: usize = 14;

/// Breakdown total compared against the raw total budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "by", rename_all = "snake_case")]
pub enum BudgetStatus {
    Over(f64),
    Under(f64),
    OnBudget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_budget: f64,
    pub total_estimated: u64,
    pub per_day: u64,
    pub per_person: u64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: Category,
    pub amount: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTable {
    pub days: Vec<DailyBudgetEntry>,
    /// Days beyond the display cap
    pub overflow: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetView {
    pub summary: BudgetSummary,
    pub shares: Vec<CategoryShare>,
    pub daily: DailyTable,
}

impl BudgetView {
    pub fn render(plan: &BudgetPlan, day_cap: usize) -> Self {
        Self {
            summary: summarize(plan),
            shares: category_shares(plan),
            daily: daily_table(&plan.daily_schedule, day_cap),
        }
    }
}

pub fn summarize(plan: &BudgetPlan) -> BudgetSummary {
    let total_estimated = plan.breakdown.total();
    let total_budget = plan.input.total_budget;
    let duration = f64::from(plan.input.duration.max(1));
    let travelers = f64::from(plan.input.travelers.max(1));

    let estimated = total_estimated as f64;
    let status = if estimated > total_budget {
        BudgetStatus::Over(estimated - total_budget)
    } else if estimated < total_budget {
        BudgetStatus::Under(total_budget - estimated)
    } else {
        BudgetStatus::OnBudget
    };

    BudgetSummary {
        total_budget,
        total_estimated,
        per_day: (estimated / duration).round() as u64,
        per_person: (total_budget / travelers).round() as u64,
        status,
    }
}

/// Percent of the breakdown total per category, for chart rendering
pub fn category_shares(plan: &BudgetPlan) -> Vec<CategoryShare> {
    let total = plan.breakdown.total();
    plan.breakdown
        .iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percent: if total > 0 {
                amount as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

pub fn daily_table(schedule: &[DailyBudgetEntry], day_cap: usize) -> DailyTable {
    DailyTable {
        days: schedule.iter().take(day_cap).copied().collect(),
        overflow: schedule.len().saturating_sub(day_cap),
    }
}
