//! Destination budget recommendation
//!
//! Suggests a starting total for a trip from a per-day base of the destination
//! country, split over the tracker categories so it can pre-fill the tracker.

use crate::models::{TrackerCategories, TrackerCategory, TrackerState};
use crate::utils::error::{helpers::validation_error, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-day base for countries without an entry
pub const DEFAULT_DAILY_BASE: u32 = 100;

pub const RECOMMENDATION_CURRENCY: &str = "USD";

const DAILY_BASES: [(&str, u32); 7] = [
    ("France", 150),
    ("Spain", 120),
    ("Italy", 130),
    ("Germany", 140),
    ("Japan", 160),
    ("USA", 180),
    ("UK", 170),
];

const RECOMMENDED_SHARES: [(TrackerCategory, f64); 5] = [
    (TrackerCategory::Accommodation, 0.4),
    (TrackerCategory::Food, 0.3),
    (TrackerCategory::Activities, 0.2),
    (TrackerCategory::Transport, 0.07),
    (TrackerCategory::Other, 0.03),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecommendation {
    pub country: String,
    pub duration: u32,
    pub daily_base: u32,
    pub total_amount: u64,
    pub currency: String,
    /// Whole currency units per tracker category
    pub categories: TrackerCategories,
}

impl BudgetRecommendation {
    /// Tracker state with the recommended total as the ceiling
    pub fn tracker_state(&self) -> TrackerState {
        TrackerState {
            estimated: self.total_amount as f64,
            categories: self.categories,
        }
    }
}

/// Per-day base for a country, matched case-insensitively
pub fn daily_base(country: &str) -> u32 {
    let country = country.trim();
    DAILY_BASES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(country))
        .map(|&(_, base)| base)
        .unwrap_or(DEFAULT_DAILY_BASE)
}

pub fn recommend_budget(country: &str, duration: u32) -> AppResult<BudgetRecommendation> {
    if duration == 0 {
        return Err(validation_error("duration must be at least 1 day"));
    }

    let base = daily_base(country);
    let days = f64::from(duration);
    let mut categories = TrackerCategories::default();
    for (category, share) in RECOMMENDED_SHARES {
        *categories.slot_mut(category) = (f64::from(base) * share * days).round();
    }

    let recommendation = BudgetRecommendation {
        country: country.trim().to_string(),
        duration,
        daily_base: base,
        total_amount: u64::from(base) * u64::from(duration),
        currency: RECOMMENDATION_CURRENCY.to_string(),
        categories,
    };
    debug!(
        "Recommended {} {} for {} days in {}",
        recommendation.total_amount, recommendation.currency, duration, recommendation.country
    );

    Ok(recommendation)
}
