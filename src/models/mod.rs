//! Data models module
//!
//! Defines the trip budget and category tracker records

pub mod tracker;
pub mod trip;

pub use tracker::{TrackerCategories, TrackerCategory, TrackerState, TrackerSummary};
pub use trip::{
    Category, CategoryBreakdown, DailyBudgetEntry, Priority, SavingsSuggestion, StyleTier,
    RecommendationForm, StyleTierInfo, TripBudgetForm, TripBudgetInput, MAX_TOTAL_BUDGET,
    MAX_TRIP_DAYS,
};
