//! Trip budget records
//!
//! Inputs and outputs of the budget allocator

use crate::utils::error::{helpers::validation_error, AppError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Largest total budget accepted. Scaled by the luxury multiplier every amount
/// stays below 2^53, so whole-unit rounding is exact and sums cannot overflow.
pub const MAX_TOTAL_BUDGET: f64 = 1.0e15;

/// Longest trip a form may request
pub const MAX_TRIP_DAYS: u32 = 365;

/// Coarse travel-spend tier driving a global cost multiplier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTier {
    Budget,
    #[default]
    Moderate,
    Luxury,
}

impl StyleTier {
    pub const ALL: [StyleTier; 3] = [StyleTier::Budget, StyleTier::Moderate, StyleTier::Luxury];

    /// Multiplier applied uniformly to every category share
    pub fn multiplier(self) -> f64 {
        match self {
            StyleTier::Budget => 0.7,
            StyleTier::Moderate => 1.0,
            StyleTier::Luxury => 1.5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StyleTier::Budget => "budget",
            StyleTier::Moderate => "moderate",
            StyleTier::Luxury => "luxury",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            StyleTier::Budget => "Budget-Friendly",
            StyleTier::Moderate => "Moderate",
            StyleTier::Luxury => "Luxury",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StyleTier::Budget => "Backpacker style, hostels, street food",
            StyleTier::Moderate => "Mid-range hotels, local restaurants",
            StyleTier::Luxury => "Premium hotels, fine dining",
        }
    }

    /// Typical per-day spend shown next to the tier
    pub fn daily_range(self) -> &'static str {
        match self {
            StyleTier::Budget => "$30-80",
            StyleTier::Moderate => "$80-200",
            StyleTier::Luxury => "$200+",
        }
    }
}

impl fmt::Display for StyleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style tier metadata as listed by `GET /v1/budget/styles`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTierInfo {
    pub id: StyleTier,
    pub name: String,
    pub description: String,
    pub daily_range: String,
    pub multiplier: f64,
}

impl From<StyleTier> for StyleTierInfo {
    fn from(tier: StyleTier) -> Self {
        Self {
            id: tier,
            name: tier.display_name().to_string(),
            description: tier.description().to_string(),
            daily_range: tier.daily_range().to_string(),
            multiplier: tier.multiplier(),
        }
    }
}

/// Cost category of a trip breakdown, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Accommodation,
    Food,
    Activities,
    Transport,
    Shopping,
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Accommodation,
        Category::Food,
        Category::Activities,
        Category::Transport,
        Category::Shopping,
        Category::Miscellaneous,
    ];

    /// Fixed fraction of daily spend. Shares sum to 1.0.
    pub fn share(self) -> f64 {
        match self {
            Category::Accommodation => 0.4,
            Category::Food => 0.25,
            Category::Activities => 0.2,
            Category::Transport => 0.1,
            Category::Shopping => 0.03,
            Category::Miscellaneous => 0.02,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Accommodation => "accommodation",
            Category::Food => "food",
            Category::Activities => "activities",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Miscellaneous => "miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trip parameters as entered by the user, already sanitized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripBudgetInput {
    pub destination: String,
    /// Trip length in days, at least 1
    pub duration: u32,
    /// Number of travelers, at least 1
    pub travelers: u32,
    /// Total budget in whole or fractional currency units, non-negative
    pub total_budget: f64,
    #[serde(default)]
    pub style: StyleTier,
}

/// Raw form values before sanitizing
///
/// Numbers arrive the way a browser form posts them: possibly zero, negative,
/// fractional, quoted or missing. Anything that is not a number reads as NaN.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripBudgetForm {
    #[serde(default)]
    pub destination: String,
    #[serde(default = "not_a_number", deserialize_with = "form_number")]
    pub duration: f64,
    #[serde(default = "not_a_number", deserialize_with = "form_number")]
    pub travelers: f64,
    #[serde(default = "not_a_number", deserialize_with = "form_number")]
    pub total_budget: f64,
    #[serde(default)]
    pub style: StyleTier,
}

impl TripBudgetInput {
    /// Coerce raw form values the way the planner form does: duration and
    /// traveler count below 1 become 1, a negative or non-numeric budget becomes 0.
    /// Duration and budget are also clamped to [`MAX_TRIP_DAYS`] and [`MAX_TOTAL_BUDGET`].
    pub fn sanitized(form: TripBudgetForm) -> Self {
        Self {
            destination: form.destination.trim().to_string(),
            duration: coerce_trip_days(form.duration),
            travelers: at_least_one(form.travelers),
            total_budget: if form.total_budget.is_finite() && form.total_budget > 0.0 {
                form.total_budget.min(MAX_TOTAL_BUDGET)
            } else {
                0.0
            },
            style: form.style,
        }
    }
}

impl TryFrom<TripBudgetForm> for TripBudgetInput {
    type Error = AppError;

    /// Strict conversion: rejects what [`TripBudgetInput::sanitized`] would coerce
    fn try_from(form: TripBudgetForm) -> Result<Self, Self::Error> {
        let duration = trip_days(form.duration)?;
        let travelers = whole_count(form.travelers, "travelers")?;
        if !form.total_budget.is_finite() || form.total_budget < 0.0 {
            return Err(validation_error(format!(
                "totalBudget must be a non-negative amount, got {}",
                form.total_budget
            )));
        }
        if form.total_budget > MAX_TOTAL_BUDGET {
            return Err(validation_error(format!(
                "totalBudget must not exceed {}, got {}",
                MAX_TOTAL_BUDGET, form.total_budget
            )));
        }

        Ok(Self {
            destination: form.destination.trim().to_string(),
            duration,
            travelers,
            total_budget: form.total_budget,
            style: form.style,
        })
    }
}

/// Destination and trip length for a budget recommendation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationForm {
    #[serde(default, alias = "destination")]
    pub country: String,
    #[serde(default = "not_a_number", deserialize_with = "form_number")]
    pub duration: f64,
}

impl RecommendationForm {
    pub fn strict_duration(&self) -> Result<u32, AppError> {
        trip_days(self.duration)
    }

    pub fn coerced_duration(&self) -> u32 {
        coerce_trip_days(self.duration)
    }
}

/// Whole number of days between 1 and [`MAX_TRIP_DAYS`]
fn trip_days(value: f64) -> Result<u32, AppError> {
    let days = whole_count(value, "duration")?;
    if days > MAX_TRIP_DAYS {
        return Err(validation_error(format!(
            "duration must not exceed {} days, got {}",
            MAX_TRIP_DAYS, days
        )));
    }
    Ok(days)
}

fn coerce_trip_days(value: f64) -> u32 {
    at_least_one(value).min(MAX_TRIP_DAYS)
}

fn whole_count(value: f64, field: &str) -> Result<u32, AppError> {
    if !value.is_finite() || value < 1.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(validation_error(format!(
            "{} must be a whole number of at least 1, got {}",
            field, value
        )));
    }
    Ok(value as u32)
}

fn at_least_one(value: f64) -> u32 {
    if value.is_finite() && value >= 1.0 {
        value.trunc().min(u32::MAX as f64) as u32
    } else {
        1
    }
}

fn not_a_number() -> f64 {
    f64::NAN
}

/// Accepts numbers and numeric strings; `null`, text and other JSON read as NaN
fn form_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

/// Per-category allocation for the whole trip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub accommodation: u64,
    pub food: u64,
    pub activities: u64,
    pub transport: u64,
    pub shopping: u64,
    pub miscellaneous: u64,
}

impl CategoryBreakdown {
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Accommodation => self.accommodation,
            Category::Food => self.food,
            Category::Activities => self.activities,
            Category::Transport => self.transport,
            Category::Shopping => self.shopping,
            Category::Miscellaneous => self.miscellaneous,
        }
    }

    pub fn set(&mut self, category: Category, amount: u64) {
        let slot = match category {
            Category::Accommodation => &mut self.accommodation,
            Category::Food => &mut self.food,
            Category::Activities => &mut self.activities,
            Category::Transport => &mut self.transport,
            Category::Shopping => &mut self.shopping,
            Category::Miscellaneous => &mut self.miscellaneous,
        };
        *slot = amount;
    }

    /// Categories with their amounts in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.iter().map(move |&c| (c, self.get(c)))
    }

    /// Sum of all categories
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, amount)| amount).fold(0, u64::saturating_add)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Recommended spend reduction for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSuggestion {
    pub category: Category,
    pub description: String,
    pub priority: Priority,
    /// Allocation of the category the suggestion applies to
    pub estimated_cost: u64,
    pub estimated_savings: u64,
}

/// One row of the per-day planning table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBudgetEntry {
    /// 1-based day index
    pub day: u32,
    pub amount: u64,
}
