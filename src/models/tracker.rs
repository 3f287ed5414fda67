//! Category budget tracker records
//!
//! The persisted JSON shape is `{"estimated": n, "categories": {...}}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-typed category of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerCategory {
    Accommodation,
    Food,
    Activities,
    Transport,
    Other,
}

impl TrackerCategory {
    pub const ALL: [TrackerCategory; 5] = [
        TrackerCategory::Accommodation,
        TrackerCategory::Food,
        TrackerCategory::Activities,
        TrackerCategory::Transport,
        TrackerCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrackerCategory::Accommodation => "accommodation",
            TrackerCategory::Food => "food",
            TrackerCategory::Activities => "activities",
            TrackerCategory::Transport => "transport",
            TrackerCategory::Other => "other",
        }
    }
}

impl fmt::Display for TrackerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackerCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackerCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown tracker category '{}'", s))
    }
}

/// Planned spend per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerCategories {
    #[serde(default)]
    pub accommodation: f64,
    #[serde(default)]
    pub food: f64,
    #[serde(default)]
    pub activities: f64,
    #[serde(default)]
    pub transport: f64,
    #[serde(default)]
    pub other: f64,
}

impl TrackerCategories {
    pub fn get(&self, category: TrackerCategory) -> f64 {
        match category {
            TrackerCategory::Accommodation => self.accommodation,
            TrackerCategory::Food => self.food,
            TrackerCategory::Activities => self.activities,
            TrackerCategory::Transport => self.transport,
            TrackerCategory::Other => self.other,
        }
    }

    pub(crate) fn slot_mut(&mut self, category: TrackerCategory) -> &mut f64 {
        match category {
            TrackerCategory::Accommodation => &mut self.accommodation,
            TrackerCategory::Food => &mut self.food,
            TrackerCategory::Activities => &mut self.activities,
            TrackerCategory::Transport => &mut self.transport,
            TrackerCategory::Other => &mut self.other,
        }
    }

    pub fn total(&self) -> f64 {
        TrackerCategory::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// Manually entered budget ceiling and planned spend
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    #[serde(default)]
    pub estimated: f64,
    #[serde(default)]
    pub categories: TrackerCategories,
}

impl TrackerState {
    /// Negative or non-numeric values collapse to 0
    pub fn clamped(self) -> Self {
        let mut state = Self {
            estimated: non_negative(self.estimated),
            categories: self.categories,
        };
        for category in TrackerCategory::ALL {
            let slot = state.categories.slot_mut(category);
            *slot = non_negative(*slot);
        }
        state
    }

    pub fn total_planned(&self) -> f64 {
        self.categories.total()
    }

    pub fn remaining(&self) -> f64 {
        (self.estimated - self.total_planned()).max(0.0)
    }

    pub fn over(&self) -> f64 {
        (self.total_planned() - self.estimated).max(0.0)
    }

    pub fn within_budget(&self) -> bool {
        self.total_planned() <= self.estimated
    }

    /// Fill level of the progress bar, 0..=100
    pub fn progress_percent(&self) -> f64 {
        if self.estimated == 0.0 {
            return 0.0;
        }
        (self.total_planned() / self.estimated.max(1.0) * 100.0).min(100.0)
    }

    pub fn summary(&self) -> TrackerSummary {
        TrackerSummary {
            estimated: self.estimated,
            total_planned: self.total_planned(),
            remaining: self.remaining(),
            over: self.over(),
            within_budget: self.within_budget(),
            progress_percent: self.progress_percent(),
        }
    }
}

pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Derived figures of a tracker state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSummary {
    pub estimated: f64,
    pub total_planned: f64,
    pub remaining: f64,
    pub over: f64,
    pub within_budget: bool,
    pub progress_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(estimated: f64, values: [f64; 5]) -> TrackerState {
        TrackerState {
            estimated,
            categories: TrackerCategories {
                accommodation: values[0],
                food: values[1],
                activities: values[2],
                transport: values[3],
                other: values[4],
            },
        }
    }

    #[test]
    fn test_over_budget() {
        let s = state(1000.0, [600.0, 300.0, 200.0, 80.0, 20.0]);
        assert_eq!(s.total_planned(), 1200.0);
        assert_eq!(s.over(), 200.0);
        assert_eq!(s.remaining(), 0.0);
        assert!(!s.within_budget());
        assert_eq!(s.progress_percent(), 100.0);
    }

    #[test]
    fn test_under_budget() {
        let s = state(1000.0, [400.0, 100.0, 0.0, 0.0, 0.0]);
        assert_eq!(s.remaining(), 500.0);
        assert_eq!(s.over(), 0.0);
        assert_eq!(s.progress_percent(), 50.0);
    }

    #[test]
    fn test_exactly_on_budget() {
        let s = state(500.0, [250.0, 250.0, 0.0, 0.0, 0.0]);
        assert_eq!(s.remaining(), 0.0);
        assert_eq!(s.over(), 0.0);
        assert!(s.within_budget());
    }

    #[test]
    fn test_progress_with_zero_estimate() {
        let s = state(0.0, [10.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(s.progress_percent(), 0.0);
        assert_eq!(s.over(), 10.0);
    }

    #[test]
    fn test_clamped() {
        let s = state(-5.0, [-1.0, 2.0, f64::NAN, 3.0, -0.5]).clamped();
        assert_eq!(s, state(0.0, [0.0, 2.0, 0.0, 3.0, 0.0]));
    }

    #[test]
    fn test_persisted_shape() {
        let json = r#"{"estimated":1000,"categories":{"accommodation":400,"food":150,"activities":0,"transport":50,"other":0}}"#;
        let parsed: TrackerState = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, state(1000.0, [400.0, 150.0, 0.0, 50.0, 0.0]));

        let partial: TrackerState = serde_json::from_str(r#"{"estimated":20}"#).unwrap();
        assert_eq!(partial.categories, TrackerCategories::default());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Food".parse::<TrackerCategory>(), Ok(TrackerCategory::Food));
        assert!("shopping".parse::<TrackerCategory>().is_err());
    }
}
