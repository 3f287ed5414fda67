//! Budget allocator tests

use tripbudget::models::{Category, CategoryBreakdown, StyleTier, TripBudgetInput};
use tripbudget::services::allocator::*;
use tripbudget::AppError;

fn trip(duration: u32, total_budget: f64, style: StyleTier) -> TripBudgetInput {
    TripBudgetInput {
        destination: "Paris".to_string(),
        duration,
        travelers: 2,
        total_budget,
        style,
    }
}

/// Inputs spanning short and long trips, tiny and large budgets
fn sample_inputs() -> Vec<TripBudgetInput> {
    let mut inputs = Vec::new();
    for style in StyleTier::ALL {
        for &duration in &[1, 3, 7, 14, 30, 90] {
            for &budget in &[0.0, 99.0, 1500.0, 2345.67, 100_000.0] {
                inputs.push(trip(duration, budget, style));
            }
        }
    }
    inputs
}

#[test]
fn test_paris_moderate_scenario() {
    let breakdown = compute_breakdown(&trip(7, 1500.0, StyleTier::Moderate)).unwrap();

    assert_eq!(breakdown.accommodation, 600);
    assert_eq!(breakdown.food, 375);
    assert_eq!(breakdown.activities, 300);
    assert_eq!(breakdown.transport, 150);
    assert_eq!(breakdown.shopping, 45);
    assert_eq!(breakdown.miscellaneous, 30);
    assert_eq!(breakdown.total(), 1500);
}

#[test]
fn test_paris_budget_scenario() {
    let breakdown = compute_breakdown(&trip(7, 1500.0, StyleTier::Budget)).unwrap();

    assert_eq!(breakdown.accommodation, 420);
    assert!(breakdown.total().abs_diff(1050) <= 6);
    assert_ne!(breakdown.total(), 1500);
}

#[test]
fn test_total_tracks_budget_times_multiplier() {
    for input in sample_inputs() {
        let breakdown = compute_breakdown(&input).unwrap();
        let expected = input.total_budget * input.style.multiplier();
        let diff = (breakdown.total() as f64 - expected).abs();
        assert!(
            diff <= Category::ALL.len() as f64,
            "{:?}: total {} vs expected {}",
            input,
            breakdown.total(),
            expected
        );
    }
}

#[test]
fn test_category_ratio_is_stable() {
    for style in StyleTier::ALL {
        for &budget in &[1500.0, 8000.0, 250_000.0] {
            let breakdown = compute_breakdown(&trip(10, budget, style)).unwrap();
            let ratio = breakdown.accommodation as f64 / breakdown.food as f64;
            assert!((ratio - 0.40 / 0.25).abs() < 0.01, "ratio {} for {:?}/{}", ratio, style, budget);
        }
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    for input in sample_inputs() {
        assert_eq!(compute_breakdown(&input).unwrap(), compute_breakdown(&input).unwrap());
    }
}

#[test]
fn test_savings_never_exceed_allocation() {
    for input in sample_inputs() {
        let breakdown = compute_breakdown(&input).unwrap();
        let suggestions = generate_suggestions(&breakdown);

        assert_eq!(suggestions.len(), 4);
        for suggestion in &suggestions {
            assert!(suggestion.estimated_savings <= breakdown.get(suggestion.category));
            assert_eq!(suggestion.estimated_cost, breakdown.get(suggestion.category));
        }
        assert!(suggestions
            .iter()
            .all(|s| s.category != Category::Shopping && s.category != Category::Miscellaneous));
    }
}

#[test]
fn test_total_savings_follows_breakdown() {
    let small = generate_suggestions(&compute_breakdown(&trip(7, 1500.0, StyleTier::Moderate)).unwrap());
    let large = generate_suggestions(&compute_breakdown(&trip(7, 3000.0, StyleTier::Moderate)).unwrap());

    assert_eq!(total_potential_savings(&small), 289);
    assert!(total_potential_savings(&large) > total_potential_savings(&small));
}

#[test]
fn test_daily_schedule_even_and_complete() {
    for input in sample_inputs() {
        let breakdown = compute_breakdown(&input).unwrap();
        let schedule = build_daily_schedule(&breakdown, input.duration).unwrap();

        assert_eq!(schedule.len(), input.duration as usize);
        let per_day = schedule[0].amount;
        assert!(schedule.iter().all(|e| e.amount == per_day));
        assert!(schedule.iter().enumerate().all(|(i, e)| e.day as usize == i + 1));

        let spread = per_day as f64 * input.duration as f64;
        assert!((spread - breakdown.total() as f64).abs() <= input.duration as f64 / 2.0 + 1e-9);
    }
}

#[test]
fn test_schedule_has_no_cap() {
    let breakdown = compute_breakdown(&trip(45, 4500.0, StyleTier::Moderate)).unwrap();
    assert_eq!(build_daily_schedule(&breakdown, 45).unwrap().len(), 45);
}

#[test]
fn test_invalid_inputs_rejected() {
    assert!(matches!(
        compute_breakdown(&trip(0, 1500.0, StyleTier::Moderate)),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        compute_breakdown(&trip(7, -0.5, StyleTier::Moderate)),
        Err(AppError::Validation(_))
    ));
    assert!(build_daily_schedule(&CategoryBreakdown::default(), 0).is_err());
}

#[test]
fn test_estimate_bundles_everything() {
    let plan = BudgetPlan::estimate(&trip(7, 1500.0, StyleTier::Luxury)).unwrap();

    assert_eq!(plan.breakdown.accommodation, 900);
    assert_eq!(plan.suggestions.len(), 4);
    assert_eq!(
        plan.total_potential_savings,
        plan.suggestions.iter().map(|s| s.estimated_savings).sum::<u64>()
    );
    assert_eq!(plan.daily_schedule.len(), 7);
}
