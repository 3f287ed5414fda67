//! Service layer module
//!
//! Contains the budget allocator, destination recommendations, the category tracker, the storage port and view helpers

pub mod allocator;
pub mod recommendation;
pub mod storage;
pub mod tracker;
pub mod view;

pub use allocator::{
    build_daily_schedule, compute_breakdown, generate_suggestions, total_potential_savings,
    BudgetPlan,
};
pub use recommendation::{recommend_budget, BudgetRecommendation};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use tracker::{CategoryBudgetTracker, TRACKER_STORAGE_KEY};
pub use view::BudgetView;
