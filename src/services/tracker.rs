//! Category budget tracker
//!
//! Holds the user-typed budget ceiling and planned spend per category, and
//! writes the whole state to a single storage slot after every change.
//! Storage failures are logged and swallowed: the tracker keeps working on
//! its in-memory state for the rest of the session.

use crate::models::{TrackerCategory, TrackerState, TrackerSummary};
use crate::models::tracker::non_negative;
use crate::services::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed slot the tracker state lives under
pub const TRACKER_STORAGE_KEY: &str = "travdy_budget";

pub struct CategoryBudgetTracker {
    store: Arc<dyn KeyValueStore>,
    state: TrackerState,
}

impl std::fmt::Debug for CategoryBudgetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryBudgetTracker")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CategoryBudgetTracker {
    /// Restore the last saved state, or start from zeros
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let state = match store.get(TRACKER_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<TrackerState>(&raw) {
                Ok(state) => {
                    debug!("Restored tracker state from storage");
                    state.clamped()
                }
                Err(e) => {
                    warn!("Ignoring malformed tracker state in storage: {}", e);
                    TrackerState::default()
                }
            },
            Ok(None) => TrackerState::default(),
            Err(e) => {
                warn!("Failed to read tracker state, starting empty: {}", e);
                TrackerState::default()
            }
        };

        Self { store, state }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn summary(&self) -> TrackerSummary {
        self.state.summary()
    }

    pub fn set_estimated(&mut self, estimated: f64) {
        self.state.estimated = non_negative(estimated);
        self.persist();
    }

    pub fn set_category(&mut self, category: TrackerCategory, amount: f64) {
        *self.state.categories.slot_mut(category) = non_negative(amount);
        self.persist();
    }

    /// Replace the whole state, clamping negative values
    pub fn replace(&mut self, state: TrackerState) {
        self.state = state.clamped();
        self.persist();
    }

    pub fn reset(&mut self) {
        self.replace(TrackerState::default());
    }

    /// Returns whether the write reached the store
    fn persist(&self) -> bool {
        let raw = match serde_json::to_string(&self.state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize tracker state: {}", e);
                return false;
            }
        };

        match self.store.set(TRACKER_STORAGE_KEY, &raw) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save tracker state, continuing in memory: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{MemoryStore, StorageError};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_changes_are_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = CategoryBudgetTracker::load(store.clone());
        tracker.set_estimated(1000.0);
        tracker.set_category(TrackerCategory::Food, 250.0);

        let saved = store.get(TRACKER_STORAGE_KEY).unwrap().unwrap();
        let saved: TrackerState = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved.estimated, 1000.0);
        assert_eq!(saved.categories.food, 250.0);

        let restored = CategoryBudgetTracker::load(store);
        assert_eq!(restored.state(), tracker.state());
    }

    #[test]
    fn test_malformed_slot_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.set(TRACKER_STORAGE_KEY, "not json").unwrap();

        let tracker = CategoryBudgetTracker::load(store);
        assert_eq!(*tracker.state(), TrackerState::default());
    }

    #[test]
    fn test_broken_store_keeps_working_in_memory() {
        let mut tracker = CategoryBudgetTracker::load(Arc::new(BrokenStore));
        tracker.set_estimated(1000.0);
        tracker.set_category(TrackerCategory::Accommodation, 1200.0);

        let summary = tracker.summary();
        assert_eq!(summary.over, 200.0);
        assert_eq!(summary.remaining, 0.0);
        assert!(!tracker.persist());
    }

    #[test]
    fn test_negative_input_clamped() {
        let mut tracker = CategoryBudgetTracker::load(Arc::new(MemoryStore::new()));
        tracker.set_category(TrackerCategory::Other, -40.0);
        tracker.set_estimated(-1.0);

        assert_eq!(tracker.state().categories.other, 0.0);
        assert_eq!(tracker.state().estimated, 0.0);
    }
}
