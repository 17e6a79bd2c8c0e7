//! Persisted tracker state.

use serde::{Deserialize, Serialize};
use crate::milestone::Milestone;

/// Everything the storage adapter loads and saves for the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Kill counter
    pub counter: i64,

    /// Index of the last milestone found active
    pub active_index: usize,

    /// Ordered milestone sequence
    pub items: Vec<Milestone>,
}

impl TrackerState {
    /// Create a state at counter 0 over the given milestones.
    pub fn new(items: Vec<Milestone>) -> Self {
        Self {
            counter: 0,
            active_index: 0,
            items,
        }
    }
}
