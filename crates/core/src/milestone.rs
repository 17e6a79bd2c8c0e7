//! Milestone model - one entry of the unlock sequence.

use serde::{Deserialize, Serialize};

/// A milestone is unlocked while the kill counter sits inside its range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Display name (weapon name)
    pub name: String,

    /// Inclusive lower bound of the kill range
    pub range_start: i64,

    /// Exclusive upper bound of the kill range
    pub range_end: i64,

    /// Current status
    pub status: MilestoneStatus,
}

impl Milestone {
    /// Create a new, incomplete milestone.
    pub fn new(name: impl Into<String>, range_start: i64, range_end: i64) -> Self {
        Self {
            name: name.into(),
            range_start,
            range_end,
            status: MilestoneStatus::Incomplete,
        }
    }

    /// Set the status, builder style.
    pub fn with_status(mut self, status: MilestoneStatus) -> Self {
        self.status = status;
        self
    }

    /// Status the half-open range `[range_start, range_end)` implies for `counter`.
    pub fn status_for(&self, counter: i64) -> MilestoneStatus {
        if counter < self.range_start {
            MilestoneStatus::Incomplete
        } else if counter >= self.range_end {
            MilestoneStatus::Complete
        } else {
            MilestoneStatus::Active
        }
    }

    /// Whether this milestone is currently active.
    pub fn is_active(&self) -> bool {
        self.status == MilestoneStatus::Active
    }
}

/// Milestone status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MilestoneStatus {
    /// Counter has not reached the range yet
    #[default]
    Incomplete,
    /// Counter is inside the range
    Active,
    /// Counter has passed the range
    Complete,
}

impl MilestoneStatus {
    /// Get string representation, as written to the tracker file.
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::Incomplete => "Incomplete",
            MilestoneStatus::Active => "Active",
            MilestoneStatus::Complete => "Complete",
        }
    }
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown milestone status: {0:?}")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for MilestoneStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "incomplete" => Ok(MilestoneStatus::Incomplete),
            "active" => Ok(MilestoneStatus::Active),
            "complete" => Ok(MilestoneStatus::Complete),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}
