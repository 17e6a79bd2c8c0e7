//! Gunathon core data models.
//!
//! This crate defines the milestone sequence, the persisted tracker state and
//! the user preferences shared by the tracker, storage and presentation crates.

#![warn(missing_docs)]

// Milestones and tracker state
mod milestone;
mod state;
mod defaults;

// User preferences
mod preferences;

// Re-exports
pub use milestone::{Milestone, MilestoneStatus, ParseStatusError};
pub use state::TrackerState;
pub use defaults::{default_milestones, DEFAULT_SEQUENCE};
pub use preferences::{Keybinds, OverlayText, Preferences, PreferenceError};
