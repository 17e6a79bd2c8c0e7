//! Progress Tracking
//!
//! Maps the kill counter onto the milestone sequence.

#![warn(missing_docs)]

pub mod tracker;

pub use tracker::{ProgressSnapshot, ProgressTracker, Result, TrackerError};
