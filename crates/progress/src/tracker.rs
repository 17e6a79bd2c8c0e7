//! Progress tracking over the milestone sequence.

use gunathon_core::{Milestone, MilestoneStatus, TrackerState};
use serde::Serialize;
use tracing::{debug, warn};

/// Errors reported by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// Milestone range is empty or reversed
    #[error("invalid range: start {start} must be less than end {end}")]
    InvalidRange {
        /// Requested range start
        start: i64,
        /// Requested range end
        end: i64,
    },
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// A point-in-time summary of the tracker, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    /// Kill counter
    pub counter: i64,

    /// Name of the current milestone
    pub current: Option<String>,

    /// Milestones marked complete
    pub completed: usize,

    /// Total milestones
    pub total: usize,

    /// Kills left until the current milestone's range ends
    pub remaining: Option<i64>,
}

/// Tracks which milestone the kill counter currently unlocks.
///
/// Owns the ordered milestone list and the counter. The current milestone is
/// a cached pointer refreshed on every [`adjust`](Self::adjust).
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    counter: i64,
    items: Vec<Milestone>,
    current: Option<usize>,
    // Last index written to storage; kept when nothing is active.
    last_active: usize,
}

impl ProgressTracker {
    /// Create a tracker at counter 0 over `items`, with statuses computed
    /// from their ranges.
    pub fn new(items: Vec<Milestone>) -> Self {
        let mut tracker = Self::from_state(TrackerState::new(items));
        tracker.recompute();
        tracker
    }

    /// Restore a tracker from loaded state.
    ///
    /// Statuses are taken as stored. The current pointer is the stored
    /// index if that milestone is active, else the last active milestone.
    pub fn from_state(state: TrackerState) -> Self {
        let TrackerState {
            counter,
            active_index,
            items,
        } = state;

        let current = match items.get(active_index) {
            Some(m) if m.is_active() => Some(active_index),
            _ => items.iter().rposition(Milestone::is_active),
        };

        Self {
            counter,
            items,
            current,
            last_active: active_index,
        }
    }

    /// Add `delta` to the counter and recompute every status.
    pub fn adjust(&mut self, delta: i64) {
        self.counter = self.counter.saturating_add(delta);
        self.recompute();
    }

    /// Restart the run: counter 0, first milestone active, the rest incomplete.
    ///
    /// Ranges are ignored here; the first milestone is activated even when
    /// its range does not contain 0.
    pub fn reset(&mut self) {
        self.counter = 0;
        for (index, item) in self.items.iter_mut().enumerate() {
            item.status = if index == 0 {
                MilestoneStatus::Active
            } else {
                MilestoneStatus::Incomplete
            };
        }
        self.current = (!self.items.is_empty()).then_some(0);
        self.last_active = 0;
        debug!(milestones = self.items.len(), "tracker reset");
    }

    /// Append a new incomplete milestone.
    ///
    /// The new entry is not recomputed against the counter.
    pub fn add_milestone(
        &mut self,
        name: impl Into<String>,
        range_start: i64,
        range_end: i64,
    ) -> Result<&Milestone> {
        if range_start >= range_end {
            warn!(range_start, range_end, "rejected milestone with invalid range");
            return Err(TrackerError::InvalidRange {
                start: range_start,
                end: range_end,
            });
        }

        self.items.push(Milestone::new(name, range_start, range_end));
        let added = &self.items[self.items.len() - 1];
        debug!(name = %added.name, range_start, range_end, "milestone added");
        Ok(added)
    }

    /// The milestone the counter currently unlocks, if any.
    pub fn current_milestone(&self) -> Option<&Milestone> {
        self.current.and_then(|index| self.items.get(index))
    }

    /// Index of the current milestone.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Kill counter.
    pub fn counter(&self) -> i64 {
        self.counter
    }

    /// Milestones in sequence order.
    pub fn milestones(&self) -> &[Milestone] {
        &self.items
    }

    /// Number of milestones.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Summary for display.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let current = self.current_milestone();
        ProgressSnapshot {
            counter: self.counter,
            current: current.map(|m| m.name.clone()),
            completed: self
                .items
                .iter()
                .filter(|m| m.status == MilestoneStatus::Complete)
                .count(),
            total: self.items.len(),
            remaining: current.map(|m| m.range_end.saturating_sub(self.counter)),
        }
    }

    /// State to hand to storage.
    pub fn state(&self) -> TrackerState {
        TrackerState {
            counter: self.counter,
            active_index: self.current.unwrap_or(self.last_active),
            items: self.items.clone(),
        }
    }

    /// Single pass over the sequence. Overlapping ranges are tolerated:
    /// every containing milestone is marked active and the last one wins.
    fn recompute(&mut self) {
        let counter = self.counter;
        let mut current = None;

        for (index, item) in self.items.iter_mut().enumerate() {
            item.status = item.status_for(counter);
            if item.is_active() {
                current = Some(index);
            }
        }

        self.current = current;
        if let Some(index) = current {
            self.last_active = index;
        }

        debug!(
            counter,
            current = ?self.current_milestone().map(|m| m.name.as_str()),
            "recomputed milestones"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(ranges: &[(&str, i64, i64)]) -> ProgressTracker {
        ProgressTracker::new(
            ranges
                .iter()
                .map(|(name, start, end)| Milestone::new(*name, *start, *end))
                .collect(),
        )
    }

    fn statuses(t: &ProgressTracker) -> Vec<MilestoneStatus> {
        t.milestones().iter().map(|m| m.status).collect()
    }

    fn active_count(t: &ProgressTracker) -> usize {
        t.milestones().iter().filter(|m| m.is_active()).count()
    }

    #[test]
    fn test_adjust_walks_through_sequence() {
        let mut t = tracker(&[("A", 0, 5), ("B", 5, 10)]);
        assert_eq!(t.counter(), 0);
        assert_eq!(t.current_milestone().unwrap().name, "A");
        assert_eq!(
            statuses(&t),
            vec![MilestoneStatus::Active, MilestoneStatus::Incomplete]
        );

        t.adjust(5);
        assert_eq!(t.counter(), 5);
        assert_eq!(t.current_milestone().unwrap().name, "B");
        assert_eq!(
            statuses(&t),
            vec![MilestoneStatus::Complete, MilestoneStatus::Active]
        );

        t.adjust(-10);
        assert_eq!(t.counter(), -5);
        assert!(t.current_milestone().is_none());
        assert_eq!(
            statuses(&t),
            vec![MilestoneStatus::Incomplete, MilestoneStatus::Incomplete]
        );
    }

    #[test]
    fn test_counter_past_every_range() {
        let mut t = tracker(&[("A", 0, 5), ("B", 5, 10)]);
        t.adjust(10);
        assert!(t.current_milestone().is_none());
        assert_eq!(
            statuses(&t),
            vec![MilestoneStatus::Complete, MilestoneStatus::Complete]
        );
        assert_eq!(t.snapshot().completed, 2);
    }

    #[test]
    fn test_overlapping_ranges_last_match_wins() {
        let mut t = tracker(&[("A", 0, 10), ("B", 5, 15)]);
        t.adjust(7);

        // The range rule marks both, the pointer lands on the later one.
        assert_eq!(
            statuses(&t),
            vec![MilestoneStatus::Active, MilestoneStatus::Active]
        );
        assert_eq!(t.current_milestone().unwrap().name, "B");
        assert_eq!(t.current_index(), Some(1));
    }

    #[test]
    fn test_at_most_one_active_for_gapless_ranges() {
        let mut t = tracker(&[("A", -999, 5), ("B", 5, 10), ("C", 10, 15), ("D", 15, 20)]);
        for delta in [1, 4, 3, -2, 9, 7, -30, 1000, -990, 2] {
            t.adjust(delta);
            assert!(active_count(&t) <= 1, "counter {}", t.counter());
        }
    }

    #[test]
    fn test_adjust_is_additive() {
        let ranges = [("A", 0, 5), ("B", 5, 10), ("C", 10, 15)];
        for (d1, d2) in [(3, 4), (12, -9), (-4, 20), (0, 0), (7, -7)] {
            let mut split = tracker(&ranges);
            split.adjust(d1);
            split.adjust(d2);

            let mut single = tracker(&ranges);
            single.adjust(d1 + d2);

            assert_eq!(split.state(), single.state());
            assert_eq!(split.current_index(), single.current_index());
        }
    }

    #[test]
    fn test_reset_activates_first_regardless_of_range() {
        let mut t = tracker(&[("A", 3, 5), ("B", 5, 10), ("C", 10, 15)]);
        t.adjust(12);
        t.reset();

        assert_eq!(t.counter(), 0);
        assert_eq!(
            statuses(&t),
            vec![
                MilestoneStatus::Active,
                MilestoneStatus::Incomplete,
                MilestoneStatus::Incomplete
            ]
        );
        assert_eq!(t.current_milestone().unwrap().name, "A");
    }

    #[test]
    fn test_reset_empty_tracker() {
        let mut t = ProgressTracker::default();
        t.reset();
        assert_eq!(t.counter(), 0);
        assert!(t.current_milestone().is_none());
    }

    #[test]
    fn test_add_milestone_validates_range() {
        let mut t = tracker(&[("A", 0, 5)]);
        t.add_milestone("n", 5, 10).unwrap();
        assert_eq!(t.len(), 2);

        let err = t.add_milestone("n", 10, 5).unwrap_err();
        assert_eq!(err, TrackerError::InvalidRange { start: 10, end: 5 });
        assert_eq!(t.len(), 2);

        assert!(t.add_milestone("empty", 7, 7).is_err());
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_add_milestone_is_not_recomputed() {
        let mut t = tracker(&[("A", 0, 5)]);
        t.adjust(6);
        let added = t.add_milestone("B", 5, 10).unwrap();
        assert_eq!(added.status, MilestoneStatus::Incomplete);
        assert_eq!(t.counter(), 6);
        assert_eq!(t.milestones()[0].status, MilestoneStatus::Complete);
        assert!(t.current_milestone().is_none());

        // Picked up on the next adjustment.
        t.adjust(0);
        assert_eq!(t.current_milestone().unwrap().name, "B");
    }

    #[test]
    fn test_from_state_keeps_stored_statuses() {
        let state = TrackerState {
            counter: 47,
            active_index: 9,
            items: vec![
                Milestone::new("A", 0, 5).with_status(MilestoneStatus::Complete),
                Milestone::new("B", 5, 10).with_status(MilestoneStatus::Active),
                Milestone::new("C", 10, 15).with_status(MilestoneStatus::Active),
            ],
        };
        let t = ProgressTracker::from_state(state.clone());

        // Stored index is out of bounds, fall back to the last active row.
        assert_eq!(t.current_milestone().unwrap().name, "C");
        assert_eq!(t.milestones(), state.items.as_slice());
        assert_eq!(t.counter(), 47);
    }

    #[test]
    fn test_from_state_uses_stored_index() {
        let state = TrackerState {
            counter: 7,
            active_index: 1,
            items: vec![
                Milestone::new("A", 0, 5).with_status(MilestoneStatus::Active),
                Milestone::new("B", 5, 10).with_status(MilestoneStatus::Active),
                Milestone::new("C", 10, 15),
            ],
        };
        let t = ProgressTracker::from_state(state);
        assert_eq!(t.current_index(), Some(1));
    }

    #[test]
    fn test_state_keeps_last_index_when_nothing_active() {
        let mut t = tracker(&[("A", 0, 5), ("B", 5, 10)]);
        t.adjust(6);
        t.adjust(100);
        assert!(t.current_milestone().is_none());
        assert_eq!(t.state().active_index, 1);
    }

    #[test]
    fn test_new_computes_statuses_from_ranges() {
        let t = tracker(&[("A", -10, -5), ("B", -5, 3), ("C", 3, 8)]);
        assert_eq!(
            statuses(&t),
            vec![
                MilestoneStatus::Complete,
                MilestoneStatus::Active,
                MilestoneStatus::Incomplete
            ]
        );
        assert_eq!(t.current_index(), Some(1));
    }

    #[test]
    fn test_snapshot_with_extreme_range() {
        let mut t = ProgressTracker::default();
        t.add_milestone("Wide", i64::MIN, i64::MAX).unwrap();
        t.adjust(-1);
        assert_eq!(t.current_milestone().unwrap().name, "Wide");
        assert_eq!(t.snapshot().remaining, Some(i64::MAX));

        t.adjust(i64::MIN);
        assert_eq!(t.counter(), i64::MIN);
        assert_eq!(t.snapshot().remaining, Some(i64::MAX));
    }

    #[test]
    fn test_snapshot() {
        let mut t = tracker(&[("A", 0, 5), ("B", 5, 10)]);
        t.adjust(7);
        let snap = t.snapshot();
        assert_eq!(snap.counter, 7);
        assert_eq!(snap.current.as_deref(), Some("B"));
        assert_eq!(snap.completed, 1);
        assert_eq!(snap.total, 2);
        assert_eq!(snap.remaining, Some(3));
    }
}
