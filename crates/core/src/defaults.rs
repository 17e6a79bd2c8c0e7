//! Built-in unlock sequence, used when no tracker file can be read.

use crate::milestone::{Milestone, MilestoneStatus};
use crate::state::TrackerState;

/// `(name, range_start, range_end)` of the default sequence.
pub const DEFAULT_SEQUENCE: &[(&str, i64, i64)] = &[
    ("Nagant", -999, 5),
    ("Nagant Precision", 5, 10),
    ("Nagant Silencer", 10, 15),
    ("Nagant Precision Deadeye", 15, 20),
    ("Nagant Officer", 20, 25),
    ("Nagant Officer Brawler", 25, 30),
    ("Nagant Carbine", 30, 35),
    ("Nagant Carbine Deadeye", 35, 40),
    ("Romero", 40, 45),
    ("Romero Handcannon", 45, 50),
    ("Romero Talon", 50, 55),
    ("Romero Hatchet", 55, 60),
    ("Romero Alamo", 60, 65),
    ("Scottfield", 65, 70),
    ("Scottfield Brawler", 70, 75),
    ("Scottfield Spitfire", 75, 80),
    ("Scottfield Precision", 80, 85),
    ("Scottfield Swift", 85, 90),
    ("Springfield", 90, 95),
    ("Springfield Marksman", 95, 100),
    ("Combat Axe", 695, 700),
    ("Katana", 700, 705),
    ("Machete", 705, 710),
    ("Railroad Hammer", 710, 715),
];

/// Fresh default state: counter 0 with the first milestone active.
pub fn default_milestones() -> TrackerState {
    let items = DEFAULT_SEQUENCE
        .iter()
        .enumerate()
        .map(|(i, (name, start, end))| {
            let status = if i == 0 {
                MilestoneStatus::Active
            } else {
                MilestoneStatus::Incomplete
            };
            Milestone::new(*name, *start, *end).with_status(status)
        })
        .collect();

    TrackerState::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sequence_is_gapless() {
        let state = default_milestones();
        assert_eq!(state.items.len(), 24);
        assert_eq!(state.counter, 0);
        assert!(state.items[0].is_active());
        assert_eq!(state.items.iter().filter(|m| m.is_active()).count(), 1);

        // Gaps are only allowed where the sequence jumps to melee weapons.
        for pair in state.items.windows(2) {
            assert!(pair[0].range_start < pair[0].range_end);
            assert!(pair[0].range_end <= pair[1].range_start);
        }
    }
}
