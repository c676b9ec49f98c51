use std::collections::HashMap;
use crate::coach::{total_available, SeatRecord};

/// What happened to a trip's availability since the previous poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing before, seats now: the only edge that alerts the operator
    BecameAvailable { total: u32 },
    /// Seats before and now; the operator already knows
    StillAvailable { previous: u32, total: u32 },
    SeatsGone { previous: u32 },
    NoSeats,
}

impl Transition {
    pub fn should_notify(&self) -> bool {
        matches!(self, Transition::BecameAvailable { .. })
    }
}

/// Last observed sleeper total per trip id.
///
/// Lives for the whole process; entries are created on the first successful
/// poll of a trip and overwritten on every later one.
pub struct AvailabilityTracker {
    last_seen: HashMap<String, u32>,
}

impl AvailabilityTracker {
    pub fn new() -> Self {
        Self {
            last_seen: HashMap::new(),
        }
    }

    pub fn last_seen(&self, trip_id: &str) -> Option<u32> {
        self.last_seen.get(trip_id).copied()
    }

    /// Record a fresh poll and classify the change
    pub fn update(&mut self, trip_id: &str, seats: &[SeatRecord]) -> Transition {
        let total = total_available(seats);
        let previous = self.last_seen(trip_id).unwrap_or(0);

        let transition = match (previous, total) {
            (0, 0) => Transition::NoSeats,
            (0, total) => Transition::BecameAvailable { total },
            (previous, 0) => Transition::SeatsGone { previous },
            (previous, total) => Transition::StillAvailable { previous, total },
        };

        self.last_seen.insert(trip_id.to_string(), total);
        transition
    }
}

impl Default for AvailabilityTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(counts: &[u32]) -> Vec<SeatRecord> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &n)| SeatRecord {
                coach_type: "First - Sleeping Coach (AC)".to_string(),
                coach_no: (i + 1).to_string(),
                available_count: n,
            })
            .collect()
    }

    #[test]
    fn test_availability_lifecycle() {
        let mut tracker = AvailabilityTracker::new();
        assert_eq!(tracker.last_seen("517922"), None);

        // 0 -> 2 alerts
        let t = tracker.update("517922", &seats(&[2]));
        assert_eq!(t, Transition::BecameAvailable { total: 2 });
        assert!(t.should_notify());
        assert_eq!(tracker.last_seen("517922"), Some(2));

        // 2 -> 1 stays quiet
        let t = tracker.update("517922", &seats(&[1]));
        assert_eq!(t, Transition::StillAvailable { previous: 2, total: 1 });
        assert!(!t.should_notify());
        assert_eq!(tracker.last_seen("517922"), Some(1));

        // 1 -> 0
        let t = tracker.update("517922", &[]);
        assert_eq!(t, Transition::SeatsGone { previous: 1 });
        assert!(!t.should_notify());
        assert_eq!(tracker.last_seen("517922"), Some(0));

        // 0 -> 3 alerts again
        assert!(tracker.update("517922", &seats(&[1, 2])).should_notify());
    }

    #[test]
    fn test_unchanged_nonzero_total_does_not_repeat() {
        let mut tracker = AvailabilityTracker::new();
        assert!(tracker.update("a", &seats(&[5])).should_notify());
        assert!(!tracker.update("a", &seats(&[5])).should_notify());
        assert!(!tracker.update("a", &seats(&[2, 3])).should_notify());
    }

    #[test]
    fn test_trips_tracked_independently() {
        let mut tracker = AvailabilityTracker::new();
        tracker.update("a", &seats(&[1]));

        assert_eq!(tracker.update("b", &[]), Transition::NoSeats);
        assert!(tracker.update("b", &seats(&[4])).should_notify());
        assert_eq!(tracker.last_seen("a"), Some(1));
    }
}
