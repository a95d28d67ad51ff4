//! Misconception tracking: identify repeated error habits
//!
//! Detects:
//! - Misconceptions repeated often enough (3+) to count as persistent
//! - Whether recent wrong answers show fewer distinct slips than earlier ones

use std::collections::{HashMap, HashSet};

use crate::question::Misconception;

/// Occurrences before a slip counts as a persistent habit
const PERSISTENT_THRESHOLD: u32 = 3;

/// How many recent slips to retain for trending
const RECENT_CAPACITY: usize = 50;

/// Counts the misconceptions behind a session's wrong answers
#[derive(Clone, Debug, Default)]
pub struct MistakeTracker {
    /// Occurrence count per misconception
    counts: HashMap<Misconception, u32>,
    /// Total wrong answers recorded
    total: u32,
    /// Most recent slips, oldest first (for trending)
    recent: Vec<Misconception>,
}

impl MistakeTracker {
    pub fn new() -> Self {
        MistakeTracker {
            counts: HashMap::new(),
            total: 0,
            recent: Vec::with_capacity(RECENT_CAPACITY),
        }
    }

    /// Record the misconception behind one wrong answer
    pub fn record(&mut self, slip: Misconception) {
        *self.counts.entry(slip).or_insert(0) += 1;
        self.total += 1;

        self.recent.push(slip);
        if self.recent.len() > RECENT_CAPACITY {
            self.recent.remove(0);
        }
    }

    /// Most frequent misconceptions, sorted by count descending
    pub fn top_slips(&self, count: usize) -> Vec<(Misconception, u32)> {
        let mut slips: Vec<(Misconception, u32)> =
            self.counts.iter().map(|(&m, &c)| (m, c)).collect();
        slips.sort_by(|a, b| b.1.cmp(&a.1));
        slips.truncate(count);
        slips
    }

    /// Misconceptions seen at least the persistence threshold
    pub fn persistent(&self) -> Vec<Misconception> {
        let mut slips: Vec<Misconception> = self
            .counts
            .iter()
            .filter(|(_, &count)| count >= PERSISTENT_THRESHOLD)
            .map(|(&slip, _)| slip)
            .collect();
        // Stable output for display
        slips.sort_by_key(|s| format!("{:?}", s));
        slips
    }

    /// Occurrence count for one misconception
    pub fn count(&self, slip: Misconception) -> u32 {
        self.counts.get(&slip).copied().unwrap_or(0)
    }

    /// Total wrong answers recorded
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Check the slip trend: fewer distinct misconceptions in the recent
    /// window than in the one before it counts as improving
    pub fn is_improving(&self, window_size: usize) -> bool {
        if self.recent.len() < 2 * window_size {
            return true; // Not enough data to call it declining
        }

        let split = self.recent.len() - window_size;
        let recent_window: HashSet<Misconception> = self.recent[split..].iter().copied().collect();
        let older_window: HashSet<Misconception> = self.recent[split - window_size..split]
            .iter()
            .copied()
            .collect();

        recent_window.len() <= older_window.len()
    }

    /// Summary shown on the completion screen
    pub fn summary(&self) -> MistakeSummary {
        MistakeSummary {
            persistent: self.persistent(),
            is_improving: self.is_improving(10),
        }
    }

    /// Clear history (used on retry)
    pub fn reset(&mut self) {
        self.counts.clear();
        self.total = 0;
        self.recent.clear();
    }
}

/// Summary of a session's error habits
#[derive(Clone, Debug)]
pub struct MistakeSummary {
    pub persistent: Vec<Misconception>,
    pub is_improving: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_threshold() {
        let mut tracker = MistakeTracker::new();
        tracker.record(Misconception::StraightAcross);
        tracker.record(Misconception::StraightAcross);
        assert!(tracker.persistent().is_empty());

        tracker.record(Misconception::StraightAcross);
        assert_eq!(
            tracker.persistent(),
            vec![Misconception::StraightAcross]
        );
        assert_eq!(tracker.count(Misconception::StraightAcross), 3);
        assert_eq!(tracker.total(), 3);
    }

    #[test]
    fn test_top_slips_sorted_by_frequency() {
        let mut tracker = MistakeTracker::new();
        for _ in 0..4 {
            tracker.record(Misconception::KeptFirstDenominator);
        }
        tracker.record(Misconception::NumeratorSlip);

        let top = tracker.top_slips(1);
        assert_eq!(top, vec![(Misconception::KeptFirstDenominator, 4)]);
    }

    #[test]
    fn test_improvement_with_narrowing_slips() {
        let mut tracker = MistakeTracker::new();
        // Older window: three distinct slips
        tracker.record(Misconception::StraightAcross);
        tracker.record(Misconception::NumeratorSlip);
        tracker.record(Misconception::SwappedTopAndBottom);
        // Recent window: the same single slip
        for _ in 0..3 {
            tracker.record(Misconception::NumeratorSlip);
        }
        assert!(tracker.is_improving(3));
    }

    #[test]
    fn test_not_improving_when_slips_widen() {
        let mut tracker = MistakeTracker::new();
        for _ in 0..3 {
            tracker.record(Misconception::NumeratorSlip);
        }
        tracker.record(Misconception::StraightAcross);
        tracker.record(Misconception::SwappedTopAndBottom);
        tracker.record(Misconception::KeptFirstDenominator);
        assert!(!tracker.is_improving(3));
    }

    #[test]
    fn test_reset() {
        let mut tracker = MistakeTracker::new();
        tracker.record(Misconception::CalledEqual);
        tracker.reset();
        assert_eq!(tracker.total(), 0);
        assert!(tracker.persistent().is_empty());
    }
}
