use std::fmt;

use crate::shared::constants::CONFIDENCE_MAX;

/// Externally visible recognition state derived from the running count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfidenceLevel {
    None,
    Partial,
    Full,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::None => "none",
            ConfidenceLevel::Partial => "partial",
            ConfidenceLevel::Full => "full",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounded counter that smooths per-frame match results.
///
/// Each match moves the count one step toward `max`, each miss one step
/// toward zero, so the level only reaches `Full` (or `None`) after a
/// sustained run of matches (or misses).
#[derive(Clone, Debug)]
pub struct ConfidenceTracker {
    count: u32,
    max: u32,
}

impl ConfidenceTracker {
    pub fn new(max: u32) -> Self {
        Self { count: 0, max }
    }

    /// Records one frame's result and returns the new count.
    pub fn update(&mut self, matched: bool) -> u32 {
        self.count = self.peek(matched);
        self.count
    }

    /// The count `update(matched)` would produce, without recording it.
    pub fn peek(&self, matched: bool) -> u32 {
        if matched {
            if self.count < self.max {
                return self.count + 1;
            }
        } else if self.count > 0 {
            return self.count - 1;
        }
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn level(&self) -> ConfidenceLevel {
        level_for(self.count, self.max)
    }
}

impl Default for ConfidenceTracker {
    fn default() -> Self {
        Self::new(CONFIDENCE_MAX)
    }
}

/// Zero maps to `None` even when `max` is zero.
pub fn level_for(count: u32, max: u32) -> ConfidenceLevel {
    if count == 0 {
        ConfidenceLevel::None
    } else if count >= max {
        ConfidenceLevel::Full
    } else {
        ConfidenceLevel::Partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_starts_at_zero() {
        let tracker = ConfidenceTracker::default();
        assert_eq!(tracker.count(), 0);
        assert_eq!(tracker.max(), 10);
        assert_eq!(tracker.level(), ConfidenceLevel::None);
    }

    #[test]
    fn test_matches_count_up_and_saturate() {
        let mut tracker = ConfidenceTracker::default();
        let counts: Vec<u32> = (0..10).map(|_| tracker.update(true)).collect();
        assert_eq!(counts, (1..=10).collect::<Vec<_>>());
        assert_eq!(tracker.level(), ConfidenceLevel::Full);

        assert_eq!(tracker.update(true), 10);
        assert_eq!(tracker.level(), ConfidenceLevel::Full);
    }

    #[test]
    fn test_single_miss_from_full_is_partial() {
        let mut tracker = ConfidenceTracker::default();
        for _ in 0..10 {
            tracker.update(true);
        }
        assert_eq!(tracker.update(false), 9);
        assert_eq!(tracker.level(), ConfidenceLevel::Partial);
    }

    #[test]
    fn test_misses_never_go_below_zero() {
        let mut tracker = ConfidenceTracker::default();
        for _ in 0..5 {
            assert_eq!(tracker.update(false), 0);
        }
        assert_eq!(tracker.level(), ConfidenceLevel::None);
    }

    #[test]
    fn test_alternating_stays_in_bounds() {
        let mut tracker = ConfidenceTracker::default();
        for i in 0..1000 {
            let count = tracker.update(i % 2 == 0);
            assert!(count <= 10);
        }
        assert_eq!(tracker.count(), 0);

        for _ in 0..10 {
            tracker.update(true);
        }
        for i in 0..1000 {
            let count = tracker.update(i % 2 == 0);
            assert!((9..=10).contains(&count));
        }
    }

    #[rstest]
    #[case(0, ConfidenceLevel::None)]
    #[case(1, ConfidenceLevel::Partial)]
    #[case(5, ConfidenceLevel::Partial)]
    #[case(9, ConfidenceLevel::Partial)]
    #[case(10, ConfidenceLevel::Full)]
    fn test_level_mapping(#[case] count: u32, #[case] expected: ConfidenceLevel) {
        assert_eq!(level_for(count, 10), expected);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(ConfidenceLevel::None.to_string(), "none");
        assert_eq!(ConfidenceLevel::Partial.to_string(), "partial");
        assert_eq!(ConfidenceLevel::Full.to_string(), "full");
    }

    #[test]
    fn test_peek_does_not_record() {
        let mut tracker = ConfidenceTracker::new(2);
        assert_eq!(tracker.peek(true), 1);
        assert_eq!(tracker.peek(false), 0);
        assert_eq!(tracker.count(), 0);

        tracker.update(true);
        tracker.update(true);
        assert_eq!(tracker.peek(true), 2);
        assert_eq!(tracker.peek(false), 1);
        assert_eq!(tracker.count(), 2);
    }

    #[test]
    fn test_custom_max() {
        let mut tracker = ConfidenceTracker::new(2);
        tracker.update(true);
        assert_eq!(tracker.level(), ConfidenceLevel::Partial);
        tracker.update(true);
        assert_eq!(tracker.level(), ConfidenceLevel::Full);
        assert_eq!(tracker.update(true), 2);
    }
}
