//! Strictly increasing wall-clock millisecond source.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Hands out epoch milliseconds that never repeat within the process.
///
/// Each call returns the current wall-clock millisecond, or one more than
/// the previously returned value when the clock has not advanced (or went
/// backwards). Values from separate processes can still collide.
#[derive(Debug, Default)]
pub struct MonotonicMillis {
    last: AtomicU64,
}

impl MonotonicMillis {
    /// Create a new source.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Next unique millisecond value.
    pub fn next(&self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_after(now)
    }

    fn next_after(&self, now: u64) -> u64 {
        let advance = |prev: u64| now.max(prev.saturating_add(1));
        // The closure never returns None, so both arms carry the previous value.
        let prev = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| {
                Some(advance(prev))
            })
            .unwrap_or_else(|prev| prev);
        advance(prev)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_follows_wall_clock() {
        let clock = MonotonicMillis::new();
        assert_eq!(clock.next_after(1_000), 1_000);
        assert_eq!(clock.next_after(2_000), 2_000);
    }

    #[test]
    fn test_same_millisecond_is_bumped() {
        let clock = MonotonicMillis::new();
        assert_eq!(clock.next_after(5_000), 5_000);
        assert_eq!(clock.next_after(5_000), 5_001);
        assert_eq!(clock.next_after(5_000), 5_002);
    }

    #[test]
    fn test_clock_going_backwards() {
        let clock = MonotonicMillis::new();
        assert_eq!(clock.next_after(9_000), 9_000);
        assert_eq!(clock.next_after(8_000), 9_001);
    }

    #[test]
    fn test_unique_across_threads() {
        let clock = Arc::new(MonotonicMillis::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let clock = Arc::clone(&clock);
                std::thread::spawn(move || (0..500).map(|_| clock.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            #[allow(clippy::unwrap_used)]
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate value {value}");
            }
        }
        assert_eq!(seen.len(), 8 * 500);
    }
}
