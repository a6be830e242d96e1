//! Wall-clock abstraction so minute bucketing can run on simulated time

use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

/// Source of "now" in unix seconds
pub trait Clock: Send + Sync {
    fn now_unix_secs(&self) -> i64;

    /// Current minute bucket: floor(unix seconds / 60)
    fn current_minute(&self) -> i64 {
        self.now_unix_secs().div_euclid(60)
    }
}

/// Real time via `chrono::Utc::now`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    #[must_use]
    pub const fn new(unix_secs: i64) -> Self {
        Self {
            now: AtomicI64::new(unix_secs),
        }
    }

    /// Start at the first second of the given minute bucket
    #[must_use]
    pub const fn at_minute(minute: i64) -> Self {
        Self::new(minute * 60)
    }

    pub fn set(&self, unix_secs: i64) {
        self.now.store(unix_secs, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.advance_secs(minutes * 60);
    }
}

impl Clock for ManualClock {
    fn now_unix_secs(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_floors() {
        let clock = ManualClock::new(119);
        assert_eq!(clock.current_minute(), 1);
        clock.advance_secs(1);
        assert_eq!(clock.current_minute(), 2);
    }

    #[test]
    fn test_negative_time_floors_down() {
        let clock = ManualClock::new(-1);
        assert_eq!(clock.current_minute(), -1);
    }
}
