//! Nullable clock: deterministic time for testing.

use incinerator_types::{Clock, Timestamp};
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_ms: u64) -> Self {
        Self {
            current: Cell::new(initial_ms),
        }
    }

    /// Advance time by a number of milliseconds.
    pub fn advance_millis(&self, ms: u64) {
        self.current.set(self.current.get() + ms);
    }

    /// Advance time by a number of seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance_millis(secs * 1000);
    }

    /// Set the time to a specific value.
    pub fn set(&self, ms: u64) {
        self.current.set(ms);
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.current.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_moves_when_told() {
        let clock = NullClock::new(1_000);
        assert_eq!(clock.now().as_millis(), 1_000);
        clock.advance_secs(2);
        clock.advance_millis(250);
        assert_eq!(clock.now().as_millis(), 3_250);
        clock.set(10);
        assert_eq!(clock.now().as_millis(), 10);
    }
}
