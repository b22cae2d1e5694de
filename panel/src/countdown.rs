//! Countdown reconciliation.
//!
//! The chain reports "seconds until next burn" on every read refresh, and
//! each refresh lands with its own network latency. Displaying the raw value
//! would make the clock stutter, so the reconciler anchors the countdown to
//! a target instant and only moves that instant when a reading disagrees
//! with it by more than [`RESYNC_TOLERANCE_MS`].
//!
//! ```text
//! reading ──► candidate = now + reading ──► |candidate − target| > 2s ? ──► adopt
//!                                                                  └──► keep target
//! tick(now) ──► displayed = max(0, round((target − now) / 1000))
//! ```

use incinerator_types::Timestamp;

/// A reading whose implied target is within this many milliseconds of the
/// current target does not move it.
pub const RESYNC_TOLERANCE_MS: i128 = 2_000;

/// Derives a locally ticking countdown from periodic chain readings.
#[derive(Clone, Debug, Default)]
pub struct CountdownReconciler {
    target: Option<Timestamp>,
    /// Previous reading and when it arrived.
    last_reading: Option<(u64, Timestamp)>,
    displayed: u64,
}

impl CountdownReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a chain reading into the countdown.
    ///
    /// An absent reading is ignored and the current target is kept. A
    /// reading identical to the previous one is also ignored while the
    /// previous one has not yet run out. Once more than `secs` have passed,
    /// the same value can only mean a new cooldown, so it is reconciled
    /// like any other. Returns `true` when the target was (re)set.
    pub fn observe(&mut self, reading: Option<u64>, now: Timestamp) -> bool {
        let Some(secs) = reading else {
            return false;
        };
        if let Some((last, at)) = self.last_reading {
            let elapsed_ms = now.millis_since(at);
            if last == secs && elapsed_ms <= i128::from(secs) * 1000 {
                return false;
            }
        }
        self.last_reading = Some((secs, now));

        let candidate = now.plus_secs(secs);
        let resync = match self.target {
            None => true,
            Some(target) => candidate.millis_since(target).abs() > RESYNC_TOLERANCE_MS,
        };
        if resync {
            tracing::debug!(secs, target = candidate.as_millis(), "countdown resynced");
            self.target = Some(candidate);
            self.displayed = secs;
        }
        resync
    }

    /// Recompute the displayed value for `now`. A no-op until a target exists.
    pub fn tick(&mut self, now: Timestamp) -> u64 {
        if let Some(target) = self.target {
            let remaining_ms = target.millis_since(now);
            self.displayed = if remaining_ms <= 0 {
                0
            } else {
                // Half a second rounds up.
                ((remaining_ms + 500) / 1000) as u64
            };
        }
        self.displayed
    }

    /// Seconds currently shown.
    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    pub fn target(&self) -> Option<Timestamp> {
        self.target
    }

    /// Whether a target exists, i.e. whether ticking changes anything.
    pub fn is_ticking(&self) -> bool {
        self.target.is_some()
    }

    /// Forget the target; the display returns to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn no_reading_means_no_ticking() {
        let mut c = CountdownReconciler::new();
        assert!(!c.is_ticking());
        assert_eq!(c.tick(at(5_000)), 0);
        assert!(!c.observe(None, at(5_000)));
        assert_eq!(c.displayed(), 0);
    }

    #[test]
    fn first_reading_sets_target_and_display() {
        let mut c = CountdownReconciler::new();
        assert!(c.observe(Some(90), at(1_000)));
        assert_eq!(c.displayed(), 90);
        assert_eq!(c.target(), Some(at(91_000)));
        assert!(c.is_ticking());
    }

    #[test]
    fn ticks_down_from_target() {
        let mut c = CountdownReconciler::new();
        c.observe(Some(10), at(0));
        assert_eq!(c.tick(at(1_000)), 9);
        assert_eq!(c.tick(at(9_400)), 1);
        assert_eq!(c.tick(at(9_600)), 0);
        assert_eq!(c.tick(at(60_000)), 0);
    }

    #[test]
    fn half_second_rounds_up() {
        let mut c = CountdownReconciler::new();
        c.observe(Some(10), at(0));
        assert_eq!(c.tick(at(8_500)), 2);
        assert_eq!(c.tick(at(8_501)), 1);
    }

    #[test]
    fn jitter_within_tolerance_keeps_target() {
        let mut c = CountdownReconciler::new();
        c.observe(Some(100), at(0));
        // 30s later the chain says 69: implied target is 1s late.
        assert!(!c.observe(Some(69), at(30_000)));
        assert_eq!(c.target(), Some(at(100_000)));
        assert_eq!(c.tick(at(30_000)), 70);
    }

    #[test]
    fn exactly_two_seconds_is_still_jitter() {
        let mut c = CountdownReconciler::new();
        c.observe(Some(100), at(0));
        assert!(!c.observe(Some(102), at(0)));
        assert!(c.observe(Some(103), at(0)));
    }

    #[test]
    fn material_drift_resyncs() {
        let mut c = CountdownReconciler::new();
        c.observe(Some(0), at(0));
        assert_eq!(c.tick(at(5_000)), 0);
        // A burn happened and the cooldown restarted.
        assert!(c.observe(Some(3_600), at(5_000)));
        assert_eq!(c.displayed(), 3_600);
        assert_eq!(c.tick(at(6_000)), 3_599);
    }

    #[test]
    fn repeated_reading_is_ignored() {
        let mut c = CountdownReconciler::new();
        c.observe(Some(50), at(0));
        assert!(!c.observe(Some(50), at(20_000)));
        assert_eq!(c.target(), Some(at(50_000)));
    }

    #[test]
    fn repeated_reading_after_it_ran_out_restarts() {
        let mut c = CountdownReconciler::new();
        c.observe(Some(10), at(0));
        assert_eq!(c.tick(at(30_000)), 0);
        // A burn in between restarted a cooldown of the same length.
        assert!(c.observe(Some(10), at(30_000)));
        assert_eq!(c.target(), Some(at(40_000)));
        assert_eq!(c.displayed(), 10);
        assert_eq!(c.tick(at(31_000)), 9);
    }

    #[test]
    fn absent_reading_keeps_last_target() {
        let mut c = CountdownReconciler::new();
        c.observe(Some(10), at(0));
        assert!(!c.observe(None, at(1_000)));
        assert_eq!(c.tick(at(5_000)), 5);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut c = CountdownReconciler::new();
        c.observe(Some(10), at(0));
        c.reset();
        assert!(!c.is_ticking());
        assert_eq!(c.displayed(), 0);
        assert!(c.observe(Some(10), at(0)));
    }
}
