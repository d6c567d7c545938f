//! Single-shot, deadline-based debounce timer.
//!
//! The timer never runs on its own: the owner polls it with the current
//! time (typically once per frame). Arming replaces any previous deadline,
//! so at most one deferred commit can be outstanding.

use std::time::{Duration, Instant};

/// Default quiet period before a typed value is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any outstanding deadline and schedule a new one `delay` after
    /// `now`. Returns the new deadline.
    pub fn arm(&mut self, now: Instant) -> Instant {
        let deadline = now + self.delay;
        self.deadline = Some(deadline);
        deadline
    }

    /// Drop the outstanding deadline. Returns `true` if one was armed.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, or `None` if not armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Fire the timer if its deadline has passed.
    ///
    /// Returns `true` exactly once per armed deadline; the timer is disarmed
    /// when it fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_deadline() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        timer.arm(t0);

        assert!(!timer.poll(t0 + Duration::from_millis(99)));
        assert!(timer.poll(t0 + Duration::from_millis(100)));
        assert!(!timer.poll(t0 + Duration::from_millis(500)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn rearming_replaces_previous_deadline() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        timer.arm(t0);
        let second = timer.arm(t0 + Duration::from_millis(80));

        assert_eq!(timer.deadline(), Some(second));
        assert!(!timer.poll(t0 + Duration::from_millis(150)));
        assert!(timer.poll(t0 + Duration::from_millis(180)));
        assert!(!timer.poll(t0 + Duration::from_millis(1_000)));
    }

    #[test]
    fn cancel_reports_whether_armed() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::default();
        assert!(!timer.cancel());
        timer.arm(t0);
        assert!(timer.cancel());
        assert!(!timer.poll(t0 + DEFAULT_DEBOUNCE));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let t0 = Instant::now();
        let mut timer = DebounceTimer::new(Duration::from_millis(100));
        assert_eq!(timer.remaining(t0), None);
        timer.arm(t0);
        assert_eq!(
            timer.remaining(t0 + Duration::from_millis(40)),
            Some(Duration::from_millis(60))
        );
        assert_eq!(
            timer.remaining(t0 + Duration::from_millis(400)),
            Some(Duration::ZERO)
        );
    }
}
