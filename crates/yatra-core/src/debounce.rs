#![forbid(unsafe_code)]

//! Trailing-edge debouncing for high-frequency host events.
//!
//! Scroll and resize callbacks can arrive many times per frame. A
//! [`Debouncer`] holds only the latest value and releases it once a quiet
//! period of `wait` has elapsed since the most recent push.
//!
//! # Design
//!
//! "Latest wins": each push replaces the pending value and moves the
//! deadline to `now + wait`. Time is an explicit monotonic [`Duration`]
//! supplied by the caller, so behavior is deterministic under test.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use yatra_core::debounce::Debouncer;
//!
//! let mut scroll = Debouncer::new(Duration::from_millis(10));
//! scroll.push(120.0, Duration::from_millis(0));
//! scroll.push(180.0, Duration::from_millis(4));
//! assert_eq!(scroll.poll(Duration::from_millis(10)), None);
//! assert_eq!(scroll.poll(Duration::from_millis(14)), Some(180.0));
//! assert_eq!(scroll.poll(Duration::from_millis(30)), None);
//! ```

use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Duration,
}

/// Trailing-edge debouncer.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<Pending<T>>,
    coalesced: u64,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
            coalesced: 0,
        }
    }

    /// Push a value at `now`. Returns `true` if a pending value was replaced.
    pub fn push(&mut self, value: T, now: Duration) -> bool {
        let replaced = self.pending.is_some();
        if replaced {
            self.coalesced = self.coalesced.saturating_add(1);
        }
        self.pending = Some(Pending {
            value,
            deadline: now.saturating_add(self.wait),
        });
        replaced
    }

    /// Release the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Release the pending value immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Deadline of the pending value, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Quiet period.
    #[inline]
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Number of pushes that replaced a pending value.
    #[inline]
    #[must_use]
    pub fn coalesced_count(&self) -> u64 {
        self.coalesced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn releases_after_quiet_period() {
        let mut d = Debouncer::new(ms(250));
        d.push((1024u32, 768u32), ms(0));
        assert_eq!(d.poll(ms(249)), None);
        assert_eq!(d.poll(ms(250)), Some((1024, 768)));
        assert!(!d.is_pending());
    }

    #[test]
    fn push_extends_deadline_and_latest_wins() {
        let mut d = Debouncer::new(ms(10));
        d.push(1, ms(0));
        assert!(d.push(2, ms(8)));
        assert_eq!(d.deadline(), Some(ms(18)));
        assert_eq!(d.poll(ms(12)), None);
        assert_eq!(d.poll(ms(18)), Some(2));
        assert_eq!(d.coalesced_count(), 1);
    }

    #[test]
    fn flush_ignores_deadline() {
        let mut d = Debouncer::new(ms(100));
        d.push("x", ms(0));
        assert_eq!(d.flush(), Some("x"));
        assert_eq!(d.flush(), None);
    }

    #[test]
    fn cancel_drops_value() {
        let mut d = Debouncer::new(ms(5));
        d.push(7, ms(0));
        d.cancel();
        assert_eq!(d.poll(ms(100)), None);
    }

    #[test]
    fn zero_wait_releases_on_same_tick() {
        let mut d = Debouncer::new(Duration::ZERO);
        d.push(3, ms(4));
        assert_eq!(d.poll(ms(4)), Some(3));
    }
}
