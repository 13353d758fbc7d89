#![forbid(unsafe_code)]

//! Monotonic clocks.
//!
//! Everything in Yatra takes time as a [`Duration`] since an arbitrary
//! origin. Browser hosts advance a [`DeterministicClock`] explicitly from
//! `requestAnimationFrame` timestamps; native hosts can use
//! [`MonotonicClock`], which reads `web_time::Instant`.

use std::time::Duration;

use web_time::Instant;

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now_mono(&self) -> Duration;
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Moving backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

impl Clock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        self.now
    }
}

/// Wall-backed monotonic clock (works on `wasm32` through `web-time`).
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_mono(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Convert a host timestamp in milliseconds to a [`Duration`].
///
/// Non-finite and non-positive values map to zero; values too large for a
/// `Duration` saturate to [`Duration::MAX`].
#[must_use]
pub fn duration_from_millis_f64(millis: f64) -> Duration {
    if !millis.is_finite() || millis <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX)
}
