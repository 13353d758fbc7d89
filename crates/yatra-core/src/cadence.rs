#![forbid(unsafe_code)]

//! Auto-advance cadence for rotating content.
//!
//! A [`Cadence`] is the single timer behind one carousel. It has three
//! phases:
//!
//! ```text
//!            start()                    poll() past resume_at
//! Stopped ───────────► Running ◄──────────────────────────── Settling
//!    ▲                   │  ▲                                   ▲
//!    └──── stop() ───────┘  └─ fires every `interval` ─┐        │
//!                                                       └───────┘
//!                                   rearm() from any phase ─────┘
//! ```
//!
//! # Invariants
//!
//! 1. At most one pending deadline exists at any time. `rearm()` replaces
//!    whatever was scheduled, so rapid manual interaction never stacks
//!    timers.
//! 2. After `rearm(t)`, the next fire is at exactly `t + settle + interval`.
//! 3. In `Running`, fires are spaced exactly `interval` apart; a late
//!    `poll()` reports the count of missed fires in constant time.
//! 4. A stopped cadence never fires.

use std::time::Duration;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Current phase of a [`Cadence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadencePhase {
    /// Not scheduled.
    Stopped,
    /// Waiting out the settle delay after manual interaction.
    Settling { resume_at: Duration },
    /// Firing every interval.
    Running { next_due: Duration },
}

/// Repeating timer with a settle-then-resume re-arm.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    settle: Duration,
    phase: CadencePhase,
}

impl Cadence {
    /// Create a stopped cadence. Intervals below 1ms are raised to 1ms.
    #[must_use]
    pub fn new(interval: Duration, settle: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            settle,
            phase: CadencePhase::Stopped,
        }
    }

    /// Begin firing every interval, starting one interval from `now`.
    pub fn start(&mut self, now: Duration) {
        self.phase = CadencePhase::Running {
            next_due: now.saturating_add(self.interval),
        };
    }

    /// Cancel any pending fire.
    pub fn stop(&mut self) {
        self.phase = CadencePhase::Stopped;
    }

    /// Cancel any pending fire and resume after the settle delay.
    pub fn rearm(&mut self, now: Duration) {
        self.phase = CadencePhase::Settling {
            resume_at: now.saturating_add(self.settle),
        };
    }

    /// Advance to `now`, returning how many fires came due.
    pub fn poll(&mut self, now: Duration) -> u32 {
        if let CadencePhase::Settling { resume_at } = self.phase {
            if now < resume_at {
                return 0;
            }
            self.phase = CadencePhase::Running {
                next_due: resume_at.saturating_add(self.interval),
            };
        }
        let CadencePhase::Running { mut next_due } = self.phase else {
            return 0;
        };
        if now < next_due {
            return 0;
        }
        let missed = (now - next_due).as_nanos() / self.interval.as_nanos();
        let fires = missed.saturating_add(1);
        next_due = add_intervals(next_due, self.interval, fires);
        self.phase = CadencePhase::Running { next_due };
        u32::try_from(fires).unwrap_or(u32::MAX)
    }

    /// The next instant at which this cadence needs attention.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.phase {
            CadencePhase::Stopped => None,
            CadencePhase::Settling { resume_at } => Some(resume_at.saturating_add(self.interval)),
            CadencePhase::Running { next_due } => Some(next_due),
        }
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> CadencePhase {
        self.phase
    }

    /// Whether the cadence will eventually fire without further input.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, CadencePhase::Stopped)
    }

    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    #[must_use]
    pub fn settle(&self) -> Duration {
        self.settle
    }
}

/// `base + interval * count`, saturating at `Duration::MAX`.
fn add_intervals(base: Duration, interval: Duration, count: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let Some(total) = interval.as_nanos().checked_mul(count) else {
        return Duration::MAX;
    };
    let Ok(secs) = u64::try_from(total / NANOS_PER_SEC) else {
        return Duration::MAX;
    };
    // Remainder is below one second.
    let nanos = (total % NANOS_PER_SEC) as u32;
    base.saturating_add(Duration::new(secs, nanos))
}
