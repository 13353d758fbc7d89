#![forbid(unsafe_code)]

//! Deterministic one-shot timer scheduler.
//!
//! The page has a handful of fire-and-forget delays: the loading screen
//! fade, the modal hide after its close transition, opening the booking
//! modal shortly after a "book" click, clearing a search highlight. Instead
//! of scattering `setTimeout` calls through handlers, each delay is a
//! message scheduled here and delivered by [`Scheduler::fire_due`].
//!
//! # How it works
//!
//! 1. `schedule(now, delay, msg)` stores `msg` with deadline `now + delay`
//!    and returns a [`TimerId`].
//! 2. `cancel` / `reschedule` operate on that id; `replace` cancels every
//!    pending timer carrying an equal message before scheduling.
//! 3. `fire_due(now)` removes and returns every message whose deadline is
//!    `<= now`, ordered by deadline, then by scheduling order.
//!
//! Nothing runs on a thread; the host decides when time passes.

use std::time::Duration;

/// Handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Timer<M> {
    id: TimerId,
    deadline: Duration,
    msg: M,
}

/// One-shot timer queue keyed by deadline.
#[derive(Debug, Clone)]
pub struct Scheduler<M> {
    timers: Vec<Timer<M>>,
    next_id: u64,
    fired: u64,
}

impl<M> Default for Scheduler<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Scheduler<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
            fired: 0,
        }
    }

    /// Schedule `msg` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, msg: M) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer {
            id,
            deadline: now.saturating_add(delay),
            msg,
        });
        id
    }

    /// Cancel a pending timer, returning its message.
    pub fn cancel(&mut self, id: TimerId) -> Option<M> {
        let idx = self.timers.iter().position(|t| t.id == id)?;
        Some(self.timers.remove(idx).msg)
    }

    /// Cancel every pending timer whose message matches `pred`.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&M) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| !pred(&t.msg));
        before - self.timers.len()
    }

    /// Move a pending timer to `now + delay`. Returns `false` if it already
    /// fired or was cancelled.
    pub fn reschedule(&mut self, id: TimerId, now: Duration, delay: Duration) -> bool {
        match self.timers.iter_mut().find(|t| t.id == id) {
            Some(timer) => {
                timer.deadline = now.saturating_add(delay);
                true
            }
            None => false,
        }
    }

    /// Remove and return every message due at `now`, earliest first.
    pub fn fire_due(&mut self, now: Duration) -> Vec<M> {
        if !self.timers.iter().any(|t| t.deadline <= now) {
            return Vec::new();
        }
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.deadline <= now);
        self.timers = pending;
        due.sort_by_key(|t| (t.deadline, t.id));
        self.fired = self.fired.saturating_add(due.len() as u64);
        tracing::trace!(message = "scheduler.fire", count = due.len(), now_ms = now.as_millis() as u64);
        due.into_iter().map(|t| t.msg).collect()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Total number of messages delivered so far.
    #[inline]
    #[must_use]
    pub fn fired_count(&self) -> u64 {
        self.fired
    }

    /// Whether a pending timer carries a message matching `pred`.
    #[must_use]
    pub fn contains_where(&self, mut pred: impl FnMut(&M) -> bool) -> bool {
        self.timers.iter().any(|t| pred(&t.msg))
    }
}

impl<M: PartialEq> Scheduler<M> {
    /// Cancel pending timers carrying an equal message, then schedule `msg`.
    pub fn replace(&mut self, now: Duration, delay: Duration, msg: M) -> TimerId {
        self.cancel_where(|m| *m == msg);
        self.schedule(now, delay, msg)
    }
}
