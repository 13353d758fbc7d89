#![forbid(unsafe_code)]

//! Auto-advancing, steppable carousel engine.
//!
//! One engine drives both the hero slider and the testimonial rotator. The
//! engine owns the active index and the [`Cadence`] that advances it; the
//! host renders the [`CarouselView`] it derives (active item, dot states,
//! and the track transform).
//!
//! # Invariants
//!
//! 1. With `len > 0`, `active < len` always holds and exactly one item is
//!    active.
//! 2. With `len == 0`, every operation is a no-op and the cadence never
//!    starts.
//! 3. `len` forward steps return to the starting index; a backward step
//!    undoes a forward step.
//! 4. Every manual transition re-arms the cadence, so the next automatic
//!    advance happens exactly `settle + interval` later and at most one
//!    re-arm is ever pending.

use std::time::Duration;

use yatra_core::cadence::Cadence;
use yatra_core::gesture::{Swipe, SwipeDirection};

/// Step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// Map the `+1` / `-1` convention used by inline page handlers.
    ///
    /// Zero has no direction.
    #[must_use]
    pub const fn from_sign(sign: i32) -> Option<Self> {
        if sign > 0 {
            Some(Self::Forward)
        } else if sign < 0 {
            Some(Self::Backward)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

impl From<SwipeDirection> for Direction {
    /// Swiping left reveals the next item.
    fn from(swipe: SwipeDirection) -> Self {
        match swipe {
            SwipeDirection::Left => Self::Forward,
            SwipeDirection::Right => Self::Backward,
        }
    }
}

/// Wrap any signed index into `[0, len)`. `None` when `len == 0`.
#[must_use]
pub fn normalize_index(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = i64::try_from(len).ok()?;
    usize::try_from(index.rem_euclid(len)).ok()
}

/// Index one step from `active` in `direction`, wrapping at both ends.
#[must_use]
pub fn step_index(active: usize, len: usize, direction: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    match direction {
        Direction::Forward => (active + 1) % len,
        Direction::Backward => (active + len - 1) % len,
    }
}

/// Position state of one carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationState {
    pub len: usize,
    pub active: usize,
    /// Direction of the most recent transition.
    pub direction: Direction,
}

/// What caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdvanceReason {
    /// The cadence fired.
    Auto,
    /// A prev/next control was used.
    Manual,
    /// A dot was clicked.
    Jump,
    /// A touch swipe was recognized.
    Swipe,
}

/// One index change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub reason: AdvanceReason,
}

/// Render-ready snapshot of a carousel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CarouselView {
    pub active: usize,
    pub len: usize,
}

impl CarouselView {
    /// Whether item (and dot) `index` carries the `active` class.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.len > 0 && index == self.active
    }

    /// CSS transform for the sliding track.
    #[must_use]
    pub fn track_transform(&self) -> String {
        format!("translateX(-{}%)", self.active * 100)
    }
}

/// Carousel engine.
#[derive(Debug, Clone)]
pub struct Carousel {
    label: &'static str,
    state: RotationState,
    cadence: Cadence,
    paused: bool,
}

impl Carousel {
    /// Create a stopped carousel over `len` items, starting at index 0.
    #[must_use]
    pub fn new(label: &'static str, len: usize, interval: Duration, settle: Duration) -> Self {
        Self {
            label,
            state: RotationState {
                len,
                active: 0,
                direction: Direction::Forward,
            },
            cadence: Cadence::new(interval, settle),
            paused: false,
        }
    }

    /// Begin auto-rotation. No-op for an empty carousel.
    pub fn start(&mut self, now: Duration) {
        if self.is_empty() || self.paused {
            return;
        }
        self.cadence.start(now);
    }

    /// Step once in `direction` and re-arm auto-rotation.
    pub fn advance(&mut self, direction: Direction, now: Duration) -> Option<Transition> {
        self.manual(direction, AdvanceReason::Manual, now)
    }

    /// Show `index` (wrapped into range) and re-arm auto-rotation.
    pub fn jump_to(&mut self, index: i64, now: Duration) -> Option<Transition> {
        let to = normalize_index(index, self.state.len)?;
        let from = self.state.active;
        let direction = if to < from {
            Direction::Backward
        } else {
            Direction::Forward
        };
        let transition = self.apply(to, direction, AdvanceReason::Jump);
        self.rearm(now);
        Some(transition)
    }

    /// React to a recognized swipe.
    pub fn on_swipe(&mut self, swipe: &Swipe, now: Duration) -> Option<Transition> {
        self.manual(swipe.direction.into(), AdvanceReason::Swipe, now)
    }

    /// Run due auto-advances. Missed fires collapse into one transition
    /// landing where stepping once per fire would have.
    pub fn tick(&mut self, now: Duration) -> Option<Transition> {
        let fires = self.cadence.poll(now);
        if fires == 0 || self.is_empty() {
            return None;
        }
        let steps = fires as usize % self.state.len;
        let to = (self.state.active + steps) % self.state.len;
        Some(self.apply(to, Direction::Forward, AdvanceReason::Auto))
    }

    /// Stop auto-rotation until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        self.paused = true;
        self.cadence.stop();
    }

    /// Restart auto-rotation one interval from `now`.
    pub fn resume(&mut self, now: Duration) {
        self.paused = false;
        self.start(now);
    }

    #[must_use]
    pub fn view(&self) -> CarouselView {
        CarouselView {
            active: self.state.active,
            len: self.state.len,
        }
    }

    #[inline]
    #[must_use]
    pub fn active(&self) -> usize {
        self.state.active
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.len == 0
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn state(&self) -> RotationState {
        self.state
    }

    #[must_use]
    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    /// Next instant at which `tick` would advance.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.cadence.next_deadline()
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    fn manual(
        &mut self,
        direction: Direction,
        reason: AdvanceReason,
        now: Duration,
    ) -> Option<Transition> {
        if self.is_empty() {
            return None;
        }
        let to = step_index(self.state.active, self.state.len, direction);
        let transition = self.apply(to, direction, reason);
        self.rearm(now);
        Some(transition)
    }

    fn rearm(&mut self, now: Duration) {
        if !self.paused {
            self.cadence.rearm(now);
        }
    }

    fn apply(&mut self, to: usize, direction: Direction, reason: AdvanceReason) -> Transition {
        let from = self.state.active;
        self.state.active = to;
        self.state.direction = direction;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "carousel.advance",
            carousel = self.label,
            from,
            to,
            reason = ?reason
        );
        Transition {
            from,
            to,
            direction,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yatra_core::event::TouchSurface;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn hero(len: usize) -> Carousel {
        Carousel::new("hero", len, ms(5000), ms(1000))
    }

    #[test]
    fn forward_wraps_to_zero() {
        let mut c = hero(3);
        c.advance(Direction::Forward, ms(0));
        c.advance(Direction::Forward, ms(0));
        let t = c.advance(Direction::Forward, ms(0)).unwrap();
        assert_eq!((t.from, t.to), (2, 0));
    }

    #[test]
    fn backward_from_zero_wraps_to_last() {
        let mut c = hero(4);
        let t = c.advance(Direction::Backward, ms(0)).unwrap();
        assert_eq!(t.to, 3);
        assert_eq!(c.view().track_transform(), "translateX(-300%)");
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut c = hero(0);
        c.start(ms(0));
        assert!(!c.cadence().is_active());
        assert!(c.advance(Direction::Forward, ms(0)).is_none());
        assert!(c.jump_to(2, ms(0)).is_none());
        assert!(c.tick(ms(100_000)).is_none());
        assert!(!c.view().is_active(0));
    }

    #[test]
    fn auto_advances_every_interval() {
        let mut c = hero(3);
        c.start(ms(0));
        assert!(c.tick(ms(4999)).is_none());
        let t = c.tick(ms(5000)).unwrap();
        assert_eq!(t.reason, AdvanceReason::Auto);
        assert_eq!(c.active(), 1);
        let t = c.tick(ms(15_000)).unwrap();
        assert_eq!((t.from, t.to), (1, 0));
        assert_eq!(c.active(), 0);
    }

    #[test]
    fn far_future_tick_moves_once() {
        let mut c = hero(3);
        c.start(ms(0));
        // 17_280 missed fires over a day; 17_280 % 3 == 0.
        let t = c.tick(ms(86_402_500)).unwrap();
        assert_eq!((t.from, t.to), (0, 0));
        assert!(c.tick(Duration::MAX).is_some());
        assert!(c.active() < c.len());
        assert_eq!(c.next_deadline(), Some(Duration::MAX));
    }

    #[test]
    fn manual_advance_defers_next_auto_by_settle_plus_interval() {
        let mut c = hero(3);
        c.start(ms(0));
        c.advance(Direction::Forward, ms(3000));
        assert_eq!(c.next_deadline(), Some(ms(9000)));
        assert!(c.tick(ms(8999)).is_none());
        assert!(c.tick(ms(9000)).is_some());
        assert_eq!(c.active(), 2);
    }

    #[test]
    fn rapid_manual_advances_leave_one_rearm() {
        let mut c = hero(5);
        c.start(ms(0));
        for t in [100, 200, 300, 400] {
            c.advance(Direction::Forward, ms(t));
        }
        assert_eq!(c.next_deadline(), Some(ms(400 + 1000 + 5000)));
        assert!(c.tick(ms(6400)).is_some());
    }

    #[test]
    fn jump_normalizes_index() {
        let mut c = Carousel::new("testimonials", 3, ms(6000), ms(1000));
        assert_eq!(c.jump_to(7, ms(0)).unwrap().to, 1);
        assert_eq!(c.jump_to(-1, ms(0)).unwrap().to, 2);
        assert!(c.view().is_active(2));
        assert!(!c.view().is_active(1));
    }

    #[test]
    fn swipe_maps_to_direction() {
        let mut c = hero(3);
        let left = Swipe {
            surface: TouchSurface::Hero,
            direction: SwipeDirection::Left,
            delta: 60.0,
        };
        assert_eq!(c.on_swipe(&left, ms(0)).unwrap().to, 1);
        let right = Swipe {
            direction: SwipeDirection::Right,
            delta: -60.0,
            ..left
        };
        assert_eq!(c.on_swipe(&right, ms(0)).unwrap().to, 0);
    }

    #[test]
    fn pause_stops_and_resume_restarts() {
        let mut c = hero(3);
        c.start(ms(0));
        c.pause();
        c.advance(Direction::Forward, ms(100));
        assert!(c.tick(ms(60_000)).is_none());
        c.resume(ms(60_000));
        assert_eq!(c.next_deadline(), Some(ms(65_000)));
    }

    #[test]
    fn normalize_and_step_helpers() {
        assert_eq!(normalize_index(-4, 3), Some(2));
        assert_eq!(normalize_index(0, 0), None);
        assert_eq!(step_index(0, 1, Direction::Backward), 0);
        assert_eq!(Direction::from_sign(-1), Some(Direction::Backward));
        assert_eq!(Direction::from_sign(0), None);
        assert_eq!(Direction::Forward.reverse(), Direction::Backward);
    }
}
