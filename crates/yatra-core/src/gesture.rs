#![forbid(unsafe_code)]

//! Swipe recognition: turns touch start/end pairs into horizontal swipes.
//!
//! [`SwipeRecognizer`] is a small stateful processor. A touch start records
//! the surface and x position; the matching touch end computes
//! `delta = start_x - end_x` and emits a [`Swipe`] when `|delta|` is strictly
//! greater than the configured threshold.
//!
//! # Invariants
//!
//! 1. At most one swipe is emitted per start/end pair.
//! 2. A touch end without a preceding start on the same surface emits nothing.
//! 3. Deltas at or below the threshold are treated as noise.
//! 4. After `reset()` or a cancel, the recognizer is idle.

use crate::event::{Event, TouchPhase, TouchSurface};

/// Thresholds for swipe recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Minimum horizontal travel in CSS pixels (default: 50).
    pub threshold: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self { threshold: 50.0 }
    }
}

/// Horizontal swipe direction, named by finger travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Finger moved right-to-left; shows the next item.
    Left,
    /// Finger moved left-to-right; shows the previous item.
    Right,
}

/// A recognized swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub surface: TouchSurface,
    pub direction: SwipeDirection,
    /// `start_x - end_x`; positive for left swipes.
    pub delta: f32,
}

/// Stateful swipe recognizer.
#[derive(Debug, Clone, Default)]
pub struct SwipeRecognizer {
    config: SwipeConfig,
    start: Option<(TouchSurface, f32)>,
}

impl SwipeRecognizer {
    /// Create a recognizer with the given configuration.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            start: None,
        }
    }

    /// Process a host event, returning a swipe if one completed.
    pub fn process(&mut self, event: &Event) -> Option<Swipe> {
        let Event::Touch(touch) = event else {
            return None;
        };
        match touch.phase {
            TouchPhase::Start => {
                self.touch_start(touch.surface, touch.x);
                None
            }
            TouchPhase::End => self.touch_end(touch.surface, touch.x),
            TouchPhase::Cancel => {
                self.reset();
                None
            }
        }
    }

    /// Record the start of a touch.
    pub fn touch_start(&mut self, surface: TouchSurface, x: f32) {
        self.start = Some((surface, x));
    }

    /// Finish a touch and classify it.
    pub fn touch_end(&mut self, surface: TouchSurface, x: f32) -> Option<Swipe> {
        let (start_surface, start_x) = self.start.take()?;
        if start_surface != surface {
            return None;
        }
        let delta = start_x - x;
        if !delta.is_finite() || delta.abs() <= self.config.threshold {
            return None;
        }
        let direction = if delta > 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "gesture.swipe", ?surface, ?direction, delta);
        Some(Swipe {
            surface,
            direction,
            delta,
        })
    }

    /// Whether a touch is in progress.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Drop any in-progress touch.
    pub fn reset(&mut self) {
        self.start = None;
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }
}
