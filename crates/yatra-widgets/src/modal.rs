#![forbid(unsafe_code)]

//! Booking modal lifecycle.
//!
//! State machine: `Closed → Open → Closing → Closed`.
//!
//! Closing removes the `active` class at once and keeps the modal displayed
//! (and the body scroll-locked) for the close delay so the CSS transition
//! can play. Re-opening during that window cancels the pending hide.

use std::time::Duration;

use yatra_core::event::{ClickRegion, KeyCode};

/// Current phase of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
    /// Transitioning out; hidden at `hide_at`.
    Closing { hide_at: Duration },
}

/// Render-ready snapshot of the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalView {
    /// `active` class present.
    pub active: bool,
    /// `display: flex` (otherwise `none`).
    pub displayed: bool,
    /// Body `overflow: hidden` requested by the modal.
    pub locks_scroll: bool,
}

/// Booking modal.
#[derive(Debug, Clone)]
pub struct BookingModal {
    phase: ModalPhase,
    close_delay: Duration,
}

impl BookingModal {
    #[must_use]
    pub fn new(close_delay: Duration) -> Self {
        Self {
            phase: ModalPhase::Closed,
            close_delay,
        }
    }

    /// Show the modal. Returns `true` if it was not already open.
    pub fn open(&mut self) -> bool {
        if self.phase == ModalPhase::Open {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "modal.open", from = ?self.phase);
        self.phase = ModalPhase::Open;
        true
    }

    /// Start closing. Returns `true` if the modal was open.
    pub fn close(&mut self, now: Duration) -> bool {
        if self.phase != ModalPhase::Open {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "modal.close");
        self.phase = ModalPhase::Closing {
            hide_at: now.saturating_add(self.close_delay),
        };
        true
    }

    /// Finish a pending close. Returns `true` if the modal became hidden.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.phase {
            ModalPhase::Closing { hide_at } if now >= hide_at => {
                self.phase = ModalPhase::Closed;
                true
            }
            _ => false,
        }
    }

    /// Escape closes an open modal.
    pub fn on_key(&mut self, code: KeyCode, now: Duration) -> bool {
        code == KeyCode::Escape && self.close(now)
    }

    /// A click on the backdrop closes an open modal.
    pub fn on_click(&mut self, region: ClickRegion, now: Duration) -> bool {
        region == ClickRegion::ModalBackdrop && self.close(now)
    }

    #[must_use]
    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.phase {
            ModalPhase::Closing { hide_at } => Some(hide_at),
            _ => None,
        }
    }

    #[must_use]
    pub fn view(&self) -> ModalView {
        match self.phase {
            ModalPhase::Closed => ModalView::default(),
            ModalPhase::Open => ModalView {
                active: true,
                displayed: true,
                locks_scroll: true,
            },
            ModalPhase::Closing { .. } => ModalView {
                active: false,
                displayed: true,
                locks_scroll: true,
            },
        }
    }
}
