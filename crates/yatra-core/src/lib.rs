#![forbid(unsafe_code)]

//! Core: host events, gesture recognition, debouncing, and cadence timing.
//!
//! # Role in Yatra
//! `yatra-core` is the input layer. The embedding page translates browser
//! events into [`event::Event`] values; everything downstream consumes those
//! values and an explicit monotonic `now` instead of reading the DOM or the
//! wall clock.
//!
//! # Primary responsibilities
//! - **Event**: canonical host events (keys, touches, scroll, resize, clicks,
//!   intersection reports).
//! - **Gesture**: horizontal swipe detection from touch start/end pairs.
//! - **Debounce**: trailing-edge rate limiting for scroll and resize bursts.
//! - **Cadence**: the auto-advance timer used by every carousel.
//! - **Geometry**: section bounds, viewport, and visibility ratios.
//!
//! # How it fits in the system
//! `yatra-widgets` builds the interaction engines on top of these types and
//! `yatra-web` drives them from a host-controlled clock.

pub mod cadence;
pub mod debounce;
pub mod event;
pub mod geometry;
pub mod gesture;
