#![forbid(unsafe_code)]

//! Yatra Runtime
//!
//! Host-independent building blocks that the site session composes:
//!
//! - [`Clock`] / [`DeterministicClock`] / [`MonotonicClock`] - monotonic time sources
//! - [`Scheduler`] - one-shot timers with explicit schedule / cancel / reschedule
//! - [`SiteConfig`] - every tunable delay and threshold in one place
//! - [`PreferenceStore`] - key-value seam for the persisted theme flag
//!
//! # Role in Yatra
//! `yatra-runtime` never touches the DOM. It owns time and configuration so
//! the interaction engines in `yatra-widgets` stay pure, and `yatra-web`
//! can drive everything from a host-controlled clock.

pub mod clock;
pub mod config;
pub mod scheduler;
pub mod storage;

pub use clock::{Clock, DeterministicClock, MonotonicClock, duration_from_millis_f64};
pub use config::{ConfigError, SiteConfig};
pub use scheduler::{Scheduler, TimerId};
pub use storage::{MemoryStore, PreferenceStore, StorageError, THEME_KEY, Theme};

#[cfg(feature = "state-persistence")]
pub use storage::FileStore;
