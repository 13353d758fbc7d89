#![forbid(unsafe_code)]

//! Site configuration as data.
//!
//! Captures every tunable delay and threshold of the interaction layer as a
//! single [`SiteConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # yatra.toml
//! [hero]
//! interval_ms = 7000
//!
//! [scroll]
//! nav_lookahead_px = 150.0
//! ```
//!
//! ```rust,ignore
//! let config = SiteConfig::from_toml_file("yatra.toml")?;
//! let config = SiteConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `SiteConfig::default()` reproduces the stock page behavior: 5s hero
//! slides, 6s testimonials, 1s settle after manual interaction, 50px swipe
//! threshold, 200px nav lookahead, 4s toasts, 300ms modal close.
//!
//! Missing sections take the site defaults. Missing fields inside a
//! section take that section type's defaults.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use yatra_core::gesture::SwipeConfig;

const fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

// ---------------------------------------------------------------------------
// Top-level SiteConfig
// ---------------------------------------------------------------------------

/// Top-level configuration for one site session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SiteConfig {
    /// Hero slider cadence.
    pub hero: CarouselPolicy,
    /// Testimonial rotator cadence.
    pub testimonials: CarouselPolicy,
    /// Touch swipe recognition.
    pub gesture: GesturePolicy,
    /// Scroll handling and nav highlighting.
    pub scroll: ScrollPolicy,
    /// Resize handling.
    pub resize: ResizePolicy,
    /// Reveal, counter, and lazy-image observers.
    pub observer: ObserverPolicy,
    /// Toast display.
    pub notifications: NotificationPolicy,
    /// Booking modal transitions.
    pub booking: BookingPolicy,
    /// Package search highlighting.
    pub search: SearchPolicy,
    /// Delays used by the informational stubs.
    pub stubs: StubPolicy,
    /// Loading screen timings.
    pub loading: LoadingPolicy,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            hero: CarouselPolicy::default(),
            testimonials: CarouselPolicy {
                interval_ms: 6000,
                ..CarouselPolicy::default()
            },
            gesture: GesturePolicy::default(),
            scroll: ScrollPolicy::default(),
            resize: ResizePolicy::default(),
            observer: ObserverPolicy::default(),
            notifications: NotificationPolicy::default(),
            booking: BookingPolicy::default(),
            search: SearchPolicy::default(),
            stubs: StubPolicy::default(),
            loading: LoadingPolicy::default(),
        }
    }
}

impl SiteConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, policy) in [("hero", &self.hero), ("testimonials", &self.testimonials)] {
            if policy.interval_ms == 0 {
                errors.push(format!("{name}.interval_ms must be > 0"));
            }
        }

        if !self.gesture.swipe_threshold_px.is_finite() || self.gesture.swipe_threshold_px < 0.0 {
            errors.push(format!(
                "gesture.swipe_threshold_px must be a non-negative number, got {}",
                self.gesture.swipe_threshold_px
            ));
        }

        if !self.scroll.nav_lookahead_px.is_finite() {
            errors.push("scroll.nav_lookahead_px must be finite".into());
        }

        for (name, value) in [
            ("observer.reveal_threshold", self.observer.reveal_threshold),
            ("observer.counter_threshold", self.observer.counter_threshold),
            ("observer.lazy_threshold", self.observer.lazy_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{name} must be in [0, 1], got {value}"));
            }
        }

        if self.observer.counter_frames == 0 {
            errors.push("observer.counter_frames must be > 0".into());
        }

        if self.notifications.display_ms == 0 {
            errors.push("notifications.display_ms must be > 0".into());
        }

        if self.notifications.max_visible == 0 {
            errors.push("notifications.max_visible must be > 0".into());
        }
        if self.notifications.max_visible > 1 && self.notifications.max_queued == 0 {
            errors.push("notifications.max_queued must be > 0 when stacking".into());
        }

        errors
    }

    /// Return `self` if valid, otherwise the collected validation errors.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Auto-advance timing for one carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CarouselPolicy {
    /// Time between automatic advances.
    pub interval_ms: u64,
    /// Pause after a manual advance before the cadence resumes.
    pub settle_ms: u64,
    /// Start rotating as soon as the session starts.
    pub auto_start: bool,
}

impl Default for CarouselPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            settle_ms: 1000,
            auto_start: true,
        }
    }
}

impl CarouselPolicy {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        ms(self.interval_ms)
    }

    #[must_use]
    pub const fn settle(&self) -> Duration {
        ms(self.settle_ms)
    }
}

/// Touch swipe recognition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GesturePolicy {
    /// Minimum horizontal travel (exclusive).
    pub swipe_threshold_px: f32,
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50.0,
        }
    }
}

impl GesturePolicy {
    /// Recognizer configuration for this policy.
    #[must_use]
    pub fn swipe_config(&self) -> SwipeConfig {
        SwipeConfig {
            threshold: self.swipe_threshold_px,
        }
    }
}

/// Scroll handling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ScrollPolicy {
    /// Trailing-edge debounce for scroll callbacks.
    pub debounce_ms: u64,
    /// Offset added to `scrollY` before testing section bounds.
    pub nav_lookahead_px: f64,
    /// Navbar gets the `scrolled` class beyond this offset.
    pub navbar_scrolled_after_px: f64,
    /// Back-to-top button shows beyond this offset.
    pub back_to_top_after_px: f64,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            nav_lookahead_px: 200.0,
            navbar_scrolled_after_px: 100.0,
            back_to_top_after_px: 500.0,
        }
    }
}

impl ScrollPolicy {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        ms(self.debounce_ms)
    }
}

/// Resize handling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ResizePolicy {
    pub debounce_ms: u64,
    /// The mobile menu is closed when the width exceeds this value.
    pub mobile_breakpoint_px: u32,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            mobile_breakpoint_px: 768,
        }
    }
}

impl ResizePolicy {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        ms(self.debounce_ms)
    }
}

/// Visibility observers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ObserverPolicy {
    /// Visible ratio that reveals a card.
    pub reveal_threshold: f32,
    /// Bottom inset applied to the viewport for reveal checks.
    pub reveal_bottom_margin_px: f64,
    /// Visible ratio that starts a counter.
    pub counter_threshold: f32,
    /// Animation frames for a counter to reach its target.
    pub counter_frames: u32,
    /// Visible ratio that loads a lazy image (`0` means any overlap).
    pub lazy_threshold: f32,
}

impl Default for ObserverPolicy {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50.0,
            counter_threshold: 0.7,
            counter_frames: 100,
            lazy_threshold: 0.0,
        }
    }
}

/// Toast display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NotificationPolicy {
    /// How long a toast stays visible.
    pub display_ms: u64,
    /// `1` replaces the visible toast on every push; larger values stack.
    pub max_visible: usize,
    /// Maximum toasts waiting to be shown when stacking.
    pub max_queued: usize,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            display_ms: 4000,
            max_visible: 1,
            max_queued: 8,
        }
    }
}

impl NotificationPolicy {
    #[must_use]
    pub const fn display(&self) -> Duration {
        ms(self.display_ms)
    }
}

/// Booking modal transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BookingPolicy {
    /// Delay between removing `active` and hiding the modal.
    pub close_delay_ms: u64,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            close_delay_ms: 300,
        }
    }
}

impl BookingPolicy {
    #[must_use]
    pub const fn close_delay(&self) -> Duration {
        ms(self.close_delay_ms)
    }
}

/// Package search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SearchPolicy {
    /// Delay between scrolling to the packages and highlighting matches.
    pub highlight_delay_ms: u64,
    /// How long matches stay highlighted.
    pub highlight_ms: u64,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            highlight_delay_ms: 500,
            highlight_ms: 5000,
        }
    }
}

impl SearchPolicy {
    #[must_use]
    pub const fn highlight_delay(&self) -> Duration {
        ms(self.highlight_delay_ms)
    }

    #[must_use]
    pub const fn highlight(&self) -> Duration {
        ms(self.highlight_ms)
    }
}

/// Delays for the booking/explore stubs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct StubPolicy {
    /// "Book package/experience" opens the modal after this delay.
    pub booking_open_delay_ms: u64,
    /// "Explore destination" shows details after this delay.
    pub explore_delay_ms: u64,
}

impl Default for StubPolicy {
    fn default() -> Self {
        Self {
            booking_open_delay_ms: 500,
            explore_delay_ms: 1000,
        }
    }
}

impl StubPolicy {
    #[must_use]
    pub const fn booking_open_delay(&self) -> Duration {
        ms(self.booking_open_delay_ms)
    }

    #[must_use]
    pub const fn explore_delay(&self) -> Duration {
        ms(self.explore_delay_ms)
    }
}

/// Loading screen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct LoadingPolicy {
    /// Start fading out after this long.
    pub fade_after_ms: u64,
    /// Hide completely this long after the fade starts.
    pub hide_after_fade_ms: u64,
}

impl Default for LoadingPolicy {
    fn default() -> Self {
        Self {
            fade_after_ms: 2000,
            hide_after_fade_ms: 500,
        }
    }
}

impl LoadingPolicy {
    #[must_use]
    pub const fn fade_after(&self) -> Duration {
        ms(self.fade_after_ms)
    }

    #[must_use]
    pub const fn hide_after_fade(&self) -> Duration {
        ms(self.hide_after_fade_ms)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`SiteConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_page() {
        let c = SiteConfig::default();
        assert_eq!(c.hero.interval(), Duration::from_millis(5000));
        assert_eq!(c.testimonials.interval(), Duration::from_millis(6000));
        assert_eq!(c.hero.settle(), Duration::from_millis(1000));
        assert_eq!(c.gesture.swipe_threshold_px, 50.0);
        assert_eq!(c.scroll.nav_lookahead_px, 200.0);
        assert_eq!(c.scroll.debounce(), Duration::from_millis(10));
        assert_eq!(c.resize.debounce(), Duration::from_millis(250));
        assert_eq!(c.observer.counter_frames, 100);
        assert_eq!(c.notifications.display(), Duration::from_millis(4000));
        assert_eq!(c.booking.close_delay(), Duration::from_millis(300));
        assert_eq!(c.loading.fade_after(), Duration::from_millis(2000));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SiteConfig::default().validate().is_empty());
        assert!(SiteConfig::default().validated().is_ok());
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut c = SiteConfig::default();
        c.hero.interval_ms = 0;
        c.observer.reveal_threshold = 1.5;
        c.observer.counter_frames = 0;
        c.notifications.max_visible = 0;
        c.gesture.swipe_threshold_px = f32::NAN;
        let errors = c.validate();
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("hero.interval_ms")));
    }

    #[test]
    fn stacking_needs_a_queue() {
        let mut c = SiteConfig::default();
        c.notifications.max_queued = 0;
        assert!(c.validate().is_empty());
        c.notifications.max_visible = 3;
        let errors = c.validate();
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(errors[0].contains("notifications.max_queued"));
    }

    #[test]
    fn validated_wraps_errors() {
        let mut c = SiteConfig::default();
        c.testimonials.interval_ms = 0;
        match c.validated() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn display_joins_validation_errors() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }
}
