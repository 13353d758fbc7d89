#![forbid(unsafe_code)]

//! Transient toast notifications.
//!
//! A [`Toast`] carries a message and a [`ToastKind`]. It becomes visible when
//! the queue shows it at some `now` and stays visible until
//! `now + duration`, or until it is dismissed. Time is always supplied by
//! the caller.

use std::time::Duration;

/// Unique identifier of a toast within one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Visual category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
    /// Green, check icon.
    #[default]
    Success,
    /// Red, exclamation icon.
    Error,
    /// Neutral, info icon.
    Info,
}

impl ToastKind {
    /// Font Awesome icon classes for this kind.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Error => "fas fa-exclamation-circle",
            Self::Info => "fas fa-info-circle",
        }
    }

    /// CSS modifier class applied to the toast element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A single toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
    /// Display duration; `None` keeps the toast until dismissed.
    duration: Option<Duration>,
    visible_until: Option<Duration>,
    shown: bool,
    dismissed: bool,
}

impl Toast {
    /// Create a hidden toast.
    #[must_use]
    pub fn new(id: ToastId, kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
            duration: Some(Duration::from_millis(4000)),
            visible_until: None,
            shown: false,
            dismissed: false,
        }
    }

    /// Set the display duration.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Keep the toast until it is dismissed.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.duration = None;
        self
    }

    /// Make the toast visible starting at `now`.
    pub fn show(&mut self, now: Duration) {
        self.shown = true;
        self.visible_until = self.duration.map(|d| now.saturating_add(d));
    }

    /// Hide the toast immediately.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    /// Whether the toast is on screen at `now`.
    #[must_use]
    pub fn is_visible(&self, now: Duration) -> bool {
        if !self.shown || self.dismissed {
            return false;
        }
        match self.visible_until {
            Some(until) => now < until,
            None => true,
        }
    }

    /// Expiry deadline, if shown with a finite duration.
    #[inline]
    #[must_use]
    pub fn visible_until(&self) -> Option<Duration> {
        self.visible_until
    }

    #[inline]
    #[must_use]
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_shown() {
        let t = Toast::new(ToastId::new(1), ToastKind::Info, "hi");
        assert!(!t.is_visible(Duration::ZERO));
    }

    #[test]
    fn expires_after_duration() {
        let mut t = Toast::new(ToastId::new(1), ToastKind::Success, "saved");
        t.show(Duration::from_millis(100));
        assert!(t.is_visible(Duration::from_millis(4099)));
        assert!(!t.is_visible(Duration::from_millis(4100)));
        assert_eq!(t.visible_until(), Some(Duration::from_millis(4100)));
    }

    #[test]
    fn persistent_until_dismissed() {
        let mut t = Toast::new(ToastId::new(2), ToastKind::Error, "oops").persistent();
        t.show(Duration::ZERO);
        assert!(t.is_visible(Duration::from_secs(3600)));
        t.dismiss();
        assert!(!t.is_visible(Duration::from_secs(3600)));
    }

    #[test]
    fn kinds_map_to_icons() {
        assert_eq!(ToastKind::Success.icon(), "fas fa-check-circle");
        assert_eq!(ToastKind::Error.icon(), "fas fa-exclamation-circle");
        assert_eq!(ToastKind::Error.class_name(), "error");
    }
}
