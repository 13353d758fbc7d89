#![forbid(unsafe_code)]

//! Notification queue for toast messages.
//!
//! The queue system provides:
//! - FIFO ordering of pending toasts
//! - A [`StackPolicy`]: `Replace` keeps a single toast on screen and lets the
//!   newest message win, `Stack` shows up to `max_visible` at once
//! - Automatic expiry processing via `tick(now)`
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use yatra_widgets::notification_queue::{NotificationQueue, QueueAction, QueueConfig};
//! use yatra_widgets::toast::ToastKind;
//!
//! let mut queue = NotificationQueue::new(QueueConfig::default());
//! let id = queue.push(ToastKind::Success, "Saved").unwrap();
//! assert_eq!(queue.tick(Duration::ZERO), vec![QueueAction::Show(id)]);
//! assert_eq!(queue.tick(Duration::from_secs(4)), vec![QueueAction::Hide(id)]);
//! ```

use std::collections::VecDeque;
use std::time::Duration;

use crate::toast::{Toast, ToastId, ToastKind};

/// How a new toast interacts with the ones already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackPolicy {
    /// A single toast slot; every push replaces whatever is shown or pending.
    #[default]
    Replace,
    /// Up to `max_visible` toasts at once, the rest wait in FIFO order.
    Stack,
}

/// Configuration for the notification queue.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Maximum number of toasts visible at once (`Stack` only).
    pub max_visible: usize,
    /// Maximum number of notifications waiting in queue.
    pub max_queued: usize,
    /// Auto-dismiss duration.
    pub default_duration: Duration,
    pub policy: StackPolicy,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_visible: 1,
            max_queued: 8,
            default_duration: Duration::from_millis(4000),
            policy: StackPolicy::Replace,
        }
    }
}

impl QueueConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum visible toasts. Values above 1 switch to [`StackPolicy::Stack`].
    #[must_use]
    pub fn max_visible(mut self, max: usize) -> Self {
        self.max_visible = max.max(1);
        self.policy = if self.max_visible > 1 {
            StackPolicy::Stack
        } else {
            StackPolicy::Replace
        };
        self
    }

    /// Set maximum queued notifications.
    #[must_use]
    pub fn max_queued(mut self, max: usize) -> Self {
        self.max_queued = max;
        self
    }

    /// Set default duration for auto-dismiss.
    #[must_use]
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    fn visible_limit(&self) -> usize {
        match self.policy {
            StackPolicy::Replace => 1,
            StackPolicy::Stack => self.max_visible.max(1),
        }
    }
}

/// Actions returned by `tick()` to be processed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueAction {
    /// Show a new toast.
    Show(ToastId),
    /// Hide an existing toast.
    Hide(ToastId),
}

/// Queue statistics for monitoring and debugging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Total notifications pushed.
    pub total_pushed: u64,
    /// Notifications rejected due to queue overflow.
    pub overflow_count: u64,
    /// Pending notifications dropped to make room for a newer one.
    pub evicted: u64,
    /// Notifications superseded by a newer one under `Replace`.
    pub replaced: u64,
    /// Notifications dismissed explicitly.
    pub user_dismissed: u64,
    /// Notifications expired automatically.
    pub auto_expired: u64,
}

/// Anything that can raise a user-facing notification.
///
/// The wizard, filter, and form engines report through this seam instead of
/// owning a queue.
pub trait Notifier {
    fn notify(&mut self, kind: ToastKind, message: &str);

    fn success(&mut self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(ToastKind::Error, message);
    }

    fn info(&mut self, message: &str) {
        self.notify(ToastKind::Info, message);
    }
}

/// Collects notifications; handy for tests and batch hosts.
impl Notifier for Vec<(ToastKind, String)> {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        self.push((kind, message.to_owned()));
    }
}

/// Notification queue manager.
#[derive(Debug)]
pub struct NotificationQueue {
    /// Pending notifications waiting to be displayed.
    queue: VecDeque<Toast>,
    /// Toasts currently on screen (or dismissed and awaiting the next tick).
    visible: Vec<Toast>,
    config: QueueConfig,
    next_id: u64,
    stats: QueueStats,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

impl NotificationQueue {
    /// Create a new notification queue with the given configuration.
    #[must_use]
    pub fn new(config: QueueConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            visible: Vec::new(),
            config,
            next_id: 1,
            stats: QueueStats::default(),
        }
    }

    /// Queue a toast. It becomes visible on the next `tick`.
    ///
    /// Returns `None` if the queue is full.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> Option<ToastId> {
        self.stats.total_pushed += 1;

        if self.config.policy == StackPolicy::Replace {
            self.stats.replaced += self.queue.len() as u64;
            self.queue.clear();
            for toast in &mut self.visible {
                if !toast.is_dismissed() {
                    toast.dismiss();
                    self.stats.replaced += 1;
                }
            }
        } else if self.queue.len() >= self.config.max_queued {
            self.stats.overflow_count += 1;
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "toast.overflow", max_queued = self.config.max_queued);
            return None;
        }

        let id = ToastId::new(self.next_id);
        self.next_id += 1;
        let toast = Toast::new(id, kind, message).duration(self.config.default_duration);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "toast.push", id = id.get(), kind = kind.class_name());
        self.queue.push_back(toast);
        Some(id)
    }

    /// Queue a toast, dropping the oldest pending one if the queue is full.
    ///
    /// Returns `None` only when the queue holds no pending toasts at all.
    pub fn push_newest(&mut self, kind: ToastKind, message: impl Into<String>) -> Option<ToastId> {
        if self.config.policy == StackPolicy::Stack
            && self.config.max_queued > 0
            && self.queue.len() >= self.config.max_queued
        {
            if self.queue.pop_front().is_some() {
                self.stats.evicted += 1;
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "toast.evicted", max_queued = self.config.max_queued);
            }
        }
        self.push(kind, message)
    }

    /// Dismiss a specific notification by ID.
    pub fn dismiss(&mut self, id: ToastId) {
        if let Some(toast) = self.visible.iter_mut().find(|t| t.id == id) {
            toast.dismiss();
            self.stats.user_dismissed += 1;
        }
        if let Some(idx) = self.queue.iter().position(|t| t.id == id) {
            self.queue.remove(idx);
            self.stats.user_dismissed += 1;
        }
    }

    /// Dismiss all notifications.
    pub fn dismiss_all(&mut self) {
        for toast in &mut self.visible {
            toast.dismiss();
        }
        self.stats.user_dismissed += self.queue.len() as u64;
        self.queue.clear();
    }

    /// Process expiry and promotion at `now`.
    ///
    /// Hides are always reported before shows.
    pub fn tick(&mut self, now: Duration) -> Vec<QueueAction> {
        let mut actions = Vec::new();

        let stats = &mut self.stats;
        self.visible.retain(|toast| {
            if toast.is_visible(now) {
                return true;
            }
            if !toast.is_dismissed() {
                stats.auto_expired += 1;
            }
            actions.push(QueueAction::Hide(toast.id));
            false
        });

        let limit = self.config.visible_limit();
        while self.visible.len() < limit {
            let Some(mut toast) = self.queue.pop_front() else {
                break;
            };
            toast.show(now);
            actions.push(QueueAction::Show(toast.id));
            self.visible.push(toast);
        }

        actions
    }

    /// Earliest instant at which `tick` would change something.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        if !self.queue.is_empty() && self.visible.len() < self.config.visible_limit() {
            return Some(Duration::ZERO);
        }
        self.visible.iter().filter_map(Toast::visible_until).min()
    }

    /// Currently visible toasts.
    #[must_use]
    pub fn visible(&self) -> &[Toast] {
        &self.visible
    }

    /// Look up a visible toast.
    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.visible.iter().find(|t| t.id == id)
    }

    /// Number of notifications waiting in the queue.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Number of toasts currently held as visible.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Check if the queue is empty (no visible or pending notifications).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.queue.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }
}

impl Notifier for NotificationQueue {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        if self.push_newest(kind, message).is_none() {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "toast.dropped", kind = kind.class_name());
        }
    }
}
