//! Transient user notifications.
//!
//! The synchronizer reports every outcome through a `Notifier`. A UI host
//! renders them as auto-dismissing toasts; `TracingNotifier` logs them and
//! `NotificationLog` keeps them for inspection.

use std::cell::RefCell;
use std::time::Duration;

/// How long a success notification stays visible.
pub const SUCCESS_DURATION: Duration = Duration::from_millis(3000);
/// How long an error notification stays visible.
pub const ERROR_DURATION: Duration = Duration::from_millis(5000);
/// Label of the dismiss action shown on every notification.
pub const DISMISS_LABEL: &str = "Close";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub duration: Duration,
    pub action: &'static str,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            duration: SUCCESS_DURATION,
            action: DISMISS_LABEL,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            duration: ERROR_DURATION,
            action: DISMISS_LABEL,
        }
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Emits notifications as log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            Level::Success => tracing::info!(text = %n.message, "notification"),
            Level::Error => tracing::error!(text = %n.message, "notification"),
        }
    }
}

/// Records notifications in arrival order.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: RefCell<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries.borrow_mut().push(notification);
    }
}
