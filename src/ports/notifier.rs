//! Notifier port - user-visible, fire-and-forget notifications.

use std::time::Duration;

/// A notification to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    /// How long the notification should stay visible.
    pub duration: Duration,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            duration,
        }
    }
}

/// Port for showing notifications. Delivery is best effort and nothing is returned.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
