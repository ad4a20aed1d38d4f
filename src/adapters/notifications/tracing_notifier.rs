//! Notifier that writes notifications to the log.

use crate::ports::{Notification, Notifier};

/// Emits each notification as an `info` event on the `periodpal::notify` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(
            target: "periodpal::notify",
            title = %notification.title,
            duration_ms = notification.duration.as_millis() as u64,
            "{}",
            notification.message
        );
    }
}
