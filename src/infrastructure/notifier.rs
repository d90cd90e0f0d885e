use crate::domain::ports::{Notification, Notifier};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Forwards notifications to `tracing`, one event per notification.
///
/// Used by the binary, where the subscriber writes to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::Info(text) | Notification::Success(text) => tracing::info!("{text}"),
            Notification::Warning(text) => tracing::warn!("{text}"),
            Notification::Error { header, text } => tracing::error!("{header}: {text}"),
        }
    }
}

/// Keeps every notification in arrival order. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::debug!(%notification, "notification");
        self.lock().push(notification);
    }
}
