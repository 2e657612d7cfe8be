//! Operator-facing notices (the dashboard's toast channel).

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Outbound notice hook; implementations decide how the operator sees it.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError>;

    /// Reports an outcome that has already been committed. A delivery failure
    /// is logged and does not change that outcome.
    fn notify_or_warn(&self, notification: Notification) {
        let title = notification.title.clone();
        if let Err(err) = self.notify(notification) {
            warn!(%title, error = %err, "failed to deliver operator notice");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Keeps every notice so surfaces (and tests) can replay them.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotifier {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotifier {
    pub fn events(&self) -> Vec<Notification> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last(&self) -> Option<Notification> {
        self.events().pop()
    }

    pub fn drain(&self) -> Vec<Notification> {
        match self.events.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for InMemoryNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| NotifyError::Transport("notification log lock poisoned".to_string()))?;
        guard.push(notification);
        Ok(())
    }
}

/// Writes notices to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        match notification.kind {
            NotificationKind::Success => {
                info!(title = %notification.title, "{}", notification.message)
            }
            NotificationKind::Error => {
                warn!(title = %notification.title, "{}", notification.message)
            }
        }
        Ok(())
    }
}
