//! Feedback sink and navigation contracts.

use serde::{Deserialize, Serialize};

/// Visual treatment of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A user-facing toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Surface for notifications.
pub trait FeedbackSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Post-success redirection target.
pub trait Navigator: Send + Sync {
    /// Navigate to an in-site path such as `"/"`.
    fn navigate(&self, target: &str);
}

/// Feedback sink that writes notifications to the log.
///
/// Used where no interactive surface exists, such as the HTTP service.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Default => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
            NotificationVariant::Destructive => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
        }
    }
}
