//! Outcome notification.
//!
//! Notifications are fire-and-forget: the workflow never waits for delivery
//! or acknowledgement, and a sink that drops messages cannot affect the state
//! machine.

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
}

/// A human-readable, non-blocking notification for the operator.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Where submission outcomes are reported.
pub trait NotificationSink {
    /// Delivers a notification. Must not block.
    fn notify(&self, notification: Notification);
}

/// A sink that emits notifications to the tracing log.
///
/// This is the default sink for headless deployments; interactive front-ends
/// substitute their own toast renderer.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => tracing::info!(message = %notification.message, "notification"),
            Severity::Error => tracing::error!(message = %notification.message, "notification"),
        }
    }
}
