//! Presentation port: re-rendering and user notifications.

use crate::board::domain::ColumnModel;
use std::fmt;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The operation succeeded.
    Success,
    /// The operation succeeded only locally.
    Warning,
    /// The operation was abandoned.
    Error,
}

/// A non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message text.
    pub message: String,
    /// Severity of the message.
    pub severity: Severity,
}

impl Notification {
    /// Creates a notification.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receives board renders and user notifications.
pub trait BoardPresenter: Send + Sync {
    /// Called after every applied mutation with the current board.
    fn render(&self, board: &ColumnModel);

    /// Surfaces a message to the user.
    fn notify(&self, notification: &Notification);
}
