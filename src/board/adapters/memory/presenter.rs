//! Presenter that records what it was asked to show.

use std::sync::{Arc, Mutex};

use crate::board::{
    domain::ColumnModel,
    ports::{BoardPresenter, Notification, Severity},
};

/// Records renders and notifications for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    state: Arc<Mutex<RecordedOutput>>,
}

#[derive(Debug, Default)]
struct RecordedOutput {
    renders: usize,
    last_board: Option<ColumnModel>,
    notifications: Vec<Notification>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times the board was rendered.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.state.lock().map_or(0, |state| state.renders)
    }

    /// Returns the most recently rendered board.
    #[must_use]
    pub fn last_board(&self) -> Option<ColumnModel> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.last_board.clone())
    }

    /// Returns every notification in the order it was sent.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.state
            .lock()
            .map(|state| state.notifications.clone())
            .unwrap_or_default()
    }

    /// Returns the notifications of one severity.
    #[must_use]
    pub fn notifications_with(&self, severity: Severity) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|notification| notification.severity == severity)
            .collect()
    }
}

impl BoardPresenter for RecordingPresenter {
    fn render(&self, board: &ColumnModel) {
        if let Ok(mut state) = self.state.lock() {
            state.renders += 1;
            state.last_board = Some(board.clone());
        }
    }

    fn notify(&self, notification: &Notification) {
        if let Ok(mut state) = self.state.lock() {
            state.notifications.push(notification.clone());
        }
    }
}
