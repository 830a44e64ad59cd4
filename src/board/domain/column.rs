//! The fixed set of workflow columns.

use super::ParseColumnIdError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow column identifier.
///
/// The board always has exactly these six columns, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    /// Blocked on someone else.
    WaitingOn,
    /// Actively being worked on.
    InProgress,
    /// Next up.
    OnDeck,
    /// Planned work.
    Pipeline,
    /// Deferred work.
    LowPriority,
    /// Unplanned ideas.
    Ideas,
}

impl ColumnId {
    /// All columns in board order.
    pub const ALL: [Self; 6] = [
        Self::WaitingOn,
        Self::InProgress,
        Self::OnDeck,
        Self::Pipeline,
        Self::LowPriority,
        Self::Ideas,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WaitingOn => "waiting-on",
            Self::InProgress => "in-progress",
            Self::OnDeck => "on-deck",
            Self::Pipeline => "pipeline",
            Self::LowPriority => "low-priority",
            Self::Ideas => "ideas",
        }
    }

    /// Returns the human-readable column heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::WaitingOn => "Waiting On",
            Self::InProgress => "In Progress",
            Self::OnDeck => "On Deck",
            Self::Pipeline => "Pipeline",
            Self::LowPriority => "Low Priority",
            Self::Ideas => "Ideas",
        }
    }
}

impl TryFrom<&str> for ColumnId {
    type Error = ParseColumnIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == value.trim())
            .ok_or_else(|| ParseColumnIdError(value.to_owned()))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
