//! Task aggregate and the inputs used to create and edit it.

use super::{BoardDomainError, ColumnId, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An active task on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::document::deserialize_due_date"
    )]
    due_date: Option<NaiveDate>,
    column: ColumnId,
    #[serde(default)]
    is_big_three: bool,
    #[serde(default)]
    updated_at: DateTime<Utc>,
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    column: ColumnId,
    is_big_three: bool,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, column: ColumnId) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            column,
            is_big_three: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Flags the task as one of the "big three" priorities.
    #[must_use]
    pub const fn big_three(mut self) -> Self {
        self.is_big_three = true;
        self
    }

    /// Returns the target column.
    #[must_use]
    pub const fn column(&self) -> ColumnId {
        self.column
    }

    /// Builds a task once the store has assigned an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is blank.
    pub fn into_task(self, id: TaskId, clock: &impl Clock) -> Result<Task, BoardDomainError> {
        let title = TaskTitle::new(self.title)?;
        Ok(Task {
            id,
            title,
            description: normalize_description(self.description),
            due_date: self.due_date,
            column: self.column,
            is_big_three: self.is_big_three,
            updated_at: clock.utc(),
        })
    }
}

/// Replacement values for an edited task.
///
/// Editing replaces every user-editable field at once, as a task form does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    column: ColumnId,
    is_big_three: bool,
}

impl TaskEdit {
    /// Starts an edit from the task's current values.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.as_str().to_owned(),
            description: task.description.clone(),
            due_date: task.due_date,
            column: task.column,
            is_big_three: task.is_big_three,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the description; `None` clears it.
    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Replaces the due date; `None` clears it.
    #[must_use]
    pub const fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Moves the task to another column.
    #[must_use]
    pub const fn column(mut self, column: ColumnId) -> Self {
        self.column = column;
        self
    }

    /// Sets or clears the "big three" flag.
    #[must_use]
    pub const fn big_three(mut self, is_big_three: bool) -> Self {
        self.is_big_three = is_big_three;
        self
    }

    /// Returns the column the edited task will live in.
    #[must_use]
    pub const fn target_column(&self) -> ColumnId {
        self.column
    }
}

impl Task {
    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the column holding the task.
    #[must_use]
    pub const fn column(&self) -> ColumnId {
        self.column
    }

    /// Returns whether the task is flagged as a top priority.
    #[must_use]
    pub const fn is_big_three(&self) -> bool {
        self.is_big_three
    }

    /// Returns the timestamp of the latest saved mutation.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the task re-keyed under a new identifier.
    ///
    /// Used when a store issues a fresh document id on partition changes.
    #[must_use]
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    /// Applies an edit, stamping `updated_at`.
    ///
    /// The task is left unchanged when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the new title is blank.
    pub fn apply_edit(
        &mut self,
        edit: TaskEdit,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        let title = TaskTitle::new(edit.title)?;
        self.title = title;
        self.description = normalize_description(edit.description);
        self.due_date = edit.due_date;
        self.column = edit.column;
        self.is_big_three = edit.is_big_three;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to another column, stamping `updated_at`.
    pub fn relocate(&mut self, column: ColumnId, clock: &impl Clock) {
        self.column = column;
        self.touch(clock);
    }

    /// Marks the task as completed at the current clock time.
    #[must_use]
    pub fn complete(self, clock: &impl Clock) -> CompletedTask {
        CompletedTask {
            task: self,
            completed_at: clock.utc(),
        }
    }

    pub(super) const fn set_column(&mut self, column: ColumnId) {
        self.column = column;
    }

    pub(super) fn from_fields(fields: TaskFields) -> Self {
        Self {
            id: fields.id,
            title: fields.title,
            description: normalize_description(fields.description),
            due_date: fields.due_date,
            column: fields.column,
            is_big_three: fields.is_big_three,
            updated_at: fields.updated_at,
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Parameter object for reconstructing a task from stored fields.
pub(super) struct TaskFields {
    pub id: TaskId,
    pub title: TaskTitle,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub column: ColumnId,
    pub is_big_three: bool,
    pub updated_at: DateTime<Utc>,
}

/// A task archived off the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTask {
    #[serde(flatten)]
    task: Task,
    completed_at: DateTime<Utc>,
}

impl CompletedTask {
    /// Returns the archived task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.task.id
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns the completed task re-keyed under a new identifier.
    #[must_use]
    pub fn with_id(self, id: TaskId) -> Self {
        Self {
            task: self.task.with_id(id),
            completed_at: self.completed_at,
        }
    }

    /// Strips the completion stamp, returning the active task.
    ///
    /// The task keeps its last column.
    #[must_use]
    pub fn restore(self) -> Task {
        self.task
    }

    pub(super) const fn from_parts(task: Task, completed_at: DateTime<Utc>) -> Self {
        Self { task, completed_at }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}
