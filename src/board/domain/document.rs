//! Conversion between board tasks and remote document fields.
//!
//! Remote documents are untyped field maps. They are validated here, at
//! the store boundary, so the rest of the board only ever sees well-formed
//! [`Task`] and [`CompletedTask`] values.

use super::{
    BoardDomainError, ColumnId, CompletedTask, Task, TaskId, TaskTitle, task::TaskFields,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Untyped field map of a remote document, excluding its identifier.
pub type DocumentFields = Map<String, Value>;

const TITLE: &str = "title";
const DESCRIPTION: &str = "description";
const DUE_DATE: &str = "dueDate";
const COLUMN: &str = "column";
const BIG_THREE: &str = "isBigThree";
const UPDATED_AT: &str = "updatedAt";
const COMPLETED_AT: &str = "completedAt";

/// Errors raised while reading a remote document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// A required field is absent.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// A field holds a value of the wrong shape.
    #[error("invalid field '{field}': {reason}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// The document names a column outside the fixed set.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// The document title failed validation.
    #[error(transparent)]
    Title(#[from] BoardDomainError),
}

/// A task as stored in one of the two remote partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDocument {
    /// Document in the active-task partition.
    Active(Task),
    /// Document in the completed-task partition.
    Completed(CompletedTask),
}

impl TaskDocument {
    /// Returns the fields written to the store for this document.
    ///
    /// Empty optional values are written as empty strings so that an update
    /// clears any previous value.
    #[must_use]
    pub fn fields(&self) -> DocumentFields {
        match self {
            Self::Active(task) => task_fields(task),
            Self::Completed(completed) => {
                let mut fields = task_fields(completed.task());
                fields.insert(
                    COMPLETED_AT.to_owned(),
                    Value::String(completed.completed_at().to_rfc3339()),
                );
                fields
            }
        }
    }

    /// Returns the partial update written when a task changes column.
    #[must_use]
    pub fn column_change(task: &Task) -> DocumentFields {
        let mut fields = Map::new();
        fields.insert(
            COLUMN.to_owned(),
            Value::String(task.column().as_str().to_owned()),
        );
        fields.insert(
            UPDATED_AT.to_owned(),
            Value::String(task.updated_at().to_rfc3339()),
        );
        fields
    }

    /// Reads a document from the active-task partition.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] when a required field is missing or any
    /// field is malformed.
    pub fn parse_active(id: TaskId, fields: &DocumentFields) -> Result<Task, DocumentError> {
        let title = TaskTitle::new(required_text(fields, TITLE)?)?;
        let column_raw = required_text(fields, COLUMN)?;
        let column = ColumnId::try_from(column_raw)
            .map_err(|_| DocumentError::UnknownColumn(column_raw.to_owned()))?;
        let due_date = optional_text(fields, DUE_DATE)?
            .map(parse_due_date)
            .transpose()
            .map_err(|err| invalid(DUE_DATE, &err))?
            .flatten();
        let updated_at = optional_timestamp(fields, UPDATED_AT)?.unwrap_or_default();

        Ok(Task::from_fields(TaskFields {
            id,
            title,
            description: optional_text(fields, DESCRIPTION)?.map(str::to_owned),
            due_date,
            column,
            is_big_three: optional_bool(fields, BIG_THREE)?,
            updated_at,
        }))
    }

    /// Reads a document from the completed-task partition.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] when the active-task fields are invalid or
    /// the completion timestamp is missing.
    pub fn parse_completed(
        id: TaskId,
        fields: &DocumentFields,
    ) -> Result<CompletedTask, DocumentError> {
        let task = Self::parse_active(id, fields)?;
        let completed_at = optional_timestamp(fields, COMPLETED_AT)?
            .ok_or(DocumentError::MissingField(COMPLETED_AT))?;
        Ok(CompletedTask::from_parts(task, completed_at))
    }
}

fn task_fields(task: &Task) -> DocumentFields {
    let mut fields = Map::new();
    fields.insert(TITLE.to_owned(), Value::String(task.title().to_string()));
    fields.insert(
        DESCRIPTION.to_owned(),
        Value::String(task.description().unwrap_or_default().to_owned()),
    );
    fields.insert(
        DUE_DATE.to_owned(),
        Value::String(
            task.due_date()
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ),
    );
    fields.insert(
        COLUMN.to_owned(),
        Value::String(task.column().as_str().to_owned()),
    );
    fields.insert(BIG_THREE.to_owned(), Value::Bool(task.is_big_three()));
    fields.insert(
        UPDATED_AT.to_owned(),
        Value::String(task.updated_at().to_rfc3339()),
    );
    fields
}

fn invalid(field: &'static str, err: &impl std::fmt::Display) -> DocumentError {
    DocumentError::InvalidField {
        field,
        reason: err.to_string(),
    }
}

fn optional_text<'a>(
    fields: &'a DocumentFields,
    field: &'static str,
) -> Result<Option<&'a str>, DocumentError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(other) => Err(invalid(field, &format!("expected string, found {other}"))),
    }
}

fn required_text<'a>(
    fields: &'a DocumentFields,
    field: &'static str,
) -> Result<&'a str, DocumentError> {
    optional_text(fields, field)?.ok_or(DocumentError::MissingField(field))
}

fn optional_bool(fields: &DocumentFields, field: &'static str) -> Result<bool, DocumentError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(invalid(field, &format!("expected boolean, found {other}"))),
    }
}

fn optional_timestamp(
    fields: &DocumentFields,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, DocumentError> {
    optional_text(fields, field)?
        .filter(|text| !text.trim().is_empty())
        .map(|text| {
            DateTime::parse_from_rfc3339(text.trim())
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|err| invalid(field, &err))
        })
        .transpose()
}

/// Parses a due date stored either as a calendar date or as a full
/// timestamp; only the date part is kept. Blank text means no due date.
pub(super) fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed).map(|timestamp| Some(timestamp.date_naive()))
}

pub(super) fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(text) => parse_due_date(&text).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
