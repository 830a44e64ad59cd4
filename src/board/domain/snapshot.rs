//! Full-board snapshots written to the local cache.
//!
//! A snapshot is two JSON documents: an object mapping column ids to task
//! arrays, and an array of completed tasks. Snapshots are rewritten whole
//! after every mutation; they are never an operation log.

use super::{ColumnId, ColumnModel, CompletedTask, Task, TaskId};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Serialisable copy of a board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    active: BTreeMap<ColumnId, Vec<Task>>,
    completed: Vec<CompletedTask>,
}

impl BoardSnapshot {
    /// Captures the current state of a board.
    #[must_use]
    pub fn capture(model: &ColumnModel) -> Self {
        Self {
            active: model
                .columns()
                .map(|(column, tasks)| (column, tasks.to_vec()))
                .collect(),
            completed: model.completed().to_vec(),
        }
    }

    /// Serialises the active columns.
    ///
    /// # Errors
    ///
    /// Returns the serialiser error if encoding fails.
    pub fn active_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.active)
    }

    /// Serialises the completed archive.
    ///
    /// # Errors
    ///
    /// Returns the serialiser error if encoding fails.
    pub fn completed_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.completed)
    }

    /// Reads a snapshot from cached JSON, tolerating damage.
    ///
    /// Unknown column keys and malformed task entries are dropped with a
    /// warning; unreadable documents count as empty. A task filed under a
    /// column key takes that column. An id seen twice keeps only its first
    /// copy, scanning columns in board order before the archive.
    #[must_use]
    pub fn parse(active_json: Option<&str>, completed_json: Option<&str>) -> Self {
        let mut active = active_json
            .and_then(|text| parse_document::<BTreeMap<String, Vec<Value>>>(text, "active tasks"))
            .map(parse_columns)
            .unwrap_or_default();
        let mut completed = completed_json
            .and_then(|text| parse_document::<Vec<Value>>(text, "completed tasks"))
            .map(|entries| parse_entries::<CompletedTask>(entries, "completed"))
            .unwrap_or_default();
        drop_duplicates(&mut active, &mut completed);
        Self { active, completed }
    }

    /// Returns the number of tasks in the snapshot across both partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.values().map(Vec::len).sum::<usize>() + self.completed.len()
    }

    /// Returns whether the snapshot holds no tasks at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a board from the snapshot; missing columns start empty.
    #[must_use]
    pub fn into_model(self) -> ColumnModel {
        ColumnModel::from_tasks(self.active.into_values().flatten(), self.completed)
    }
}

fn parse_document<T: serde::de::DeserializeOwned>(text: &str, label: &str) -> Option<T> {
    match serde_json::from_str(text) {
        Ok(document) => Some(document),
        Err(err) => {
            warn!(document = label, error = %err, "discarding unreadable cached snapshot");
            None
        }
    }
}

fn parse_columns(raw: BTreeMap<String, Vec<Value>>) -> BTreeMap<ColumnId, Vec<Task>> {
    raw.into_iter()
        .filter_map(|(key, entries)| match ColumnId::try_from(key.as_str()) {
            Ok(column) => {
                let tasks = parse_entries::<Task>(entries, column.as_str())
                    .into_iter()
                    .map(|mut task| {
                        task.set_column(column);
                        task
                    })
                    .collect();
                Some((column, tasks))
            }
            Err(err) => {
                warn!(error = %err, "dropping cached tasks filed under unknown column");
                None
            }
        })
        .collect()
}

fn drop_duplicates(
    active: &mut BTreeMap<ColumnId, Vec<Task>>,
    completed: &mut Vec<CompletedTask>,
) {
    let mut seen = HashSet::new();
    for (column, tasks) in &mut *active {
        tasks.retain(|task| first_sighting(&mut seen, task.id(), column.as_str()));
    }
    completed.retain(|task| first_sighting(&mut seen, task.id(), "completed"));
}

fn first_sighting(seen: &mut HashSet<TaskId>, id: &TaskId, bucket: &str) -> bool {
    let first = seen.insert(id.clone());
    if !first {
        warn!(bucket, task = %id, "dropping duplicate cached task");
    }
    first
}

fn parse_entries<T: serde::de::DeserializeOwned>(entries: Vec<Value>, bucket: &str) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(task) => Some(task),
            Err(err) => {
                warn!(bucket, error = %err, "dropping malformed cached task");
                None
            }
        })
        .collect()
}
