//! Ordered column model: the in-memory source of truth for board order.

use super::{ColumnId, CompletedTask, Task, TaskId};
use std::collections::{BTreeMap, HashMap};

/// Position of an active task on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskLocation {
    /// Column holding the task.
    pub column: ColumnId,
    /// Zero-based position within the column.
    pub index: usize,
}

/// One ordered task list per column plus the completed archive.
///
/// Every column in [`ColumnId::ALL`] always has an entry, possibly empty.
/// The completed archive is newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnModel {
    columns: BTreeMap<ColumnId, Vec<Task>>,
    completed: Vec<CompletedTask>,
}

impl Default for ColumnModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnModel {
    /// Creates a board with six empty columns and an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: ColumnId::ALL
                .into_iter()
                .map(|column| (column, Vec::new()))
                .collect(),
            completed: Vec::new(),
        }
    }

    /// Builds a board from loaded tasks.
    ///
    /// Active tasks are appended to their column in iteration order. The
    /// archive is sorted by completion time, newest first.
    #[must_use]
    pub fn from_tasks(
        active: impl IntoIterator<Item = Task>,
        completed: impl IntoIterator<Item = CompletedTask>,
    ) -> Self {
        let mut model = Self::new();
        for task in active {
            model.add_task(task);
        }
        model.completed = completed.into_iter().collect();
        model
            .completed
            .sort_by(|left, right| right.completed_at().cmp(&left.completed_at()));
        model
    }

    /// Returns the ordered tasks of a column.
    #[must_use]
    pub fn column(&self, column: ColumnId) -> &[Task] {
        self.columns.get(&column).map_or(&[], Vec::as_slice)
    }

    /// Iterates over all columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (ColumnId, &[Task])> {
        ColumnId::ALL
            .into_iter()
            .map(|column| (column, self.column(column)))
    }

    /// Iterates over every active task, column by column.
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.values().flatten()
    }

    /// Returns the completed archive, newest first.
    #[must_use]
    pub fn completed(&self) -> &[CompletedTask] {
        &self.completed
    }

    /// Returns the number of active tasks.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }

    /// Finds where an active task sits.
    #[must_use]
    pub fn locate(&self, id: &TaskId) -> Option<TaskLocation> {
        self.columns.iter().find_map(|(column, tasks)| {
            tasks
                .iter()
                .position(|task| task.id() == id)
                .map(|index| TaskLocation {
                    column: *column,
                    index,
                })
        })
    }

    /// Finds an active task.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.active_tasks().find(|task| task.id() == id)
    }

    /// Finds a completed task.
    #[must_use]
    pub fn find_completed(&self, id: &TaskId) -> Option<&CompletedTask> {
        self.completed.iter().find(|completed| completed.id() == id)
    }

    /// Returns whether the identifier is known in either partition.
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.find(id).is_some() || self.find_completed(id).is_some()
    }

    /// Appends a task to the end of its column.
    pub fn add_task(&mut self, task: Task) {
        self.column_mut(task.column()).push(task);
    }

    /// Removes an active task wherever it is; `None` when absent.
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let location = self.locate(id)?;
        let tasks = self.columns.get_mut(&location.column)?;
        (location.index < tasks.len()).then(|| tasks.remove(location.index))
    }

    /// Moves a task from one column to a position in another (or the same)
    /// column.
    ///
    /// The target index is clamped to the destination length; `None`
    /// appends. Returns `false` and leaves the board unchanged when the task
    /// is not in `from`.
    pub fn move_task(
        &mut self,
        id: &TaskId,
        from: ColumnId,
        to: ColumnId,
        target_index: Option<usize>,
    ) -> bool {
        let Some(origin) = self.columns.get_mut(&from) else {
            return false;
        };
        let Some(index) = origin.iter().position(|task| task.id() == id) else {
            return false;
        };
        let mut task = origin.remove(index);
        task.set_column(to);

        let destination = self.column_mut(to);
        match target_index {
            Some(target) => destination.insert(target.min(destination.len()), task),
            None => destination.push(task),
        }
        true
    }

    /// Replaces an active task with an edited version.
    ///
    /// The task keeps its position when it stays in the same column and is
    /// appended when its column changed. Returns `false` when absent.
    pub fn replace_task(&mut self, task: Task) -> bool {
        let Some(location) = self.locate(task.id()) else {
            return false;
        };
        if location.column == task.column() {
            if let Some(slot) = self
                .columns
                .get_mut(&location.column)
                .and_then(|tasks| tasks.get_mut(location.index))
            {
                *slot = task;
                return true;
            }
            return false;
        }
        self.remove_task(task.id());
        self.add_task(task);
        true
    }

    /// Prepends a task to the completed archive.
    pub fn push_completed(&mut self, completed: CompletedTask) {
        self.completed.insert(0, completed);
    }

    /// Removes a task from the completed archive; `None` when absent.
    pub fn remove_completed(&mut self, id: &TaskId) -> Option<CompletedTask> {
        let index = self.completed.iter().position(|task| task.id() == id)?;
        Some(self.completed.remove(index))
    }

    /// Reorders freshly loaded columns to follow a cached board.
    ///
    /// Tasks present in the cached column keep their cached relative order;
    /// tasks the cache does not know follow, in their current order.
    pub fn adopt_order(&mut self, cached: &Self) {
        for (column, tasks) in &mut self.columns {
            let ranks: HashMap<&TaskId, usize> = cached
                .column(*column)
                .iter()
                .enumerate()
                .map(|(rank, task)| (task.id(), rank))
                .collect();
            if ranks.is_empty() {
                continue;
            }
            tasks.sort_by_key(|task| {
                ranks
                    .get(task.id())
                    .map_or((1, 0), |rank| (0, *rank))
            });
        }
    }

    fn column_mut(&mut self, column: ColumnId) -> &mut Vec<Task> {
        self.columns.entry(column).or_default()
    }
}
