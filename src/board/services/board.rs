//! Board service: the session-scoped owner of a user's board.
//!
//! Each operation mutates the in-memory [`ColumnModel`], persists through the
//! [`TaskStoreAdapter`], rewrites the local snapshot, re-renders and notifies.
//! A failed remote call never aborts an operation; the change is applied
//! locally and reported as a fallback.

use super::store_adapter::{Durability, LoadedBoard, Persistence, TaskStoreAdapter};
use crate::board::{
    domain::{
        BoardDomainError, ColumnId, ColumnModel, DropGesture, DropPlan, TaskDocument, TaskDraft,
        TaskEdit, TaskId, UserId,
    },
    ports::{BoardPresenter, Collection, DocumentStore, LocalCache, Notification, Severity},
};
use crate::config::StorageConfig;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Input validation failed; nothing was persisted.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Result of an operation on a task that may not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The change was applied to the board.
    Applied {
        /// Operation result.
        value: T,
        /// How the change was persisted.
        durability: Durability,
    },
    /// The task was not where the operation expected; nothing changed.
    NotFound,
}

impl<T> Outcome<T> {
    /// Returns whether the board changed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Returns whether the change was only saved locally after a remote
    /// failure.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(
            self,
            Self::Applied {
                durability: Durability::Fallback,
                ..
            }
        )
    }

    /// Returns the operation result when applied.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Applied { value, .. } => Some(value),
            Self::NotFound => None,
        }
    }
}

/// Proof that the user confirmed an irreversible delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteConfirmation(());

impl DeleteConfirmation {
    /// Records that the user explicitly confirmed the delete.
    #[must_use]
    pub const fn confirmed_by_user() -> Self {
        Self(())
    }
}

/// Shared infrastructure a board session runs on.
pub struct BoardPorts<S, L, P, C> {
    /// Remote document store.
    pub store: Arc<S>,
    /// Local snapshot cache.
    pub cache: Arc<L>,
    /// Render and notification sink.
    pub presenter: Arc<P>,
    /// Time source for `updatedAt` / `completedAt` stamps.
    pub clock: Arc<C>,
}

impl<S, L, P, C> Clone for BoardPorts<S, L, P, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            presenter: Arc::clone(&self.presenter),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// User-facing messages for one kind of operation.
struct Messages {
    success: Option<String>,
    fallback: &'static str,
}

const SAVE_FALLBACK: &str = "Error saving to database. Saved locally instead.";
const DELETE_FALLBACK: &str = "Error deleting from database. Deleted locally instead.";
const COMPLETE_FALLBACK: &str = "Error updating database. Task completed locally instead.";
const RESTORE_FALLBACK: &str = "Error updating database. Task restored locally instead.";
const MOVE_FALLBACK: &str = "Error updating database. Changes saved locally instead.";
const LOAD_FALLBACK: &str = "Error loading from database. Using local data instead.";
const WELCOME: &str = "Welcome! Start by adding your first task.";
const CACHE_FAILURE: &str = "Could not update the local copy of your board.";

/// Session-scoped board orchestration service.
pub struct BoardService<S, L, P, C>
where
    S: DocumentStore,
    L: LocalCache,
    P: BoardPresenter,
    C: Clock + Send + Sync,
{
    user: UserId,
    adapter: TaskStoreAdapter<S, L>,
    presenter: Arc<P>,
    clock: Arc<C>,
    model: ColumnModel,
}

impl<S, L, P, C> BoardService<S, L, P, C>
where
    S: DocumentStore,
    L: LocalCache,
    P: BoardPresenter,
    C: Clock + Send + Sync,
{
    /// Opens a user's board, loading it from the remote store or, when that
    /// fails, from the local cache.
    pub async fn open(
        user: UserId,
        ports: BoardPorts<S, L, P, C>,
        storage: &StorageConfig,
    ) -> Self {
        let mut service = Self::with_model(user, ports, storage, ColumnModel::new());
        service.reload().await;
        debug!(user = %service.user, tasks = service.model.active_count(), "board opened");
        service
    }

    /// Starts a brand-new user on an empty board.
    #[must_use]
    pub fn initialize_empty(
        user: UserId,
        ports: BoardPorts<S, L, P, C>,
        storage: &StorageConfig,
    ) -> Self {
        let service = Self::with_model(user, ports, storage, ColumnModel::new());
        service.persist_snapshot();
        service.presenter.render(&service.model);
        service
            .presenter
            .notify(&Notification::new(WELCOME, Severity::Success));
        service
    }

    fn with_model(
        user: UserId,
        ports: BoardPorts<S, L, P, C>,
        storage: &StorageConfig,
        model: ColumnModel,
    ) -> Self {
        let adapter = TaskStoreAdapter::new(ports.store, ports.cache, storage, &user);
        Self {
            user,
            adapter,
            presenter: ports.presenter,
            clock: ports.clock,
            model,
        }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the current board.
    #[must_use]
    pub const fn model(&self) -> &ColumnModel {
        &self.model
    }

    /// Returns the persistence adapter of this session.
    #[must_use]
    pub const fn adapter(&self) -> &TaskStoreAdapter<S, L> {
        &self.adapter
    }

    /// Reloads the board, replacing in-memory state.
    ///
    /// The local snapshot is rewritten from whatever was loaded.
    pub async fn reload(&mut self) -> Durability {
        let LoadedBoard { model, durability } = self.adapter.load().await;
        self.model = model;
        self.persist_snapshot();
        self.presenter.render(&self.model);
        if durability == Durability::Fallback {
            self.presenter
                .notify(&Notification::new(LOAD_FALLBACK, Severity::Warning));
        }
        durability
    }

    /// Adds a task to the end of its column.
    ///
    /// The store issues the identifier; under fallback a local one is used.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the title is blank.
    pub async fn add_task(&mut self, draft: TaskDraft) -> BoardServiceResult<Outcome<TaskId>> {
        let provisional = draft.into_task(TaskId::generate(), &*self.clock)?;
        let created = self
            .adapter
            .create_task(Collection::Tasks, &TaskDocument::Active(provisional.clone()))
            .await;
        let durability = created.durability();
        let task = match created.remote() {
            Some(id) => provisional.with_id(id),
            None => provisional,
        };
        let id = task.id().clone();

        debug!(task = %id, column = %task.column(), "task added");
        self.model.add_task(task);
        self.finish(
            durability,
            &Messages {
                success: Some("Task saved successfully!".to_owned()),
                fallback: SAVE_FALLBACK,
            },
        );
        Ok(Outcome::Applied {
            value: id,
            durability,
        })
    }

    /// Replaces a task's editable fields.
    ///
    /// The task keeps its position unless the edit changes its column, in
    /// which case it is appended to the new column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the new title is blank.
    pub async fn edit_task(
        &mut self,
        id: &TaskId,
        edit: TaskEdit,
    ) -> BoardServiceResult<Outcome<()>> {
        let Some(current) = self.model.find(id) else {
            return Ok(Outcome::NotFound);
        };
        let mut edited = current.clone();
        edited.apply_edit(edit, &*self.clock)?;

        let durability = self
            .adapter
            .update_task(
                Collection::Tasks,
                id,
                TaskDocument::Active(edited.clone()).fields(),
            )
            .await
            .durability();

        debug!(task = %id, column = %edited.column(), "task edited");
        self.model.replace_task(edited);
        self.finish(
            durability,
            &Messages {
                success: Some("Task saved successfully!".to_owned()),
                fallback: SAVE_FALLBACK,
            },
        );
        Ok(Outcome::Applied {
            value: (),
            durability,
        })
    }

    /// Applies a drag-and-drop gesture.
    ///
    /// Replaying a gesture that was already applied is a no-op.
    pub async fn drop_task(&mut self, gesture: &DropGesture) -> Outcome<()> {
        match self.model.plan_drop(gesture) {
            Some(plan) => self.apply_plan(plan).await,
            None => Outcome::NotFound,
        }
    }

    /// Moves a task to an index in a column; `None` appends.
    ///
    /// No-op when the task is not in `from`.
    pub async fn move_task(
        &mut self,
        id: &TaskId,
        from: ColumnId,
        to: ColumnId,
        target_index: Option<usize>,
    ) -> Outcome<()> {
        if !self.model.column(from).iter().any(|task| task.id() == id) {
            return Outcome::NotFound;
        }
        let plan = DropPlan {
            task_id: id.clone(),
            from,
            to,
            index: target_index,
        };
        self.apply_plan(plan).await
    }

    async fn apply_plan(&mut self, plan: DropPlan) -> Outcome<()> {
        let durability = if plan.changes_column() {
            let Some(current) = self.model.find(&plan.task_id) else {
                return Outcome::NotFound;
            };
            let mut moved = current.clone();
            moved.relocate(plan.to, &*self.clock);
            let persisted = self
                .adapter
                .update_task(
                    Collection::Tasks,
                    &plan.task_id,
                    TaskDocument::column_change(&moved),
                )
                .await;
            if !self.model.apply_drop(&plan) {
                return Outcome::NotFound;
            }
            self.model.replace_task(moved);
            persisted.durability()
        } else {
            if !self.model.apply_drop(&plan) {
                return Outcome::NotFound;
            }
            Durability::CachedOnly
        };

        debug!(
            task = %plan.task_id,
            from = %plan.from,
            to = %plan.to,
            index = ?plan.index,
            "task moved"
        );
        self.finish(
            durability,
            &Messages {
                success: None,
                fallback: MOVE_FALLBACK,
            },
        );
        Outcome::Applied {
            value: (),
            durability,
        }
    }

    /// Archives an active task, stamping its completion time.
    ///
    /// Returns the identifier of the archived task, which the store may
    /// reissue.
    pub async fn complete_task(&mut self, id: &TaskId) -> Outcome<TaskId> {
        let Some(task) = self.model.find(id) else {
            return Outcome::NotFound;
        };
        let completed = task.clone().complete(&*self.clock);

        let created = self
            .adapter
            .create_task(
                Collection::CompletedTasks,
                &TaskDocument::Completed(completed.clone()),
            )
            .await;
        let (archived, durability) = match created {
            Persistence::Remote(new_id) => {
                let deleted = self.adapter.delete_task(Collection::Tasks, id).await;
                (
                    completed.with_id(new_id),
                    Durability::Synced.and(deleted.durability()),
                )
            }
            Persistence::LocalFallback => (completed, Durability::Fallback),
        };
        let archived_id = archived.id().clone();

        debug!(task = %id, archived = %archived_id, "task completed");
        self.model.remove_task(id);
        self.model.push_completed(archived);
        self.finish(
            durability,
            &Messages {
                success: Some("Task completed!".to_owned()),
                fallback: COMPLETE_FALLBACK,
            },
        );
        Outcome::Applied {
            value: archived_id,
            durability,
        }
    }

    /// Returns a completed task to the end of its last column.
    ///
    /// Returns the identifier of the restored task, which the store may
    /// reissue.
    pub async fn restore_task(&mut self, id: &TaskId) -> Outcome<TaskId> {
        let Some(completed) = self.model.find_completed(id) else {
            return Outcome::NotFound;
        };
        let task = completed.clone().restore();

        let created = self
            .adapter
            .create_task(Collection::Tasks, &TaskDocument::Active(task.clone()))
            .await;
        let (restored, durability) = match created {
            Persistence::Remote(new_id) => {
                let deleted = self
                    .adapter
                    .delete_task(Collection::CompletedTasks, id)
                    .await;
                (
                    task.with_id(new_id),
                    Durability::Synced.and(deleted.durability()),
                )
            }
            Persistence::LocalFallback => (task, Durability::Fallback),
        };
        let restored_id = restored.id().clone();
        let success = format!(
            "\"{}\" restored to {}",
            restored.title(),
            restored.column().title()
        );

        debug!(
            task = %id,
            restored = %restored_id,
            column = %restored.column(),
            "task restored"
        );
        self.model.remove_completed(id);
        self.model.add_task(restored);
        self.finish(
            durability,
            &Messages {
                success: Some(success),
                fallback: RESTORE_FALLBACK,
            },
        );
        Outcome::Applied {
            value: restored_id,
            durability,
        }
    }

    /// Permanently deletes a task from whichever partition holds it.
    pub async fn delete_task(
        &mut self,
        id: &TaskId,
        _confirmation: DeleteConfirmation,
    ) -> Outcome<()> {
        let collection = if self.model.find(id).is_some() {
            Collection::Tasks
        } else if self.model.find_completed(id).is_some() {
            Collection::CompletedTasks
        } else {
            return Outcome::NotFound;
        };

        let durability = self.adapter.delete_task(collection, id).await.durability();

        debug!(task = %id, ?collection, "task deleted");
        match collection {
            Collection::Tasks => {
                self.model.remove_task(id);
            }
            Collection::CompletedTasks => {
                self.model.remove_completed(id);
            }
        }
        self.finish(
            durability,
            &Messages {
                success: Some("Task deleted successfully!".to_owned()),
                fallback: DELETE_FALLBACK,
            },
        );
        Outcome::Applied {
            value: (),
            durability,
        }
    }

    /// Rewrites the snapshot, re-renders and reports the outcome.
    ///
    /// A fallback whose snapshot could not be written is reported only by
    /// the cache failure, never as saved locally.
    fn finish(&self, durability: Durability, messages: &Messages) {
        let cached = self.persist_snapshot();
        self.presenter.render(&self.model);
        if durability == Durability::Fallback && !cached {
            return;
        }
        match (durability, &messages.success) {
            (Durability::Fallback, _) => self
                .presenter
                .notify(&Notification::new(messages.fallback, Severity::Warning)),
            (_, Some(success)) => self
                .presenter
                .notify(&Notification::new(success.clone(), Severity::Success)),
            (_, None) => {}
        }
    }

    /// Returns whether the local snapshot was written.
    fn persist_snapshot(&self) -> bool {
        match self.adapter.save_snapshot(&self.model) {
            Ok(()) => true,
            Err(err) => {
                error!(user = %self.user, error = %err, "failed to save local snapshot");
                self.presenter
                    .notify(&Notification::new(CACHE_FAILURE, Severity::Error));
                false
            }
        }
    }
}
