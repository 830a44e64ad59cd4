//! Domain model for the kanban board.
//!
//! The board domain models tasks, the fixed column set, ordered column
//! lists, drop reconciliation and the completion lifecycle while keeping
//! all infrastructure concerns outside of the domain boundary.

mod column;
mod document;
mod drop;
mod error;
mod ids;
mod model;
mod snapshot;
mod task;

pub use column::ColumnId;
pub use document::{DocumentError, DocumentFields, TaskDocument};
pub use drop::{DropAnchor, DropGesture, DropHalf, DropPlan};
pub use error::{BoardDomainError, ParseColumnIdError};
pub use ids::{TaskId, UserId};
pub use model::{ColumnModel, TaskLocation};
pub use snapshot::BoardSnapshot;
pub use task::{CompletedTask, Task, TaskDraft, TaskEdit, TaskTitle};
