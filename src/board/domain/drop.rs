//! Drag-and-drop reconciliation.
//!
//! A drop gesture is translated into a deterministic list mutation: the
//! dragged task is taken out of its origin column and inserted into the
//! target column before or after the task it was dropped onto, or at the
//! end when it was dropped onto empty space.

use super::{ColumnId, ColumnModel, TaskId};

/// Which half of the anchor task the pointer was over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropHalf {
    /// Pointer at or above the vertical midpoint: insert before.
    Upper,
    /// Pointer below the vertical midpoint: insert after.
    Lower,
}

impl DropHalf {
    /// Classifies a pointer position against an element's vertical extent.
    ///
    /// All values are in the same pixel coordinate space. The pointer is in
    /// the lower half when it is strictly below the midpoint. Arithmetic is
    /// widened so no input can overflow.
    #[must_use]
    pub fn from_pointer(pointer_y: i64, element_top: i64, element_height: i64) -> Self {
        let offset = i128::from(pointer_y) - i128::from(element_top);
        if 2 * offset > i128::from(element_height) {
            Self::Lower
        } else {
            Self::Upper
        }
    }
}

/// The task a dragged task was dropped onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropAnchor {
    /// Identifier of the task under the pointer.
    pub task_id: TaskId,
    /// Half of that task the pointer was over.
    pub half: DropHalf,
}

/// A completed drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropGesture {
    /// The dragged task.
    pub task_id: TaskId,
    /// Column the drag started in.
    pub origin: ColumnId,
    /// Column the task was dropped into.
    pub target: ColumnId,
    /// Task under the pointer, if any.
    pub anchor: Option<DropAnchor>,
}

impl DropGesture {
    /// Creates a gesture dropped onto empty column space.
    #[must_use]
    pub const fn new(task_id: TaskId, origin: ColumnId, target: ColumnId) -> Self {
        Self {
            task_id,
            origin,
            target,
            anchor: None,
        }
    }

    /// Sets the task the gesture was dropped onto.
    #[must_use]
    pub fn onto(mut self, task_id: TaskId, half: DropHalf) -> Self {
        self.anchor = Some(DropAnchor { task_id, half });
        self
    }
}

/// The list mutation a gesture resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropPlan {
    /// Task to move.
    pub task_id: TaskId,
    /// Column the task leaves.
    pub from: ColumnId,
    /// Column the task enters.
    pub to: ColumnId,
    /// Insert position in the destination after removal; `None` appends.
    pub index: Option<usize>,
}

impl DropPlan {
    /// Returns whether the plan changes the task's column.
    #[must_use]
    pub fn changes_column(&self) -> bool {
        self.from != self.to
    }
}

impl ColumnModel {
    /// Resolves a drop gesture against the current board.
    ///
    /// Returns `None` when the dragged task is no longer in its origin
    /// column, so replaying an already applied gesture does nothing.
    #[must_use]
    pub fn plan_drop(&self, gesture: &DropGesture) -> Option<DropPlan> {
        let origin = self.column(gesture.origin);
        if !origin.iter().any(|task| task.id() == &gesture.task_id) {
            return None;
        }

        let index = gesture.anchor.as_ref().and_then(|anchor| {
            self.column(gesture.target)
                .iter()
                .filter(|task| task.id() != &gesture.task_id)
                .position(|task| task.id() == &anchor.task_id)
                .map(|position| match anchor.half {
                    DropHalf::Upper => position,
                    DropHalf::Lower => position + 1,
                })
        });

        Some(DropPlan {
            task_id: gesture.task_id.clone(),
            from: gesture.origin,
            to: gesture.target,
            index,
        })
    }

    /// Applies a resolved drop plan; `false` when the task has moved since.
    pub fn apply_drop(&mut self, plan: &DropPlan) -> bool {
        self.move_task(&plan.task_id, plan.from, plan.to, plan.index)
    }
}
