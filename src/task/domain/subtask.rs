//! Checklist items owned by a task.

use super::TaskId;
use serde::{Deserialize, Serialize};

/// A checklist entry belonging to a [`super::Task`].
///
/// Part of the data model only; no repository operations manage subtasks
/// and deleting a task leaves its subtasks untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    /// Subtask row identifier.
    pub id: i64,
    /// Owning task.
    pub task_id: TaskId,
    /// Checklist item text.
    pub title: String,
    /// Completion flag (`0` pending, `1` done).
    pub is_completed: i32,
}
