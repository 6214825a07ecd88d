//! Repository port for task persistence.

use crate::task::domain::{Attachment, Completion, NewTask, Task, TaskEdit, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Whether a keyed mutation touched a row.
///
/// Mutations against a missing identifier are not errors; they report
/// [`MutationOutcome::NoMatch`] and leave the store unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationOutcome {
    /// A row with the identifier existed and was changed.
    Applied,
    /// No row with the identifier exists.
    NoMatch,
}

impl MutationOutcome {
    /// Maps an affected-row count to an outcome.
    #[must_use]
    pub const fn from_rows_affected(rows: usize) -> Self {
        if rows == 0 { Self::NoMatch } else { Self::Applied }
    }

    /// Returns `true` when a row was changed.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Task persistence contract.
///
/// Implementations own the durable representation; every call returns
/// freshly copied values. `list_all` makes no ordering promise.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Creates the task table if it is absent. Never drops existing rows.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the engine cannot be
    /// opened or initialized.
    async fn create_table(&self) -> TaskRepositoryResult<()>;

    /// Inserts a new pending task and returns its assigned identifier.
    ///
    /// Missing optional fields are stored as their defaults: empty text for
    /// the description and due date, `NULL` for the category and image, and
    /// priority `1`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] on storage failure.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskId>;

    /// Returns every stored task in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] on storage failure.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Overwrites the title, description, and priority of a task.
    ///
    /// When the edit carries an attachment the image is written in the same
    /// atomic step, so either every column changes or none does. Category,
    /// due date, and completion are never touched here.
    async fn update(&self, id: TaskId, edit: &TaskEdit) -> TaskRepositoryResult<MutationOutcome>;

    /// Writes the completion flag and timestamp of a task.
    async fn set_completion(
        &self,
        id: TaskId,
        completion: &Completion,
    ) -> TaskRepositoryResult<MutationOutcome>;

    /// Writes the image reference of a task.
    async fn set_image_url(
        &self,
        id: TaskId,
        attachment: &Attachment,
    ) -> TaskRepositoryResult<MutationOutcome>;

    /// Deletes a task. Deletion is immediate and irreversible.
    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<MutationOutcome>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure: the engine is unavailable or I/O failed.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
