//! Service layer for task creation, editing, completion, and listing.

use super::AttachmentResolver;
use crate::task::{
    domain::{
        Attachment, Completion, NewTask, PersistedTaskData, Priority, PriorityBreakdown, Task,
        TaskDomainError, TaskEdit, TaskId, TaskSummary, sort_for_display,
    },
    ports::{ImageUploader, MutationOutcome, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Option<Priority>,
    image: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            image: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the picked image, local or remote.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Request payload for editing a task.
///
/// Unset description and priority are written as empty and low, matching
/// the repository update contract. An unset image keeps the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: String,
    description: Option<String>,
    priority: Option<Priority>,
    image: Option<String>,
}

impl EditTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            image: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the image; an empty string removes it.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every mutating call finishes its writes before returning, so a caller
/// that awaits a mutation and then lists observes the change.
#[derive(Clone)]
pub struct TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: ImageUploader,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    attachments: AttachmentResolver<U>,
    clock: Arc<C>,
}

impl<R, U, C> TaskLifecycleService<R, U, C>
where
    R: TaskRepository,
    U: ImageUploader,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, uploader: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            repository,
            attachments: AttachmentResolver::new(uploader),
            clock,
        }
    }

    /// Consumes the service and returns its repository handle.
    #[must_use]
    pub fn into_repository(self) -> Arc<R> {
        self.repository
    }

    /// Prepares storage for use.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage cannot be
    /// initialized; callers should treat this as fatal.
    pub async fn init(&self) -> TaskLifecycleResult<()> {
        self.repository.create_table().await?;
        info!("task storage ready");
        Ok(())
    }

    /// Creates a pending task, uploading a picked local image first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title, or
    /// [`TaskLifecycleError::Repository`] when the insert fails. Upload
    /// failures are not errors.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        ensure_title(&request.title)?;
        let attachment = self
            .attachments
            .resolve(request.image.as_deref(), &Attachment::None)
            .await;

        let mut new_task = NewTask::new(request.title).with_attachment(attachment);
        if let Some(description) = request.description {
            new_task = new_task.with_description(description);
        }
        if let Some(priority) = request.priority {
            new_task = new_task.with_priority(priority);
        }

        let id = self.repository.insert(&new_task).await?;
        info!(task_id = %id, "task created");
        Ok(created_task(id, &new_task))
    }

    /// Edits title, description, priority, and optionally the image.
    ///
    /// Returns [`MutationOutcome::NoMatch`] without uploading when the task
    /// does not exist. The text fields and a changed image are saved in one
    /// repository write.
    ///
    /// The current image is read before the upload and compared against a
    /// snapshot that a concurrent writer may already have replaced.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title, or
    /// [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn edit_task(
        &self,
        id: TaskId,
        request: EditTaskRequest,
    ) -> TaskLifecycleResult<MutationOutcome> {
        ensure_title(&request.title)?;
        let Some(existing) = self.repository.find_by_id(id).await? else {
            debug!(task_id = %id, "edit skipped; task not found");
            return Ok(MutationOutcome::NoMatch);
        };

        let attachment = self
            .attachments
            .resolve(request.image.as_deref(), existing.attachment())
            .await;

        let mut edit = TaskEdit::new().with_title(request.title);
        if let Some(description) = request.description {
            edit = edit.with_description(description);
        }
        if let Some(priority) = request.priority {
            edit = edit.with_priority(priority);
        }

        if &attachment != existing.attachment() {
            edit = edit.with_attachment(attachment);
        }

        let outcome = self.repository.update(id, &edit).await?;
        info!(task_id = %id, ?outcome, "task edited");
        Ok(outcome)
    }

    /// Marks a task done (stamping the local time) or pending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn set_completion(
        &self,
        id: TaskId,
        completed: bool,
    ) -> TaskLifecycleResult<MutationOutcome> {
        let completion = Completion::for_flag(completed, &*self.clock);
        let outcome = self.repository.set_completion(id, &completion).await?;
        info!(task_id = %id, completed, ?outcome, "task completion set");
        Ok(outcome)
    }

    /// Flips a task between pending and done.
    ///
    /// Two toggles issued back-to-back for the same task race; callers
    /// should wait for one to finish before sending the next.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn toggle_completion(&self, id: TaskId) -> TaskLifecycleResult<MutationOutcome> {
        let Some(existing) = self.repository.find_by_id(id).await? else {
            return Ok(MutationOutcome::NoMatch);
        };
        self.set_completion(id, !existing.is_completed()).await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn remove_task(&self, id: TaskId) -> TaskLifecycleResult<MutationOutcome> {
        let outcome = self.repository.remove(id).await?;
        info!(task_id = %id, ?outcome, "task removed");
        Ok(outcome)
    }

    /// Attempts the upload of a task's pending local image once more.
    ///
    /// Returns `None` when the task does not exist, otherwise the attachment
    /// now stored. Tasks without a pending upload are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn retry_pending_attachment(
        &self,
        id: TaskId,
    ) -> TaskLifecycleResult<Option<Attachment>> {
        let Some(existing) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        let Attachment::PendingUpload(local_ref) = existing.attachment() else {
            return Ok(Some(existing.attachment().clone()));
        };

        let attachment = self.attachments.upload(local_ref).await;
        if attachment.is_pending_upload() {
            return Ok(Some(attachment));
        }
        self.repository.set_image_url(id, &attachment).await?;
        Ok(Some(attachment))
    }

    /// Lists all tasks in display order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        let mut tasks = self.repository.list_all().await?;
        sort_for_display(&mut tasks);
        Ok(tasks)
    }

    /// Lists tasks in display order, falling back to `last_known` when
    /// storage fails.
    pub async fn refresh(&self, last_known: Vec<Task>) -> Vec<Task> {
        match self.list_tasks().await {
            Ok(tasks) => tasks,
            Err(err) => {
                error!(error = %err, "failed to list tasks; keeping last known list");
                last_known
            }
        }
    }

    /// Computes completion counts and progress.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn summary(&self) -> TaskLifecycleResult<TaskSummary> {
        let tasks = self.repository.list_all().await?;
        Ok(TaskSummary::from_tasks(&tasks))
    }

    /// Counts tasks per priority level.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when storage fails.
    pub async fn priority_breakdown(&self) -> TaskLifecycleResult<PriorityBreakdown> {
        let tasks = self.repository.list_all().await?;
        Ok(PriorityBreakdown::from_tasks(&tasks))
    }
}

fn ensure_title(title: &str) -> Result<(), TaskDomainError> {
    if title.trim().is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(())
}

/// Builds the value a repository stores for `new_task` under `id`.
fn created_task(id: TaskId, new_task: &NewTask) -> Task {
    Task::from_persisted(PersistedTaskData {
        id,
        title: new_task.title().to_owned(),
        description: new_task.description().to_owned(),
        category_id: new_task.category_id(),
        due_date: Some(new_task.due_date().to_owned()),
        priority: new_task.priority(),
        completion: Completion::Pending,
        attachment: new_task.attachment().clone(),
    })
}
