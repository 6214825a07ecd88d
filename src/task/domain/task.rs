//! Task aggregate and the write models used to create and edit it.

use super::{Attachment, Completion, Priority, TaskId};
use serde::{Deserialize, Serialize};

/// A persisted to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    category_id: Option<i64>,
    due_date: Option<String>,
    priority: Priority,
    completion: Completion,
    attachment: Attachment,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Free-form note; empty when absent.
    pub description: String,
    /// Reserved category reference.
    pub category_id: Option<i64>,
    /// Reserved due date text.
    pub due_date: Option<String>,
    /// Raw priority value.
    pub priority: Priority,
    /// Completion state and timestamp.
    pub completion: Completion,
    /// Classified image reference.
    pub attachment: Attachment,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category_id: data.category_id,
            due_date: data.due_date,
            priority: data.priority,
            completion: data.completion,
            attachment: data.attachment,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the reserved category identifier.
    #[must_use]
    pub const fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    /// Returns the reserved due date.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    /// Returns the raw priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the completion state.
    #[must_use]
    pub const fn completion(&self) -> &Completion {
        &self.completion
    }

    /// Returns `true` when the task is done.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completion.is_done()
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub fn completed_at(&self) -> Option<&str> {
        self.completion.completed_at()
    }

    /// Returns the image attachment.
    #[must_use]
    pub const fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    /// Returns the raw `image_url` value.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.attachment.as_stored()
    }
}

/// Insert model for a new task.
///
/// Carries no completion field: tasks are always created pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    category_id: Option<i64>,
    due_date: Option<String>,
    priority: Option<Priority>,
    attachment: Attachment,
}

impl NewTask {
    /// Creates an insert model with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the reserved category identifier.
    #[must_use]
    pub const fn with_category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Sets the reserved due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the image attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = attachment;
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, coerced to empty when absent.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Returns the reserved category identifier.
    #[must_use]
    pub const fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    /// Returns the due date, coerced to empty when absent.
    #[must_use]
    pub fn due_date(&self) -> &str {
        self.due_date.as_deref().unwrap_or_default()
    }

    /// Returns the priority, coerced to low when absent.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }

    /// Returns the image attachment.
    #[must_use]
    pub const fn attachment(&self) -> &Attachment {
        &self.attachment
    }
}

/// Partial update for the editable text and priority fields.
///
/// Fields left unset are written as the insert defaults rather than kept:
/// an empty title, an empty description, and low priority. The image is the
/// exception: it is only written when an attachment is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    attachment: Option<Attachment>,
}

impl TaskEdit {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
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

    /// Replaces the image in the same write.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Returns the title to write.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Returns the description to write.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Returns the priority to write.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority.unwrap_or_default()
    }

    /// Returns the replacement image, if the edit carries one.
    #[must_use]
    pub const fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}
