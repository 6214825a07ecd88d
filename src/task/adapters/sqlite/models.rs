//! Diesel row models for task persistence.

use super::schema::tasks;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Reserved category reference.
    pub category_id: Option<i64>,
    /// Task title.
    pub title: String,
    /// Free-form note.
    pub description: Option<String>,
    /// Reserved due date text.
    pub due_date: Option<String>,
    /// Raw priority value.
    pub priority: Option<i32>,
    /// Completion flag.
    pub is_completed: Option<i32>,
    /// Local completion time.
    pub completed_at: Option<String>,
    /// Image reference.
    pub image_url: Option<String>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Free-form note.
    pub description: Option<String>,
    /// Reserved category reference.
    pub category_id: Option<i64>,
    /// Reserved due date text.
    pub due_date: Option<String>,
    /// Raw priority value.
    pub priority: Option<i32>,
    /// Completion flag; always `0` on insert.
    pub is_completed: Option<i32>,
    /// Image reference.
    pub image_url: Option<String>,
}

/// Changeset for the editable text and priority columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskEditChangeset {
    /// Task title.
    pub title: String,
    /// Free-form note.
    pub description: Option<String>,
    /// Raw priority value.
    pub priority: Option<i32>,
}

/// Changeset for the completion columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct CompletionChangeset {
    /// Completion flag.
    pub is_completed: Option<i32>,
    /// Local completion time; cleared when pending.
    pub completed_at: Option<String>,
}
