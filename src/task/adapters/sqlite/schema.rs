//! Diesel schema for task persistence.

/// DDL for the task table. Safe to run repeatedly.
pub const CREATE_TASKS_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS tasks (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  category_id INTEGER,
  title TEXT NOT NULL,
  description TEXT,
  due_date TEXT,
  priority INTEGER DEFAULT 1,
  is_completed INTEGER DEFAULT 0,
  completed_at TEXT,
  image_url TEXT
);
";

diesel::table! {
    /// To-do items.
    tasks (id) {
        /// Store-assigned identifier.
        id -> BigInt,
        /// Reserved category reference.
        category_id -> Nullable<BigInt>,
        /// Task title.
        title -> Text,
        /// Free-form note.
        description -> Nullable<Text>,
        /// Reserved due date text.
        due_date -> Nullable<Text>,
        /// Raw priority value.
        priority -> Nullable<Integer>,
        /// Completion flag.
        is_completed -> Nullable<Integer>,
        /// Local completion time.
        completed_at -> Nullable<Text>,
        /// Image reference.
        image_url -> Nullable<Text>,
    }
}
