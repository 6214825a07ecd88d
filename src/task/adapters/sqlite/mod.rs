//! `SQLite` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{SqliteTaskRepository, TaskSqlitePool, build_pool};
pub use schema::CREATE_TASKS_TABLE_SQL;
