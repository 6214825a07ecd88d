//! Table creation, reopening, and rows written by older app versions.

use super::helpers::execute_raw;
use crate::test_helpers::TempStore;
use notelite::config::{DatabaseConfig, IN_MEMORY_PATH};
use notelite::task::{
    adapters::sqlite::SqliteTaskRepository,
    domain::{Attachment, Completion, NewTask, Priority, TaskId},
    ports::TaskRepository,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_table_is_idempotent_and_keeps_rows() {
    let store = TempStore::new().await;
    store
        .repository
        .insert(&NewTask::new("Survivor"))
        .await
        .expect("insert should succeed");

    store
        .repository
        .create_table()
        .await
        .expect("second create_table should succeed");

    let tasks = store.repository.list_all().await.expect("list");
    assert_eq!(tasks.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn data_survives_close_and_reopen() {
    let store = TempStore::new().await;
    let id = store
        .repository
        .insert(&NewTask::new("Persisted"))
        .await
        .expect("insert should succeed");
    store.repository.clone().close();

    let reopened = SqliteTaskRepository::connect(&store.config).expect("reopen database");
    reopened.create_table().await.expect("create_table");
    let task = reopened
        .find_by_id(id)
        .await
        .expect("find should succeed")
        .expect("task survives reopen");

    assert_eq!(task.title(), "Persisted");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn null_columns_read_as_defaults() {
    let store = TempStore::new().await;
    execute_raw(
        &store.config,
        "INSERT INTO tasks (title, description, due_date, priority, is_completed, completed_at, image_url) \
         VALUES ('legacy', NULL, NULL, NULL, NULL, NULL, NULL);",
    );

    let task = store
        .repository
        .find_by_id(TaskId::new(1))
        .await
        .expect("find should succeed")
        .expect("legacy row exists");

    assert_eq!(task.description(), "");
    assert_eq!(task.due_date(), None);
    assert_eq!(task.priority(), Priority::LOW);
    assert_eq!(task.completion(), &Completion::Pending);
    assert_eq!(task.attachment(), &Attachment::None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_priority_is_kept_verbatim() {
    let store = TempStore::new().await;
    execute_raw(
        &store.config,
        "INSERT INTO tasks (title, priority) VALUES ('odd', 9);",
    );

    let tasks = store.repository.list_all().await.expect("list");
    let task = tasks.first().expect("one task");

    assert_eq!(task.priority().value(), 9);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unopenable_path_is_a_storage_fault() {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let config = DatabaseConfig {
        connect_timeout_ms: 200,
        ..DatabaseConfig::at(dir.path().join("missing").join("nested").join("tasks.db"))
    };

    let result = SqliteTaskRepository::connect(&config);

    assert!(result.is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn in_memory_database_keeps_one_shared_connection() {
    let config = DatabaseConfig {
        pool_size: 4,
        ..DatabaseConfig::at(IN_MEMORY_PATH)
    };
    let repository = SqliteTaskRepository::connect(&config).expect("open in-memory database");
    repository.create_table().await.expect("create_table");

    for title in ["one", "two", "three"] {
        repository
            .insert(&NewTask::new(title))
            .await
            .expect("insert should see the created table");
    }

    assert_eq!(repository.list_all().await.expect("list").len(), 3);
}
