//! In-memory integration tests for task lifecycle operations.

use std::sync::Arc;

use crate::test_helpers::{FixedClock, StubUploader};
use notelite::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Priority, Task, TaskId, TaskSummary},
    ports::MutationOutcome,
    services::{CreateTaskRequest, EditTaskRequest, TaskLifecycleService},
};
use rstest::{fixture, rstest};

type TestService = TaskLifecycleService<InMemoryTaskRepository, StubUploader, FixedClock>;

#[fixture]
fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(StubUploader::succeeding()),
        Arc::new(FixedClock::at(7, 5)),
    )
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::title).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_is_visible_to_subsequent_list(service: TestService) {
    service.init().await.expect("init should succeed");
    let created = service
        .create_task(
            CreateTaskRequest::new("Water plants")
                .with_description("balcony only")
                .with_priority(Priority::URGENT),
        )
        .await
        .expect("create should succeed");

    let edited = service
        .edit_task(
            created.id(),
            EditTaskRequest::new("Water all plants")
                .with_description("balcony and kitchen")
                .with_priority(Priority::URGENT),
        )
        .await
        .expect("edit should succeed");
    assert_eq!(edited, MutationOutcome::Applied);

    service
        .set_completion(created.id(), true)
        .await
        .expect("complete should succeed");
    let tasks = service.list_tasks().await.expect("list should succeed");
    let task = tasks.first().expect("one task");
    assert_eq!(task.title(), "Water all plants");
    assert_eq!(task.description(), "balcony and kitchen");
    assert_eq!(task.completed_at(), Some("07:05"));

    service
        .set_completion(created.id(), false)
        .await
        .expect("reopen should succeed");
    let reopened = service.list_tasks().await.expect("list should succeed");
    let task = reopened.first().expect("one task");
    assert!(!task.is_completed());
    assert_eq!(task.completed_at(), None);

    let removed = service
        .remove_task(created.id())
        .await
        .expect("remove should succeed");
    assert_eq!(removed, MutationOutcome::Applied);
    assert!(service.list_tasks().await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ids_are_not_reused_after_delete(service: TestService) {
    let first = service
        .create_task(CreateTaskRequest::new("first"))
        .await
        .expect("create should succeed");
    service
        .remove_task(first.id())
        .await
        .expect("remove should succeed");

    let second = service
        .create_task(CreateTaskRequest::new("second"))
        .await
        .expect("create should succeed");

    assert_eq!(first.id(), TaskId::new(1));
    assert_eq!(second.id(), TaskId::new(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_orders_pending_before_done_then_priority(service: TestService) {
    let requests = [
        ("done urgent", 3, true),
        ("pending low", 1, false),
        ("done low", 1, true),
        ("pending urgent", 3, false),
        ("pending medium", 2, false),
    ];
    for (title, priority, done) in requests {
        let task = service
            .create_task(CreateTaskRequest::new(title).with_priority(priority))
            .await
            .expect("create should succeed");
        if done {
            service
                .set_completion(task.id(), true)
                .await
                .expect("complete should succeed");
        }
    }

    let tasks = service.list_tasks().await.expect("list should succeed");

    assert_eq!(
        titles(&tasks),
        [
            "pending urgent",
            "pending medium",
            "pending low",
            "done urgent",
            "done low",
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_tracks_mutations(service: TestService) {
    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let task = service
            .create_task(CreateTaskRequest::new(title))
            .await
            .expect("create should succeed");
        ids.push(task.id());
    }
    let first = *ids.first().expect("three ids");
    service
        .toggle_completion(first)
        .await
        .expect("toggle should succeed");

    let summary = service.summary().await.expect("summary should succeed");
    assert_eq!(
        summary,
        TaskSummary {
            total: 3,
            completed: 1,
            remaining: 2,
            progress: 33,
        }
    );

    let last = *ids.last().expect("three ids");
    service
        .remove_task(last)
        .await
        .expect("remove should succeed");
    let summary = service.summary().await.expect("summary should succeed");
    assert_eq!(summary.progress, 50);
}
