//! Image resolution through the lifecycle service.

use std::sync::Arc;

use crate::test_helpers::{FixedClock, StubUploader, UPLOADED_URL};
use notelite::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Attachment,
    services::{CreateTaskRequest, EditTaskRequest, TaskLifecycleService},
};
use rstest::rstest;

const LOCAL: &str = "file:///storage/emulated/0/DCIM/receipt.png";

fn service_with(
    uploader: &Arc<StubUploader>,
) -> TaskLifecycleService<InMemoryTaskRepository, StubUploader, FixedClock> {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(uploader),
        Arc::new(FixedClock::at(12, 0)),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn local_image_is_replaced_by_durable_url() {
    let uploader = Arc::new(StubUploader::succeeding());
    let service = service_with(&uploader);

    let created = service
        .create_task(CreateTaskRequest::new("Expense").with_image(LOCAL))
        .await
        .expect("create should succeed");

    assert_eq!(created.image_url(), Some(UPLOADED_URL));
    assert_eq!(uploader.seen(), [LOCAL]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_again_does_not_reupload() {
    let uploader = Arc::new(StubUploader::succeeding());
    let service = service_with(&uploader);
    let created = service
        .create_task(CreateTaskRequest::new("Expense").with_image(LOCAL))
        .await
        .expect("create should succeed");

    service
        .edit_task(
            created.id(),
            EditTaskRequest::new("Expense").with_image(UPLOADED_URL),
        )
        .await
        .expect("edit with same url should succeed");
    service
        .edit_task(created.id(), EditTaskRequest::new("Expense, filed"))
        .await
        .expect("edit without image should succeed");

    assert_eq!(uploader.calls(), 1);
    let task = service.list_tasks().await.expect("list").remove(0);
    assert_eq!(task.attachment(), &Attachment::Remote(UPLOADED_URL.to_owned()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_failure_keeps_local_reference_as_pending() {
    let uploader = Arc::new(StubUploader::failing());
    let service = service_with(&uploader);

    let created = service
        .create_task(CreateTaskRequest::new("Expense").with_image(LOCAL))
        .await
        .expect("create should succeed despite upload failure");

    assert_eq!(uploader.calls(), 1);
    assert_eq!(created.image_url(), Some(LOCAL));
    assert!(created.attachment().is_pending_upload());
}
