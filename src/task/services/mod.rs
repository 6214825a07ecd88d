//! Application services for task orchestration.

mod attachment;
mod lifecycle;

pub use attachment::AttachmentResolver;
pub use lifecycle::{
    CreateTaskRequest, EditTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
