//! Domain model for task tracking.
//!
//! The task domain models the persisted to-do item, its completion state
//! machine, image attachment classification, display ordering, and summary
//! statistics while keeping all infrastructure concerns outside of the
//! domain boundary.

mod attachment;
mod completion;
mod error;
mod ids;
mod ordering;
mod priority;
mod subtask;
mod summary;
mod task;

pub use attachment::{Attachment, is_remote_reference};
pub use completion::{COMPLETED_AT_FORMAT, Completion};
pub use error::TaskDomainError;
pub use ids::TaskId;
pub use ordering::{compare_for_display, sort_for_display};
pub use priority::{Priority, PriorityLevel};
pub use subtask::SubTask;
pub use summary::{PriorityBreakdown, TaskSummary};
pub use task::{NewTask, PersistedTaskData, Task, TaskEdit};
