//! Shared world state for task completion BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::{FixedClock, StubUploader};
use notelite::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    ports::MutationOutcome,
    services::TaskLifecycleService,
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, StubUploader, FixedClock>;

/// Scenario world for task completion behaviour tests.
pub struct TaskWorld {
    /// Repository shared by every service the scenario builds.
    pub repository: Arc<InMemoryTaskRepository>,
    /// Whether uploads should fail.
    pub image_host_down: bool,
    /// Outcome of the last delete.
    pub last_delete: Option<MutationOutcome>,
}

impl TaskWorld {
    /// Creates a world with an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repository: Arc::new(InMemoryTaskRepository::new()),
            image_host_down: false,
            last_delete: None,
        }
    }

    /// Builds a service over the scenario repository.
    pub fn service(&self) -> TestTaskService {
        let uploader = if self.image_host_down {
            StubUploader::failing()
        } else {
            StubUploader::succeeding()
        };
        TaskLifecycleService::new(
            Arc::clone(&self.repository),
            Arc::new(uploader),
            Arc::new(FixedClock::at(14, 30)),
        )
    }

    /// Lists tasks in display order.
    pub fn tasks(&self) -> Result<Vec<Task>, eyre::Report> {
        run_async(self.service().list_tasks()).map_err(|err| eyre::eyre!("list failed: {err}"))
    }

    /// Finds the task titled `title`.
    pub fn task_titled(&self, title: &str) -> Result<Task, eyre::Report> {
        self.tasks()?
            .into_iter()
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre::eyre!("no task titled '{title}'"))
    }

    /// Returns the id of the task titled `title`.
    pub fn id_of(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.task_titled(title).map(|task| task.id())
    }
}

impl Default for TaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorld {
    TaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
