//! In-memory repository for task tracking tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Attachment, Completion, NewTask, PersistedTaskData, Task, TaskEdit, TaskId},
    ports::{MutationOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    /// Replaces the stored task with the output of `change`, if it exists.
    fn modify(
        &self,
        id: TaskId,
        change: impl FnOnce(PersistedTaskData) -> PersistedTaskData,
    ) -> TaskRepositoryResult<MutationOutcome> {
        let mut state = self.write()?;
        let Some(existing) = state.tasks.get(&id) else {
            return Ok(MutationOutcome::NoMatch);
        };
        let updated = Task::from_persisted(change(to_data(existing)));
        state.tasks.insert(id, updated);
        Ok(MutationOutcome::Applied)
    }
}

fn to_data(task: &Task) -> PersistedTaskData {
    PersistedTaskData {
        id: task.id(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        category_id: task.category_id(),
        due_date: task.due_date().map(str::to_owned),
        priority: task.priority(),
        completion: task.completion().clone(),
        attachment: task.attachment().clone(),
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create_table(&self) -> TaskRepositoryResult<()> {
        self.read().map(drop)
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskId> {
        let mut state = self.write()?;
        state.last_id += 1;
        let id = TaskId::new(state.last_id);
        let stored = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            category_id: task.category_id(),
            due_date: Some(task.due_date().to_owned()),
            priority: task.priority(),
            completion: Completion::Pending,
            attachment: task.attachment().clone(),
        });
        state.tasks.insert(id, stored);
        Ok(id)
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn update(&self, id: TaskId, edit: &TaskEdit) -> TaskRepositoryResult<MutationOutcome> {
        self.modify(id, |data| PersistedTaskData {
            title: edit.title().to_owned(),
            description: edit.description().to_owned(),
            priority: edit.priority(),
            attachment: edit.attachment().cloned().unwrap_or(data.attachment),
            ..data
        })
    }

    async fn set_completion(
        &self,
        id: TaskId,
        completion: &Completion,
    ) -> TaskRepositoryResult<MutationOutcome> {
        self.modify(id, |data| PersistedTaskData {
            completion: completion.clone(),
            ..data
        })
    }

    async fn set_image_url(
        &self,
        id: TaskId,
        attachment: &Attachment,
    ) -> TaskRepositoryResult<MutationOutcome> {
        self.modify(id, |data| PersistedTaskData {
            attachment: attachment.clone(),
            ..data
        })
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<MutationOutcome> {
        let mut state = self.write()?;
        Ok(if state.tasks.remove(&id).is_some() {
            MutationOutcome::Applied
        } else {
            MutationOutcome::NoMatch
        })
    }
}
