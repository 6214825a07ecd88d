//! `SQLite` repository implementation for task storage.

use super::{
    models::{CompletionChangeset, NewTaskRow, TaskEditChangeset, TaskRow},
    schema::{CREATE_TASKS_TABLE_SQL, tasks},
};
use crate::config::DatabaseConfig;
use crate::task::{
    domain::{
        Attachment, Completion, NewTask, PersistedTaskData, Priority, Task, TaskEdit, TaskId,
    },
    ports::{MutationOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_types::BigInt;
use diesel::sqlite::SqliteConnection;
use std::time::Duration;
use tracing::debug;

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Applies `PRAGMA busy_timeout` to each pooled connection so concurrent
/// writers wait for the database lock instead of failing.
#[derive(Debug, Clone, Copy)]
struct BusyTimeout(u32);

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for BusyTimeout {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("PRAGMA busy_timeout = {};", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a connection pool for the database file named in `config`.
///
/// An in-memory database is held on a single connection that is never
/// recycled, since every new connection would open a separate empty database.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when no connection can be
/// established within the configured connect timeout.
pub fn build_pool(config: &DatabaseConfig) -> TaskRepositoryResult<TaskSqlitePool> {
    let manager = ConnectionManager::<SqliteConnection>::new(config.path.to_string_lossy());
    let builder = if config.is_in_memory() {
        Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        Pool::builder().max_size(config.pool_size.max(1))
    };
    builder
        .connection_timeout(Duration::from_millis(config.connect_timeout_ms))
        .connection_customizer(Box::new(BusyTimeout(config.busy_timeout_ms)))
        .build(manager)
        .map_err(TaskRepositoryError::persistence)
}

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from a `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the database named in `config`.
    ///
    /// The table is not created; call [`TaskRepository::create_table`]
    /// before first use.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the database cannot
    /// be opened.
    pub fn connect(config: &DatabaseConfig) -> TaskRepositoryResult<Self> {
        debug!(path = %config.path.display(), "opening task database");
        build_pool(config).map(Self::new)
    }

    /// Releases this handle's pooled connections.
    ///
    /// The pool is shared between clones; the database is closed when the
    /// last clone is closed or dropped.
    pub fn close(self) {
        debug!("closing task database handle");
        drop(self.pool);
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create_table(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASKS_TABLE_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskId> {
        let new_row = to_new_row(task);
        self.run_blocking(move |connection| {
            connection
                .immediate_transaction(|conn| {
                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .execute(conn)?;
                    diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result::<i64>(conn)
                })
                .map(TaskId::new)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
        .inspect(|id| debug!(task_id = %id, "task row inserted"))
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn update(&self, id: TaskId, edit: &TaskEdit) -> TaskRepositoryResult<MutationOutcome> {
        debug!(task_id = %id, "updating task row");
        let changeset = TaskEditChangeset {
            title: edit.title().to_owned(),
            description: Some(edit.description().to_owned()),
            priority: Some(edit.priority().value()),
        };
        let image_url = edit
            .attachment()
            .map(|attachment| attachment.as_stored().map(str::to_owned));
        self.run_blocking(move |connection| {
            connection
                .immediate_transaction(|conn| {
                    let rows = diesel::update(tasks::table.find(id.value()))
                        .set(&changeset)
                        .execute(conn)?;
                    if let Some(image) = image_url.filter(|_| rows > 0) {
                        diesel::update(tasks::table.find(id.value()))
                            .set(tasks::image_url.eq(image))
                            .execute(conn)?;
                    }
                    Ok::<_, diesel::result::Error>(rows)
                })
                .map(MutationOutcome::from_rows_affected)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn set_completion(
        &self,
        id: TaskId,
        completion: &Completion,
    ) -> TaskRepositoryResult<MutationOutcome> {
        debug!(task_id = %id, "writing task completion");
        let changeset = CompletionChangeset {
            is_completed: Some(completion.as_flag()),
            completed_at: completion.completed_at().map(str::to_owned),
        };
        self.run_blocking(move |connection| {
            diesel::update(tasks::table.find(id.value()))
                .set(&changeset)
                .execute(connection)
                .map(MutationOutcome::from_rows_affected)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn set_image_url(
        &self,
        id: TaskId,
        attachment: &Attachment,
    ) -> TaskRepositoryResult<MutationOutcome> {
        debug!(task_id = %id, "writing task image");
        let image_url = attachment.as_stored().map(str::to_owned);
        self.run_blocking(move |connection| {
            diesel::update(tasks::table.find(id.value()))
                .set(tasks::image_url.eq(image_url))
                .execute(connection)
                .map(MutationOutcome::from_rows_affected)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<MutationOutcome> {
        debug!(task_id = %id, "deleting task row");
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map(MutationOutcome::from_rows_affected)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: task.title().to_owned(),
        description: Some(task.description().to_owned()),
        category_id: task.category_id(),
        due_date: Some(task.due_date().to_owned()),
        priority: Some(task.priority().value()),
        is_completed: Some(Completion::Pending.as_flag()),
        image_url: task.attachment().as_stored().map(str::to_owned),
    }
}

fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        category_id,
        title,
        description,
        due_date,
        priority,
        is_completed,
        completed_at,
        image_url,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        description: description.unwrap_or_default(),
        category_id,
        due_date,
        priority: priority.map_or_else(Priority::default, Priority::new),
        completion: Completion::from_columns(is_completed.unwrap_or_default(), completed_at),
        attachment: Attachment::classify(image_url.as_deref()),
    })
}
