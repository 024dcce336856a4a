//! `SQLite` repository implementation for task record storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskDraft, TaskId, TaskPatch, TaskStatus, TaskTitle},
    ports::{Page, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Table definition executed at startup, mirroring the Diesel schema.
///
/// `AUTOINCREMENT` keeps identifiers monotonically increasing and prevents
/// `SQLite` from reusing the rowid of a deleted record.
const CREATE_TASKS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS tasks (\
  id INTEGER PRIMARY KEY AUTOINCREMENT,\
  title VARCHAR(100) NOT NULL,\
  description TEXT,\
  status VARCHAR(20) NOT NULL,\
  created_at TEXT NOT NULL,\
  updated_at TEXT NOT NULL\
)";

/// Session pragmas applied to every pooled connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds a connection pool for the given `SQLite` database URL.
///
/// Each pooled connection gets a busy timeout so concurrent writers queue on
/// `SQLite`'s own locking rather than failing immediately.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot be
/// initialised.
pub fn connect(database_url: &str) -> TaskRepositoryResult<TaskSqlitePool> {
    Pool::builder()
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(ConnectionManager::new(database_url))
        .map_err(TaskRepositoryError::persistence)
}

/// Creates the `tasks` table when it does not exist yet.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the connection cannot
/// be checked out or the DDL fails.
pub fn ensure_schema(pool: &TaskSqlitePool) -> TaskRepositoryResult<()> {
    let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
    diesel::sql_query(CREATE_TASKS_TABLE)
        .execute(&mut connection)
        .map_err(TaskRepositoryError::persistence)?;
    Ok(())
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

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let new_row = to_new_row(&draft);
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = find_row_by_id(connection, id)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, page: Page) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .offset(i64::from(page.offset()))
                .limit(i64::from(page.limit()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            // Read-modify-write under an immediate transaction so concurrent
            // writers to the same record serialize on the database lock.
            connection.immediate_transaction(|transaction| {
                let Some(row) = find_row_by_id(transaction, id)? else {
                    return Ok(None);
                };
                let mut task = row_to_task(row)?;
                task.apply(patch, updated_at);

                diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .set((
                        tasks::title.eq(task.title().as_str().to_owned()),
                        tasks::description.eq(task.description().map(ToOwned::to_owned)),
                        tasks::status.eq(task.status().as_str().to_owned()),
                        tasks::updated_at.eq(task.updated_at()),
                    ))
                    .execute(transaction)
                    .map_err(TaskRepositoryError::persistence)?;

                Ok(Some(task))
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            connection.immediate_transaction(|transaction| {
                let Some(row) = find_row_by_id(transaction, id)? else {
                    return Ok(None);
                };
                let task = row_to_task(row)?;

                diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                    .execute(transaction)
                    .map_err(TaskRepositoryError::persistence)?;

                Ok(Some(task))
            })
        })
        .await
    }
}

fn find_row_by_id(
    connection: &mut SqliteConnection,
    id: TaskId,
) -> TaskRepositoryResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)
}

fn to_new_row(draft: &TaskDraft) -> NewTaskRow {
    NewTaskRow {
        title: draft.title().as_str().to_owned(),
        description: draft.description().map(ToOwned::to_owned),
        status: draft.status().as_str().to_owned(),
        created_at: draft.created_at(),
        updated_at: draft.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status,
        created_at,
        updated_at,
    } = row;

    let parsed_title =
        TaskTitle::new(title).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let parsed_status = TaskStatus::try_from(status.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;

    let data = PersistedTaskData {
        id: TaskId::from_i64(id),
        title: parsed_title,
        description,
        status: parsed_status,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
