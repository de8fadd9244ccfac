//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/filter/delete APIs over the `task` table.
//! - Own the SQLite connection for the lifetime of one task list session.
//!
//! # Invariants
//! - Listings ordered by deadline break ties by ascending `id`.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Ids come from `AUTOINCREMENT` and are never handed out twice.

use crate::db::migrations::latest_version;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::task::{NewTask, Task, TaskId, DEADLINE_FORMAT};
use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{params, Connection, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const TASK_SELECT_SQL: &str = "SELECT id, task, deadline FROM task";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
    SchemaNotReady { found: u32, expected: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "connection schema version {found} does not match expected {expected}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::SchemaNotReady { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task operations.
pub trait TaskRepository {
    /// Persists a new task and returns the stored record.
    fn add(&self, task: &NewTask) -> RepoResult<Task>;
    /// Gets one task by id.
    fn get(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists every task ascending by deadline.
    fn list_all(&self) -> RepoResult<Vec<Task>>;
    /// Lists tasks due exactly on `day`.
    fn list_on(&self, day: NaiveDate) -> RepoResult<Vec<Task>>;
    /// Lists tasks due strictly before `today`, ascending by deadline.
    fn list_missed(&self, today: NaiveDate) -> RepoResult<Vec<Task>>;
    /// Removes a stored task. Fails with `NotFound` when it is already gone.
    fn delete(&self, task: &Task) -> RepoResult<()>;
}

/// SQLite-backed task repository owning its connection.
pub struct SqliteTaskRepository {
    conn: Connection,
}

impl SqliteTaskRepository {
    /// Opens (creating if absent) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a throwaway in-memory task list.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Takes ownership of an already migrated connection.
    ///
    /// # Errors
    /// - `SchemaNotReady` when migrations have not been applied.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected = latest_version();
        if found != expected {
            return Err(RepoError::SchemaNotReady { found, expected });
        }
        Ok(Self { conn })
    }

    fn query_tasks(&self, sql: &str, params: impl Params) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository {
    fn add(&self, task: &NewTask) -> RepoResult<Task> {
        self.conn.execute(
            "INSERT INTO task (task, deadline) VALUES (?1, ?2);",
            params![task.description.as_str(), deadline_to_db(task.deadline)],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("event=task_add module=repo status=ok task_id={id}");

        Ok(Task {
            id,
            description: task.description.clone(),
            deadline: task.deadline,
        })
    }

    fn get(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut tasks = self.query_tasks(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(tasks.pop())
    }

    fn list_all(&self) -> RepoResult<Vec<Task>> {
        let tasks = self.query_tasks(
            &format!("{TASK_SELECT_SQL} ORDER BY deadline ASC, id ASC;"),
            [],
        )?;
        debug!("event=task_list module=repo status=ok filter=all count={}", tasks.len());
        Ok(tasks)
    }

    fn list_on(&self, day: NaiveDate) -> RepoResult<Vec<Task>> {
        let tasks = self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE deadline = ?1 ORDER BY id ASC;"),
            [deadline_to_db(day)],
        )?;
        debug!("event=task_list module=repo status=ok filter=on count={}", tasks.len());
        Ok(tasks)
    }

    fn list_missed(&self, today: NaiveDate) -> RepoResult<Vec<Task>> {
        let tasks = self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE deadline < ?1 ORDER BY deadline ASC, id ASC;"),
            [deadline_to_db(today)],
        )?;
        debug!("event=task_list module=repo status=ok filter=missed count={}", tasks.len());
        Ok(tasks)
    }

    fn delete(&self, task: &Task) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM task WHERE id = ?1;", [task.id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        info!("event=task_delete module=repo status=ok task_id={}", task.id);
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;

    let description = row.get::<_, Option<String>>("task")?.ok_or_else(|| {
        RepoError::InvalidData(format!("missing description for task {id} in task.task"))
    })?;

    let deadline_text: String = row.get::<_, Option<String>>("deadline")?.ok_or_else(|| {
        RepoError::InvalidData(format!("missing deadline for task {id} in task.deadline"))
    })?;
    let deadline = NaiveDate::parse_from_str(&deadline_text, DEADLINE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid deadline `{deadline_text}` for task {id} in task.deadline"
        ))
    })?;

    Ok(Task {
        id,
        description,
        deadline,
    })
}

fn deadline_to_db(deadline: NaiveDate) -> String {
    deadline.format(DEADLINE_FORMAT).to_string()
}
