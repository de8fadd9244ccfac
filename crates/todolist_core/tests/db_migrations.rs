use rusqlite::Connection;
use todolist_core::db::migrations::latest_version;
use todolist_core::db::{open_db, open_db_in_memory, DbError};
use chrono::NaiveDate;
use todolist_core::{NewTask, RepoError, SqliteTaskRepository, TaskRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "task");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "task");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn existing_unversioned_task_table_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE task (id INTEGER NOT NULL, task VARCHAR, deadline DATE, PRIMARY KEY (id));
         INSERT INTO task (task, deadline) VALUES ('legacy row', '2024-03-04');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM task;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert!(task_table_sql(&conn).contains("AUTOINCREMENT"));
}

#[test]
fn unversioned_task_table_stops_reusing_ids_after_delete() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE task (id INTEGER NOT NULL, task VARCHAR, deadline DATE, PRIMARY KEY (id));
         INSERT INTO task (id, task, deadline) VALUES (3, 'legacy row', '2024-03-04');",
    )
    .unwrap();
    drop(conn);

    let repo = SqliteTaskRepository::open(&path).unwrap();
    let first = repo
        .add(&NewTask::new("added", date(2024, 3, 5)))
        .unwrap();
    assert_eq!(first.id, 4);
    repo.delete(&first).unwrap();

    let second = repo
        .add(&NewTask::new("added again", date(2024, 3, 5)))
        .unwrap();
    assert_ne!(second.id, first.id);

    let legacy = repo.get(3).unwrap().unwrap();
    assert_eq!(legacy.description, "legacy row");
    assert_eq!(legacy.deadline, date(2024, 3, 4));
}

#[test]
fn rebuild_keeps_sequence_above_deleted_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE task (id INTEGER PRIMARY KEY AUTOINCREMENT, task TEXT, deadline DATE);
         INSERT INTO task (task, deadline) VALUES ('kept', '2024-01-01');
         INSERT INTO task (task, deadline) VALUES ('deleted', '2024-01-02');
         DELETE FROM task WHERE id = 2;
         PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let repo = SqliteTaskRepository::open(&path).unwrap();
    let added = repo
        .add(&NewTask::new("after rebuild", date(2024, 1, 3)))
        .unwrap();
    assert_eq!(added.id, 3);
    assert_eq!(repo.list_all().unwrap().len(), 2);
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteTaskRepository::try_new(conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::SchemaNotReady { found: 0, expected } if expected == latest_version()
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn task_table_sql(conn: &Connection) -> String {
    conn.query_row(
        "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'task';",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
