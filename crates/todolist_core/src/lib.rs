//! Core logic for the todolist task tracker.
//! Storage, queries and the interactive menu live here; the binary only wires them up.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use app::{AppError, AppResult, Command, RunState, TodoApp};
pub use config::AppConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{parse_deadline, DeadlineParseError, NewTask, Task, TaskId};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::{DayAgenda, DeleteOutcome, TaskListing, TaskService};
