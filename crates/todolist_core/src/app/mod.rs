//! Interactive text menu over a task list.
//!
//! # Responsibility
//! - Run the read/dispatch/print loop until the exit command.
//! - Translate user input into service calls and render the results.
//!
//! # Invariants
//! - `RunState::Stopped` is terminal; only `Command::Exit` reaches it.
//! - Unknown command codes are ignored without output.
//! - Malformed deadlines and delete numbers propagate as `AppError`.

mod command;
pub mod render;

pub use command::Command;

use crate::model::task::{parse_deadline, DeadlineParseError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::service::task_service::{DeleteOutcome, TaskService};
use chrono::{Local, NaiveDate};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::num::ParseIntError;

pub type AppResult<T> = Result<T, AppError>;

/// Failures that end the menu loop.
#[derive(Debug)]
pub enum AppError {
    Io(io::Error),
    Repo(RepoError),
    InvalidDeadline(DeadlineParseError),
    InvalidSelection {
        input: String,
        source: ParseIntError,
    },
    InputClosed,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InvalidDeadline(err) => write!(f, "{err}"),
            Self::InvalidSelection { input, source } => {
                write!(f, "invalid task number `{input}`: {source}")
            }
            Self::InputClosed => write!(f, "input closed before exit was requested"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidDeadline(err) => Some(err),
            Self::InvalidSelection { source, .. } => Some(source),
            Self::InputClosed => None,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DeadlineParseError> for AppError {
    fn from(value: DeadlineParseError) -> Self {
        Self::InvalidDeadline(value)
    }
}

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Stopped,
}

/// Source of the current date for date-relative views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Today {
    /// Local calendar date, read on every command.
    Local,
    Fixed(NaiveDate),
}

impl Today {
    pub fn date(self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Fixed(day) => day,
        }
    }
}

/// Menu application bound to one task list.
pub struct TodoApp<R: TaskRepository> {
    service: TaskService<R>,
    today: Today,
    state: RunState,
}

impl<R: TaskRepository> TodoApp<R> {
    pub fn new(service: TaskService<R>) -> Self {
        Self {
            service,
            today: Today::Local,
            state: RunState::Running,
        }
    }

    /// Pins "today" to a fixed date.
    pub fn with_today(mut self, day: NaiveDate) -> Self {
        self.today = Today::Fixed(day);
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn service(&self) -> &TaskService<R> {
        &self.service
    }

    /// Runs iterations until the exit command is read.
    ///
    /// # Errors
    /// - Any `AppError` aborts the loop immediately and is returned.
    pub fn run<I: BufRead, O: Write>(&mut self, input: &mut I, output: &mut O) -> AppResult<()> {
        info!("event=menu_loop module=app status=start");
        while self.state == RunState::Running {
            self.step(input, output)?;
        }
        info!("event=menu_loop module=app status=stopped");
        Ok(())
    }

    /// Runs a single menu iteration.
    pub fn step<I: BufRead, O: Write>(&mut self, input: &mut I, output: &mut O) -> AppResult<()> {
        write!(output, "{}", render::MENU)?;
        let line = read_line(input, output)?;
        writeln!(output)?;

        let command = Command::parse(&line);
        debug!(
            "event=menu_command module=app status=read code={}",
            command.map_or('?', Command::code)
        );
        if let Some(command) = command {
            self.dispatch(command, input, output)?;
        }

        if self.state == RunState::Stopped {
            writeln!(output, "{}", render::FAREWELL)?;
        } else {
            writeln!(output)?;
        }
        output.flush()?;
        Ok(())
    }

    fn dispatch<I: BufRead, O: Write>(
        &mut self,
        command: Command,
        input: &mut I,
        output: &mut O,
    ) -> AppResult<()> {
        match command {
            Command::Today => {
                let today = self.today.date();
                let tasks = self.service.tasks_on(today)?;
                render::write_today(output, today, &tasks)?;
            }
            Command::Week => {
                let agenda = self.service.week_agenda(self.today.date())?;
                render::write_week(output, &agenda)?;
            }
            Command::All => {
                let listing = self.service.all_tasks()?;
                render::write_all(output, &listing)?;
            }
            Command::Missed => {
                let listing = self.service.missed_tasks(self.today.date())?;
                render::write_missed(output, &listing)?;
            }
            Command::Add => self.add_task(input, output)?,
            Command::Delete => self.delete_task(input, output)?,
            Command::Exit => self.state = RunState::Stopped,
        }
        Ok(())
    }

    fn add_task<I: BufRead, O: Write>(&self, input: &mut I, output: &mut O) -> AppResult<()> {
        writeln!(output, "{}", render::ENTER_TASK)?;
        let description = read_line(input, output)?;
        writeln!(output, "{}", render::ENTER_DEADLINE)?;
        let deadline = parse_deadline(&read_line(input, output)?)?;

        self.service.add_task(description, deadline)?;
        writeln!(output, "{}", render::TASK_ADDED)?;
        Ok(())
    }

    fn delete_task<I: BufRead, O: Write>(&self, input: &mut I, output: &mut O) -> AppResult<()> {
        writeln!(output, "{}", render::CHOOSE_TASK_TO_DELETE)?;
        let listing = self.service.all_tasks()?;
        render::write_all(output, &listing)?;

        let raw = read_line(input, output)?;
        let number = raw
            .trim()
            .parse::<i64>()
            .map_err(|source| AppError::InvalidSelection {
                input: raw.clone(),
                source,
            })?;

        match self.service.delete_by_number(&listing, number)? {
            DeleteOutcome::Deleted(_) => writeln!(output, "{}", render::TASK_DELETED)?,
            DeleteOutcome::OutOfBounds(_) => writeln!(output, "{}", render::KEY_OUT_OF_BOUNDS)?,
        }
        Ok(())
    }
}

/// Flushes pending output, then reads one line without its terminator.
fn read_line<I: BufRead, O: Write>(input: &mut I, output: &mut O) -> AppResult<String> {
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AppError::InputClosed);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
