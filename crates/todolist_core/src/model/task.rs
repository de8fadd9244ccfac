//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted `Task` record and the unsaved `NewTask` draft.
//! - Parse user-entered deadlines.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another task.
//! - `deadline` is a calendar date without time component.

use chrono::{Local, NaiveDate, ParseError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned task identifier.
pub type TaskId = i64;

/// Accepted deadline input format.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Serialized as `task` to match the storage column.
    #[serde(rename = "task")]
    pub description: String,
    pub deadline: NaiveDate,
}

/// A task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub description: String,
    pub deadline: NaiveDate,
}

impl NewTask {
    pub fn new(description: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            description: description.into(),
            deadline,
        }
    }

    /// Creates a draft due on the local date at the time of this call.
    pub fn due_today(description: impl Into<String>) -> Self {
        Self::new(description, Local::now().date_naive())
    }
}

/// Error returned when a deadline does not match `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineParseError {
    pub input: String,
    pub source: ParseError,
}

impl Display for DeadlineParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid deadline `{}` (expected YYYY-MM-DD): {}",
            self.input, self.source
        )
    }
}

impl Error for DeadlineParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Parses a deadline typed by the user.
///
/// The input is taken verbatim; surrounding whitespace is rejected.
pub fn parse_deadline(input: &str) -> Result<NaiveDate, DeadlineParseError> {
    NaiveDate::parse_from_str(input, DEADLINE_FORMAT).map_err(|source| DeadlineParseError {
        input: input.to_string(),
        source,
    })
}
