//! Task use-case service.
//!
//! # Responsibility
//! - Turn repository queries into the views the menu shows.
//! - Resolve 1-based display numbers back to stored tasks.
//!
//! # Invariants
//! - Service layer remains storage-agnostic.
//! - An out-of-range display number never mutates storage.

use crate::model::task::{NewTask, Task};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use chrono::{Days, NaiveDate};
use log::info;

/// Number of days covered by the week agenda, starting today.
pub const WEEK_AGENDA_DAYS: u64 = 7;

/// Tasks due on one day of the week agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAgenda {
    pub day: NaiveDate,
    pub tasks: Vec<Task>,
}

/// Ordered listing whose positions double as 1-based display numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListing {
    tasks: Vec<Task>,
}

impl TaskListing {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Resolves a display number. Zero and negative numbers never match.
    pub fn get(&self, number: i64) -> Option<&Task> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.tasks.get(index)
    }

    /// Iterates `(display_number, task)` pairs in display order.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate().map(|(index, task)| (index + 1, task))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Result of deleting by display number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Task),
    OutOfBounds(i64),
}

/// Use-case service wrapper over a task repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn tasks_on(&self, day: NaiveDate) -> RepoResult<Vec<Task>> {
        self.repo.list_on(day)
    }

    /// Builds the agenda for `today` and the following six days.
    pub fn week_agenda(&self, today: NaiveDate) -> RepoResult<Vec<DayAgenda>> {
        let mut agenda = Vec::new();
        for offset in 0..WEEK_AGENDA_DAYS {
            let Some(day) = today.checked_add_days(Days::new(offset)) else {
                break;
            };
            agenda.push(DayAgenda {
                day,
                tasks: self.repo.list_on(day)?,
            });
        }
        Ok(agenda)
    }

    pub fn all_tasks(&self) -> RepoResult<TaskListing> {
        Ok(TaskListing::new(self.repo.list_all()?))
    }

    pub fn missed_tasks(&self, today: NaiveDate) -> RepoResult<TaskListing> {
        Ok(TaskListing::new(self.repo.list_missed(today)?))
    }

    pub fn add_task(&self, description: impl Into<String>, deadline: NaiveDate) -> RepoResult<Task> {
        self.repo.add(&NewTask::new(description, deadline))
    }

    /// Deletes the task shown under `number` in `listing`.
    ///
    /// # Contract
    /// - Out-of-range numbers return `OutOfBounds` and touch nothing.
    /// - Returns repository `NotFound` if the task vanished since listing.
    pub fn delete_by_number(
        &self,
        listing: &TaskListing,
        number: i64,
    ) -> RepoResult<DeleteOutcome> {
        let Some(task) = listing.get(number) else {
            info!(
                "event=task_delete module=service status=rejected reason=out_of_bounds number={number} listed={}",
                listing.len()
            );
            return Ok(DeleteOutcome::OutOfBounds(number));
        };

        self.repo.delete(task)?;
        Ok(DeleteOutcome::Deleted(task.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::TaskListing;
    use crate::model::task::Task;
    use chrono::NaiveDate;

    fn task(id: i64) -> Task {
        Task {
            id,
            description: format!("task {id}"),
            deadline: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn listing_resolves_one_based_numbers() {
        let listing = TaskListing::new(vec![task(7), task(3)]);
        assert_eq!(listing.get(1).map(|t| t.id), Some(7));
        assert_eq!(listing.get(2).map(|t| t.id), Some(3));
    }

    #[test]
    fn listing_rejects_zero_negative_and_overflow() {
        let listing = TaskListing::new(vec![task(1)]);
        assert!(listing.get(0).is_none());
        assert!(listing.get(-1).is_none());
        assert!(listing.get(2).is_none());
        assert!(listing.get(i64::MAX).is_none());
    }

    #[test]
    fn numbered_starts_at_one() {
        let listing = TaskListing::new(vec![task(4), task(5)]);
        let numbers: Vec<usize> = listing.numbered().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
