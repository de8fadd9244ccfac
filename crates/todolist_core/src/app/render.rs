//! Text rendering for menu views.
//!
//! Every function writes whole lines; callers own separators between views.

use crate::model::task::Task;
use crate::service::task_service::{DayAgenda, TaskListing};
use chrono::{Datelike, NaiveDate};
use std::io::{self, Write};

pub const MENU: &str = "1) Today's tasks\n2) Week's tasks\n3) All tasks\n4) Missed Tasks\n5) Add task\n6) Delete Task\n0) Exit\n";
pub const NOTHING_TO_DO: &str = "Nothing to do!";
pub const NOTHING_MISSED: &str = "Nothing is missed!";
pub const ENTER_TASK: &str = "Enter task";
pub const ENTER_DEADLINE: &str = "Enter deadline";
pub const TASK_ADDED: &str = "The task has been added!";
pub const CHOOSE_TASK_TO_DELETE: &str = "Choose the number of the task you want to delete:";
pub const TASK_DELETED: &str = "The task has been deleted!";
pub const KEY_OUT_OF_BOUNDS: &str = "Key out of bounds";
pub const FAREWELL: &str = "Bye!";

/// `5 Jun`
pub fn day_month(date: NaiveDate) -> String {
    format!("{} {}", date.day(), date.format("%b"))
}

pub fn write_today<W: Write>(out: &mut W, today: NaiveDate, tasks: &[Task]) -> io::Result<()> {
    writeln!(out, "Today {}:", day_month(today))?;
    write_day_tasks(out, tasks)
}

pub fn write_week<W: Write>(out: &mut W, agenda: &[DayAgenda]) -> io::Result<()> {
    for day in agenda {
        writeln!(out, "{} {}:", day.day.format("%A"), day_month(day.day))?;
        write_day_tasks(out, &day.tasks)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_all<W: Write>(out: &mut W, listing: &TaskListing) -> io::Result<()> {
    if listing.is_empty() {
        return writeln!(out, "{NOTHING_TO_DO}");
    }
    for (number, task) in listing.numbered() {
        writeln!(
            out,
            "{number}. {}. {}",
            task.description,
            day_month(task.deadline)
        )?;
    }
    Ok(())
}

pub fn write_missed<W: Write>(out: &mut W, listing: &TaskListing) -> io::Result<()> {
    if listing.is_empty() {
        return writeln!(out, "{NOTHING_MISSED}");
    }
    for (number, task) in listing.numbered() {
        writeln!(
            out,
            "{number}. {} {}",
            task.description,
            day_month(task.deadline)
        )?;
    }
    Ok(())
}

fn write_day_tasks<W: Write>(out: &mut W, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "{NOTHING_TO_DO}");
    }
    for (index, task) in tasks.iter().enumerate() {
        writeln!(out, "{}. {}", index + 1, task.description)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{day_month, write_all, write_missed, write_week};
    use crate::model::task::Task;
    use crate::service::task_service::{DayAgenda, TaskListing};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn day_month_has_no_zero_padding() {
        assert_eq!(day_month(date(2024, 6, 1)), "1 Jun");
        assert_eq!(day_month(date(2024, 12, 25)), "25 Dec");
    }

    #[test]
    fn all_and_missed_differ_only_in_separator() {
        let listing = TaskListing::new(vec![Task {
            id: 1,
            description: "Buy milk".to_string(),
            deadline: date(2024, 6, 1),
        }]);
        assert_eq!(render(|out| write_all(out, &listing)), "1. Buy milk. 1 Jun\n");
        assert_eq!(render(|out| write_missed(out, &listing)), "1. Buy milk 1 Jun\n");
    }

    #[test]
    fn empty_views_use_their_placeholders() {
        let empty = TaskListing::default();
        assert_eq!(render(|out| write_all(out, &empty)), "Nothing to do!\n");
        assert_eq!(render(|out| write_missed(out, &empty)), "Nothing is missed!\n");
    }

    #[test]
    fn week_prints_weekday_headers_and_blank_lines() {
        let agenda = vec![DayAgenda {
            day: date(2024, 1, 1),
            tasks: Vec::new(),
        }];
        assert_eq!(
            render(|out| write_week(out, &agenda)),
            "Monday 1 Jan:\nNothing to do!\n\n"
        );
    }
}
