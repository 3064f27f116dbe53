//! Fixed-locale (English) display labels for dates and task rows.
//!
//! Formatting never fails: values that cannot be described render as
//! nothing.

use crate::model::task::Task;
use chrono::{DateTime, NaiveDate, Utc};

/// Due-date badge text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDateLabel {
    /// e.g. `Wed, May 1`
    pub formatted: String,
    /// e.g. `tomorrow`, `in 3 days`; `None` beyond one week either way.
    pub relative: Option<String>,
}

impl DueDateLabel {
    /// Badge text, e.g. `due Wed, May 1 · tomorrow`.
    pub fn badge(&self) -> String {
        match &self.relative {
            Some(relative) => format!("due {} · {relative}", self.formatted),
            None => format!("due {}", self.formatted),
        }
    }
}

/// Pre-formatted row for one visible task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub due: Option<DueDateLabel>,
    /// e.g. `added 5/1 09:30`
    pub created: String,
}

/// Formats a due date relative to `today`.
pub fn format_due_date(date: NaiveDate, today: NaiveDate) -> DueDateLabel {
    DueDateLabel {
        formatted: date.format("%a, %b %-d").to_string(),
        relative: describe_relative_day(date, today),
    }
}

/// Describes how far `date` is from `today`, within one week.
pub fn describe_relative_day(date: NaiveDate, today: NaiveDate) -> Option<String> {
    let days = date.signed_duration_since(today).num_days();
    match days {
        0 => Some("today".to_string()),
        1 => Some("tomorrow".to_string()),
        -1 => Some("yesterday".to_string()),
        2..=7 => Some(format!("in {days} days")),
        -7..=-2 => Some(format!("{} days ago", -days)),
        _ => None,
    }
}

/// Formats a creation instant as `M/D HH:MM` (UTC).
pub fn format_created_at(instant: DateTime<Utc>) -> String {
    instant.format("%-m/%-d %H:%M").to_string()
}

/// Builds the paintable row for `task`.
pub fn task_row(task: &Task, today: NaiveDate) -> TaskRow {
    TaskRow {
        id: task.id.clone(),
        title: task.title.clone(),
        completed: task.completed,
        due: task.due_date.map(|date| format_due_date(date, today)),
        created: format!("added {}", format_created_at(task.created_at)),
    }
}
