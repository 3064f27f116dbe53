//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical persisted task record.
//! - Provide the single mutation helper (`toggle`) the lifecycle allows.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty after trimming.
//! - `title`, `due_date` and `created_at` are immutable after creation.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Freshly created tasks use UUID v4 text, but persisted ids from older
/// payloads are kept verbatim, so no format is assumed.
pub type TaskId = String;

/// Generates a fresh task identifier.
pub fn new_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}

/// Current instant truncated to milliseconds, the precision stored on disk.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Validation failures raised while creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Calendar date without a time component.
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates an incomplete task with a generated id, stamped with now.
    ///
    /// The title is trimmed before it is stored.
    ///
    /// # Errors
    /// - Returns `EmptyTitle` when the trimmed title is empty.
    pub fn new(title: &str, due_date: Option<NaiveDate>) -> Result<Self, TaskValidationError> {
        let title = crate::validation::validate_title(title)?;
        Ok(Self {
            id: new_task_id(),
            title,
            due_date,
            completed: false,
            created_at: now_millis(),
        })
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Returns whether this task still needs doing.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}
