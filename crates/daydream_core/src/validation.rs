//! Input guards and tolerant decoding of persisted task records.
//!
//! # Responsibility
//! - Validate titles before a task is created.
//! - Turn any persisted JSON shape into either a valid `Task` or a drop
//!   decision, never an error.
//!
//! # Invariants
//! - `decode_task_record` is total: it never panics and never returns a task
//!   with an empty id or an empty title.
//! - Date parsing failures are absorbed as "no date".

use crate::model::task::{new_task_id, Task, TaskValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde_json::{Map, Value};

/// Wire format for calendar dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Trims a title and rejects it when nothing is left.
///
/// # Errors
/// - Returns `EmptyTitle` for empty or whitespace-only input.
pub fn validate_title(raw: &str) -> Result<String, TaskValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
///
/// Empty and unparsable input both yield `None`.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!("event=due_date_parse module=validation status=skipped error={err}");
            None
        }
    }
}

/// Parses an RFC 3339 instant into UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

/// Normalizes a persisted `completed` value of any shape into a bool.
///
/// - booleans pass through
/// - numbers: `0` is false, everything else true
/// - strings: `true|1|yes` are true, `false|0|no|""` false (trimmed,
///   case-insensitive); other text falls through to truthiness
/// - anything else uses generic truthiness
pub fn normalize_completed(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" | "" => false,
            _ => is_truthy(value),
        },
        other => is_truthy(other),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reconciles one persisted record into a task.
///
/// Returns `None` when `record` is not a JSON object; every other defect is
/// repaired field by field:
/// - missing, non-text or empty `id` -> fresh id
/// - non-text or blank `title` -> `placeholder_title`
/// - `completed` -> [`normalize_completed`], missing means `false`
/// - missing or unparsable `dueDate` -> no date
/// - missing or unparsable `createdAt` -> `now`
pub fn decode_task_record(
    record: &Value,
    placeholder_title: &str,
    now: DateTime<Utc>,
) -> Option<Task> {
    let fields = record.as_object()?;

    let id = non_empty_str(fields, "id")
        .map(str::to_string)
        .unwrap_or_else(new_task_id);
    let title = match fields.get("title").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => placeholder_title.to_string(),
    };
    let completed = fields.get("completed").is_some_and(normalize_completed);
    let due_date = non_empty_str(fields, "dueDate").and_then(parse_due_date);
    let created_at = non_empty_str(fields, "createdAt")
        .and_then(parse_instant)
        .unwrap_or(now);

    Some(Task {
        id,
        title,
        due_date,
        completed,
        created_at,
    })
}

fn non_empty_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
