//! Task collection owner.
//!
//! # Responsibility
//! - Create, toggle, delete and bulk-clear tasks.
//! - Reconcile the persisted payload into a valid collection at startup.
//! - Answer filtered-view and counter queries.
//!
//! # Invariants
//! - Ids are unique within the collection.
//! - New tasks are prepended; no other reordering happens.
//! - Every mutating call writes the full collection through the adapter.

use crate::config::DEFAULT_PLACEHOLDER_TITLE;
use crate::model::filter::TaskFilter;
use crate::model::task::{new_task_id, now_millis, Task, TaskValidationError};
use crate::storage::{KvBackend, PersistOutcome, StoreAdapter};
use crate::validation::decode_task_record;
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Aggregate counters over the full collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Owner of the ordered task collection.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    tasks: Vec<Task>,
    placeholder_title: String,
}

impl Default for TaskRepository {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_TITLE)
    }
}

impl TaskRepository {
    /// Creates an empty repository.
    ///
    /// `placeholder_title` replaces unreadable titles during [`Self::load`].
    pub fn new(placeholder_title: impl Into<String>) -> Self {
        Self {
            tasks: Vec::new(),
            placeholder_title: placeholder_title.into(),
        }
    }

    /// Replaces the collection with whatever the store holds.
    ///
    /// Absent, malformed or non-array payloads yield an empty collection.
    pub fn load<B: KvBackend>(&mut self, store: &StoreAdapter<B>) -> usize {
        let payload = store.load_task_payload();
        self.tasks = decode_collection(payload.as_ref(), &self.placeholder_title, now_millis());
        info!(
            "event=tasks_load module=repo status=ok count={}",
            self.tasks.len()
        );
        self.tasks.len()
    }

    /// Validates and prepends a new task, then persists.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty; nothing changes and
    ///   nothing is written.
    pub fn create<B: KvBackend>(
        &mut self,
        store: &mut StoreAdapter<B>,
        title: &str,
        due_date: Option<NaiveDate>,
    ) -> Result<&Task, TaskValidationError> {
        let mut task = match Task::new(title, due_date) {
            Ok(task) => task,
            Err(err) => {
                warn!("event=task_create module=repo status=rejected error={err}");
                return Err(err);
            }
        };
        while self.contains(&task.id) {
            task.id = new_task_id();
        }

        info!(
            "event=task_create module=repo status=ok task_id={} has_due_date={}",
            task.id,
            task.due_date.is_some()
        );
        self.tasks.insert(0, task);
        self.persist(store);
        Ok(&self.tasks[0])
    }

    /// Flips completion of `id` and persists.
    ///
    /// Returns the new completion state, or `None` for an unknown id.
    pub fn toggle_completion<B: KvBackend>(
        &mut self,
        store: &mut StoreAdapter<B>,
        id: &str,
    ) -> Option<bool> {
        let toggled = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .map(Task::toggle);
        match toggled {
            Some(completed) => info!(
                "event=task_toggle module=repo status=ok task_id={id} completed={completed}"
            ),
            None => info!("event=task_toggle module=repo status=skipped task_id={id}"),
        }
        self.persist(store);
        toggled
    }

    /// Removes `id` and persists. Returns whether a task was removed.
    pub fn delete<B: KvBackend>(&mut self, store: &mut StoreAdapter<B>, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        info!(
            "event=task_delete module=repo status={} task_id={id}",
            if removed { "ok" } else { "skipped" }
        );
        self.persist(store);
        removed
    }

    /// Keeps only incomplete tasks and persists. Returns how many were removed.
    pub fn clear_completed<B: KvBackend>(&mut self, store: &mut StoreAdapter<B>) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_active);
        let removed = before - self.tasks.len();
        info!("event=tasks_clear_completed module=repo status=ok removed={removed}");
        self.persist(store);
        removed
    }

    /// Writes the full collection through the adapter.
    pub fn persist<B: KvBackend>(&self, store: &mut StoreAdapter<B>) -> PersistOutcome {
        store.save_tasks(&self.tasks)
    }

    /// Tasks in display order (most recent first).
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks visible under `filter`, in collection order.
    pub fn filtered(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    pub fn counts(&self) -> TaskCounts {
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        TaskCounts {
            total: self.tasks.len(),
            active: self.tasks.len() - completed,
            completed,
        }
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|task| task.completed)
    }
}

/// Reconciles a persisted payload into a valid, id-unique collection.
///
/// Non-object records are dropped. A record whose id repeats an earlier one
/// keeps its data but receives a fresh id.
pub fn decode_collection(
    payload: Option<&Value>,
    placeholder_title: &str,
    now: DateTime<Utc>,
) -> Vec<Task> {
    let records = match payload {
        None => return Vec::new(),
        Some(Value::Array(records)) => records,
        Some(_) => {
            warn!("event=tasks_load module=repo status=error error_code=payload_not_array");
            return Vec::new();
        }
    };

    let mut seen = HashSet::with_capacity(records.len());
    let mut tasks = Vec::with_capacity(records.len());
    for record in records {
        let Some(mut task) = decode_task_record(record, placeholder_title, now) else {
            warn!("event=task_decode module=repo status=skipped error_code=record_not_object");
            continue;
        };
        while !seen.insert(task.id.clone()) {
            warn!(
                "event=task_decode module=repo status=repaired error_code=duplicate_id task_id={}",
                task.id
            );
            task.id = new_task_id();
        }
        tasks.push(task);
    }
    tasks
}
