//! Display model derivation.
//!
//! # Responsibility
//! - Derive everything a presentation surface paints from current state.
//!
//! # Invariants
//! - `render` is a total, pure function of `(tasks, filter)`; it is
//!   recomputed after every mutation instead of being patched.
//! - Counters and empty-state wording look at the full collection, never at
//!   the filtered view.

pub mod format;

use crate::model::filter::TaskFilter;
use crate::model::task::Task;

/// Empty-state text when the collection has no tasks at all.
pub const EMPTY_NO_TASKS_MESSAGE: &str = "No tasks yet. Add one to get started.";
/// Empty-state text when tasks exist but none match the filter.
pub const EMPTY_NO_MATCHES_MESSAGE: &str = "No tasks match this filter. Try another view.";

const CLEAR_ENABLED_HINT: &str = "Clear all completed tasks";
const CLEAR_DISABLED_HINT: &str = "No completed tasks to clear";

/// Which empty-state wording applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoTasks,
    NoMatches,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoTasks => EMPTY_NO_TASKS_MESSAGE,
            Self::NoMatches => EMPTY_NO_MATCHES_MESSAGE,
        }
    }
}

/// Everything needed to paint the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub filter: TaskFilter,
    /// Tasks passing `filter`, in collection order.
    pub visible_tasks: Vec<Task>,
    pub total_count: usize,
    /// Incomplete tasks across the full collection.
    pub active_count: usize,
    pub completed_count: usize,
    pub empty_state_visible: bool,
    pub empty_state: EmptyState,
    pub clear_button_enabled: bool,
}

impl DisplayModel {
    pub fn empty_state_message(&self) -> &'static str {
        self.empty_state.message()
    }

    /// One-line summary, e.g. `3 total · 2 active (Active: 2 shown)`.
    pub fn counter_label(&self) -> String {
        format!(
            "{} total · {} active ({}: {} shown)",
            self.total_count,
            self.active_count,
            self.filter.label(),
            self.visible_tasks.len()
        )
    }

    /// Tooltip-style hint for the clear-completed control.
    pub fn clear_button_hint(&self) -> &'static str {
        if self.clear_button_enabled {
            CLEAR_ENABLED_HINT
        } else {
            CLEAR_DISABLED_HINT
        }
    }

    pub fn visible_titles(&self) -> Vec<&str> {
        self.visible_tasks
            .iter()
            .map(|task| task.title.as_str())
            .collect()
    }
}

/// Derives the display model from the full collection and active filter.
pub fn render(tasks: &[Task], filter: TaskFilter) -> DisplayModel {
    let visible_tasks: Vec<Task> = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect();
    let completed_count = tasks.iter().filter(|task| task.completed).count();

    DisplayModel {
        filter,
        empty_state_visible: visible_tasks.is_empty(),
        empty_state: if tasks.is_empty() {
            EmptyState::NoTasks
        } else {
            EmptyState::NoMatches
        },
        visible_tasks,
        total_count: tasks.len(),
        active_count: tasks.len() - completed_count,
        completed_count,
        clear_button_enabled: completed_count > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{render, EmptyState, EMPTY_NO_MATCHES_MESSAGE, EMPTY_NO_TASKS_MESSAGE};
    use crate::model::filter::TaskFilter;
    use crate::model::task::Task;

    fn tasks(rows: &[(&str, bool)]) -> Vec<Task> {
        rows.iter()
            .map(|(title, completed)| {
                let mut task = Task::new(title, None).unwrap();
                task.completed = *completed;
                task
            })
            .collect()
    }

    #[test]
    fn empty_collection_uses_no_tasks_message() {
        let model = render(&[], TaskFilter::Completed);
        assert!(model.empty_state_visible);
        assert_eq!(model.empty_state, EmptyState::NoTasks);
        assert_eq!(model.empty_state_message(), EMPTY_NO_TASKS_MESSAGE);
        assert!(!model.clear_button_enabled);
    }

    #[test]
    fn filtered_out_collection_uses_no_matches_message() {
        let model = render(&tasks(&[("a", false)]), TaskFilter::Completed);
        assert!(model.empty_state_visible);
        assert_eq!(model.empty_state_message(), EMPTY_NO_MATCHES_MESSAGE);
        assert_eq!(model.total_count, 1);
        assert_eq!(model.active_count, 1);
    }

    #[test]
    fn counters_ignore_the_filter() {
        let all = tasks(&[("a", true), ("b", false), ("c", true)]);
        let model = render(&all, TaskFilter::Active);

        assert_eq!(model.visible_titles(), vec!["b"]);
        assert_eq!(model.total_count, 3);
        assert_eq!(model.active_count, 1);
        assert_eq!(model.completed_count, 2);
        assert!(model.clear_button_enabled);
        assert!(!model.empty_state_visible);
        assert_eq!(model.counter_label(), "3 total · 1 active (Active: 1 shown)");
    }

    #[test]
    fn all_filter_preserves_order() {
        let all = tasks(&[("x", true), ("y", false), ("z", false)]);
        let model = render(&all, TaskFilter::All);
        assert_eq!(model.visible_titles(), vec!["x", "y", "z"]);
        assert_eq!(model.clear_button_hint(), "Clear all completed tasks");
    }

    #[test]
    fn render_is_idempotent() {
        let all = tasks(&[("a", true), ("b", false)]);
        assert_eq!(render(&all, TaskFilter::All), render(&all, TaskFilter::All));
    }
}
