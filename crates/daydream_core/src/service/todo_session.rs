//! Task-list session and intent dispatcher.
//!
//! # Responsibility
//! - Load tasks and filter once at session start.
//! - Route each intent to the repository or filter state, then re-render.
//!
//! # Invariants
//! - Only `Intent::Create` can fail, and only with a validation error.
//! - Storage trouble never surfaces from `dispatch`.
//! - `ClearCompleted` with nothing completed is disabled: no mutation and
//!   no write.

use crate::config::CoreConfig;
use crate::model::filter::TaskFilter;
use crate::model::task::{TaskId, TaskValidationError};
use crate::repo::filter_state::FilterState;
use crate::repo::task_repo::TaskRepository;
use crate::storage::{KvBackend, StoreAdapter};
use crate::validation::parse_due_date;
use crate::view::{render, DisplayModel};
use log::{debug, info};

/// Result of dispatching one intent.
pub type IntentResult = Result<DisplayModel, TaskValidationError>;

/// User intents accepted by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add a task; `due_date` is raw `YYYY-MM-DD` text from the date input.
    Create {
        title: String,
        due_date: Option<String>,
    },
    Toggle(TaskId),
    Delete(TaskId),
    ClearCompleted,
    /// Select a view by raw token; unknown tokens select `all`.
    SetFilter(String),
}

impl Intent {
    /// Stable name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Toggle(_) => "toggle",
            Self::Delete(_) => "delete",
            Self::ClearCompleted => "clear_completed",
            Self::SetFilter(_) => "set_filter",
        }
    }
}

/// Explicit owner of all state for one run.
pub struct TodoSession<B: KvBackend> {
    store: StoreAdapter<B>,
    tasks: TaskRepository,
    filter: FilterState,
}

impl<B: KvBackend> TodoSession<B> {
    /// Starts a session over an already-probed adapter with default config.
    pub fn start(store: StoreAdapter<B>) -> Self {
        Self::start_with_config(store, &CoreConfig::default())
    }

    /// Probes `backend` under the configured keys and starts a session.
    pub fn open(backend: Option<B>, config: &CoreConfig) -> Self {
        let store = StoreAdapter::detect(backend, config.keys.clone());
        Self::start_with_config(store, config)
    }

    /// Starts a session, loading tasks and filter from `store`.
    pub fn start_with_config(store: StoreAdapter<B>, config: &CoreConfig) -> Self {
        let mut tasks = TaskRepository::new(config.placeholder_title.clone());
        tasks.load(&store);
        let filter = FilterState::load(&store);
        info!(
            "event=session_start module=service status=ok storage_available={} tasks={} filter={}",
            store.is_available(),
            tasks.len(),
            filter.current()
        );
        Self {
            store,
            tasks,
            filter,
        }
    }

    /// Applies one intent and returns the freshly rendered model.
    ///
    /// # Errors
    /// - `EmptyTitle` for a create intent with a blank title; state is left
    ///   unchanged.
    pub fn dispatch(&mut self, intent: Intent) -> IntentResult {
        debug!("event=intent_dispatch module=service intent={}", intent.name());
        match intent {
            Intent::Create { title, due_date } => self.create(&title, due_date.as_deref()),
            Intent::Toggle(id) => Ok(self.toggle(&id)),
            Intent::Delete(id) => Ok(self.delete(&id)),
            Intent::ClearCompleted => Ok(self.clear_completed()),
            Intent::SetFilter(token) => Ok(self.set_filter(&token)),
        }
    }

    /// Adds a task. An unparsable due date is dropped, not rejected.
    pub fn create(&mut self, title: &str, due_date: Option<&str>) -> IntentResult {
        let due_date = due_date.and_then(parse_due_date);
        self.tasks.create(&mut self.store, title, due_date)?;
        Ok(self.display_model())
    }

    pub fn toggle(&mut self, id: &str) -> DisplayModel {
        self.tasks.toggle_completion(&mut self.store, id);
        self.display_model()
    }

    pub fn delete(&mut self, id: &str) -> DisplayModel {
        self.tasks.delete(&mut self.store, id);
        self.display_model()
    }

    pub fn clear_completed(&mut self) -> DisplayModel {
        if !self.tasks.has_completed() {
            debug!("event=tasks_clear_completed module=service status=disabled");
            return self.display_model();
        }
        self.tasks.clear_completed(&mut self.store);
        self.display_model()
    }

    pub fn set_filter(&mut self, token: &str) -> DisplayModel {
        self.filter.set(&mut self.store, token);
        self.display_model()
    }

    /// Renders the current state.
    pub fn display_model(&self) -> DisplayModel {
        render(self.tasks.tasks(), self.filter.current())
    }

    pub fn tasks(&self) -> &TaskRepository {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter.current()
    }

    pub fn store(&self) -> &StoreAdapter<B> {
        &self.store
    }

    /// Ends the session, handing the adapter back (e.g. to reopen it).
    pub fn into_store(self) -> StoreAdapter<B> {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::{Intent, TodoSession};
    use crate::model::filter::TaskFilter;
    use crate::model::task::TaskValidationError;
    use crate::storage::{MemoryKvStore, StoreAdapter};

    fn session() -> TodoSession<MemoryKvStore> {
        TodoSession::start(StoreAdapter::open(MemoryKvStore::new()))
    }

    #[test]
    fn create_with_bad_date_keeps_task_without_date() {
        let mut session = session();
        let model = session
            .dispatch(Intent::Create {
                title: "Plan trip".to_string(),
                due_date: Some("soon".to_string()),
            })
            .unwrap();
        assert_eq!(model.visible_titles(), vec!["Plan trip"]);
        assert_eq!(model.visible_tasks[0].due_date, None);
    }

    #[test]
    fn blank_create_reports_validation_error() {
        let mut session = session();
        let err = session
            .dispatch(Intent::Create {
                title: "  ".to_string(),
                due_date: None,
            })
            .unwrap_err();
        assert_eq!(err, TaskValidationError::EmptyTitle);
        assert_eq!(session.display_model().total_count, 0);
    }

    #[test]
    fn disabled_clear_does_not_write() {
        let mut session = session();
        session.dispatch(Intent::ClearCompleted).unwrap();
        assert!(session.store().load_task_payload().is_none());
    }

    #[test]
    fn set_filter_intent_persists_coerced_token() {
        let mut session = session();
        let model = session
            .dispatch(Intent::SetFilter("completed".to_string()))
            .unwrap();
        assert_eq!(model.filter, TaskFilter::Completed);

        session
            .dispatch(Intent::SetFilter("bogus".to_string()))
            .unwrap();
        assert_eq!(session.filter(), TaskFilter::All);
        assert_eq!(session.store().load_filter_token().as_deref(), Some("all"));
    }

    #[test]
    fn intent_names_are_stable() {
        assert_eq!(Intent::ClearCompleted.name(), "clear_completed");
        assert_eq!(Intent::Toggle("x".into()).name(), "toggle");
    }
}
