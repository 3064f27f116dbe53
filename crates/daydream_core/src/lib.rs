//! Core state management for the Daydream task list.
//! This crate owns the task collection, its persistence and the derived view.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod validation;
pub mod view;

pub use config::{CoreConfig, StorageKeys};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::filter::TaskFilter;
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::filter_state::FilterState;
pub use repo::task_repo::{TaskCounts, TaskRepository};
pub use service::todo_session::{Intent, IntentResult, TodoSession};
pub use storage::{
    KvBackend, MemoryKvStore, PersistOutcome, SqliteKvStore, StorageError, StorageResult,
    StoreAdapter,
};
pub use view::{render, DisplayModel, EmptyState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
