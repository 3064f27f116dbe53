//! Core configuration values.
//!
//! # Responsibility
//! - Name the logical storage keys used by the store adapter.
//! - Carry the fixed fallback values used while reconciling persisted data.
//!
//! # Invariants
//! - The probe key never collides with the tasks or filter key.

/// Default storage key for the serialized task collection.
pub const DEFAULT_TASKS_KEY: &str = "daydream-tasks";
/// Default storage key for the active filter token.
pub const DEFAULT_FILTER_KEY: &str = "daydream-tasks-filter";
/// Default private key used by the availability probe.
pub const DEFAULT_PROBE_KEY: &str = "__daydream-storage-test__";
/// Title given to persisted records whose title is missing or not text.
pub const DEFAULT_PLACEHOLDER_TITLE: &str = "Untitled task";

/// Logical keys the store adapter reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub tasks: String,
    pub filter: String,
    pub probe: String,
}

impl StorageKeys {
    /// Builds a key set where every key shares one namespace prefix.
    ///
    /// `StorageKeys::namespaced("work")` yields `work-tasks`,
    /// `work-tasks-filter` and `__work-storage-test__`.
    pub fn namespaced(prefix: &str) -> Self {
        let prefix = prefix.trim();
        Self {
            tasks: format!("{prefix}-tasks"),
            filter: format!("{prefix}-tasks-filter"),
            probe: format!("__{prefix}-storage-test__"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            tasks: DEFAULT_TASKS_KEY.to_string(),
            filter: DEFAULT_FILTER_KEY.to_string(),
            probe: DEFAULT_PROBE_KEY.to_string(),
        }
    }
}

/// Session-wide configuration for the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub keys: StorageKeys,
    /// Replacement for non-text titles found in persisted records.
    pub placeholder_title: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            placeholder_title: DEFAULT_PLACEHOLDER_TITLE.to_string(),
        }
    }
}
