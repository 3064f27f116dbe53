//! Capability-checked store adapter.
//!
//! # Responsibility
//! - Probe the backend once and remember whether it is usable.
//! - Serialize tasks and the filter token under their logical keys.
//! - Absorb every backend and decoding failure into logs.
//!
//! # Invariants
//! - When unavailable, reads return `None` and writes return `Skipped`
//!   without touching the backend.
//! - A failed call never changes availability; the next call is attempted
//!   fresh.

use super::{KvBackend, StorageResult};
use crate::config::StorageKeys;
use crate::model::filter::TaskFilter;
use crate::model::task::Task;
use log::{debug, warn};
use serde_json::Value;

/// Result of one best-effort write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Backend accepted the write.
    Persisted,
    /// Storage is unavailable for this session; nothing was attempted.
    Skipped,
    /// Backend rejected this write; in-memory state stays authoritative.
    Failed,
}

impl PersistOutcome {
    pub fn is_persisted(self) -> bool {
        matches!(self, Self::Persisted)
    }
}

/// Persistence boundary between session state and a key-value backend.
pub struct StoreAdapter<B: KvBackend> {
    backend: Option<B>,
    available: bool,
    keys: StorageKeys,
}

impl<B: KvBackend> StoreAdapter<B> {
    /// Wraps `backend` with default keys, probing it once.
    pub fn open(backend: B) -> Self {
        Self::detect(Some(backend), StorageKeys::default())
    }

    /// Builds an adapter for an environment without any storage.
    pub fn unavailable() -> Self {
        Self::detect(None, StorageKeys::default())
    }

    /// Probes `backend` with a write-then-delete round trip on the probe key.
    ///
    /// A missing backend or a failed probe marks the adapter unavailable for
    /// its whole lifetime.
    pub fn detect(backend: Option<B>, keys: StorageKeys) -> Self {
        let mut adapter = Self {
            backend,
            available: false,
            keys,
        };
        adapter.available = match adapter.backend.as_mut() {
            Some(backend) => probe(backend, &adapter.keys.probe),
            None => {
                warn!("event=storage_probe module=storage status=error error_code=storage_missing");
                false
            }
        };
        adapter
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Borrows the wrapped backend, if one was supplied.
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Releases the wrapped backend.
    pub fn into_backend(self) -> Option<B> {
        self.backend
    }

    /// Reads raw bytes; absent when unavailable, missing or failed.
    pub fn try_read(&self, key: &str) -> Option<Vec<u8>> {
        if !self.available {
            return None;
        }
        let backend = self.backend.as_ref()?;
        match backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("event=storage_read module=storage status=error key={key} error={err}");
                None
            }
        }
    }

    /// Writes raw bytes without ever failing the caller.
    pub fn try_write(&mut self, key: &str, value: &[u8]) -> PersistOutcome {
        if !self.available {
            return PersistOutcome::Skipped;
        }
        let Some(backend) = self.backend.as_mut() else {
            return PersistOutcome::Skipped;
        };
        match backend.set(key, value) {
            Ok(()) => {
                debug!(
                    "event=storage_write module=storage status=ok key={key} bytes={}",
                    value.len()
                );
                PersistOutcome::Persisted
            }
            Err(err) => {
                warn!("event=storage_write module=storage status=error key={key} error={err}");
                PersistOutcome::Failed
            }
        }
    }

    /// Reads and parses the stored task payload as generic JSON.
    ///
    /// Malformed JSON is logged and reported as absent.
    pub fn load_task_payload(&self) -> Option<Value> {
        let key = self.keys.tasks.as_str();
        let raw = self.try_read(key)?;
        match serde_json::from_slice(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=storage_decode module=storage status=error key={key} error_code=malformed_payload error={err}"
                );
                None
            }
        }
    }

    /// Serializes the full collection under the tasks key.
    pub fn save_tasks(&mut self, tasks: &[Task]) -> PersistOutcome {
        match serde_json::to_vec(tasks) {
            Ok(bytes) => {
                let key = self.keys.tasks.clone();
                self.try_write(&key, &bytes)
            }
            Err(err) => {
                warn!("event=storage_encode module=storage status=error error={err}");
                PersistOutcome::Failed
            }
        }
    }

    /// Reads the stored filter token verbatim; non-UTF-8 data is absent.
    pub fn load_filter_token(&self) -> Option<String> {
        let raw = self.try_read(&self.keys.filter)?;
        String::from_utf8(raw).ok()
    }

    /// Stores the filter as its bare token.
    pub fn save_filter(&mut self, filter: TaskFilter) -> PersistOutcome {
        let key = self.keys.filter.clone();
        self.try_write(&key, filter.as_str().as_bytes())
    }
}

fn probe<B: KvBackend>(backend: &mut B, key: &str) -> bool {
    let result: StorageResult<()> = backend
        .set(key, key.as_bytes())
        .and_then(|()| backend.remove(key));
    match result {
        Ok(()) => {
            debug!("event=storage_probe module=storage status=ok");
            true
        }
        Err(err) => {
            warn!(
                "event=storage_probe module=storage status=error error_code=storage_unavailable error={err}"
            );
            false
        }
    }
}
