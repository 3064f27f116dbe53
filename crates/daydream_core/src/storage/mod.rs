//! Persistence boundary for the task list.
//!
//! # Responsibility
//! - Define the byte-oriented key-value backend contract.
//! - Provide in-memory and SQLite backends.
//! - Wrap a backend in a capability-checked adapter that never fails the
//!   caller.
//!
//! # Invariants
//! - Backend errors stay inside this module; callers see `PersistOutcome` or
//!   absent values.
//! - Availability is decided once per adapter and never re-checked.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod adapter;
mod memory;
mod sqlite;

pub use adapter::{PersistOutcome, StoreAdapter};
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Per-call failure reported by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Write would grow the store beyond its byte quota.
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
    },
    /// Backend refused the operation for another reason.
    Rejected(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::QuotaExceeded {
                key,
                required,
                quota,
            } => write!(
                f,
                "writing `{key}` needs {required} bytes but the store quota is {quota}"
            ),
            Self::Rejected(reason) => write!(f, "storage rejected operation: {reason}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Rejected(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Fallible byte-string key-value storage.
pub trait KvBackend {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<B: KvBackend + ?Sized> KvBackend for &mut B {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
