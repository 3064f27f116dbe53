//! In-memory state owners backed by the store adapter.
//!
//! # Responsibility
//! - Own the canonical task collection and the active filter.
//! - Mirror every mutation to the store adapter before returning.
//!
//! # Invariants
//! - State is only mutated through the operations defined here.
//! - Persistence failures never undo or block an in-memory mutation.

pub mod filter_state;
pub mod task_repo;
