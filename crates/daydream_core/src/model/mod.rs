//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record and the view filter enumeration.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` that is never reused.
//! - Title and due date never change after creation.

pub mod filter;
pub mod task;
