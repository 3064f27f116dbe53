//! Session-level use cases.
//!
//! # Responsibility
//! - Own all task-list state for one run behind an explicit object.
//! - Expose the closed set of user intents to any presentation surface.
//!
//! # Invariants
//! - Each intent runs to completion (mutate, persist, render) before the
//!   next one is accepted.

pub mod todo_session;
