//! Task list domain model.
//!
//! # Responsibility
//! - Define the task value and the owned list state shared by every front-end.
//! - Keep mutation rules free of storage concerns.
//!
//! # Invariants
//! - Task identity is positional: index in the list, no stable ID.
//! - At most one edit session exists at a time.

pub mod task;
pub mod task_list;
