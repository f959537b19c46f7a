//! Persistence adapter: key-value storage and the task snapshot on top of it.
//!
//! # Responsibility
//! - Define storage contracts used by the task store service.
//! - Isolate SQLite and JSON details from the list state machine.
//!
//! # Invariants
//! - Only serialized copies of the task list cross this boundary.
//! - A key that was never written reads as absent, not as an error.

pub mod kv_repo;
pub mod snapshot_repo;
