//! Core use-case services.
//!
//! # Responsibility
//! - Pair list mutations with snapshot persistence.
//! - Keep FFI and CLI front-ends decoupled from storage details.

pub mod task_store;
