//! Domain model for the task list.
//!
//! # Invariants
//! - Every task is identified by a storage-assigned `TaskId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod task;
