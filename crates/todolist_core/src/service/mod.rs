//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into menu-level views.
//! - Keep the menu decoupled from storage details.

pub mod task_service;
