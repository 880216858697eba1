//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the to-do board use-cases.
//! - Keep the HTTP layer decoupled from storage details.

pub mod todo_service;
