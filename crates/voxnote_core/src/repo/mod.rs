//! Persistence hook and its SQLite adapter.
//!
//! # Responsibility
//! - Define the snapshot contract hosts implement to persist notes.
//! - Isolate SQLite query details from the store and services.
//!
//! # Invariants
//! - Repository writes validate every note before persistence.

pub mod note_repo;
