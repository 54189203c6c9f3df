//! Domain model for captured notes and the session owner.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep field-level invariants next to the data they guard.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is terminal; there is no tombstone or undo state.

pub mod note;
pub mod patch;
pub mod user;
