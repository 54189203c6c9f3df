//! Edit coordination for mutations that span more than one note field.
//!
//! # Responsibility
//! - Keep the title and the summary heading in sync on every rename.
//!
//! # Invariants
//! - Renames never assign `Note::title` directly; they go through `title_sync`.

pub mod title_sync;
