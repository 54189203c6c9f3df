//! Session-scoped note storage.
//!
//! # Responsibility
//! - Hold the single source of truth for the note collection.
//! - Expose the serialization boundary (`snapshot`/`bulk_load`) used by
//!   persistence adapters.

pub mod note_store;
