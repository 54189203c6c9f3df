//! Read-only views computed from a note snapshot.
//!
//! # Responsibility
//! - Produce recency, folder and tag views for presentation layers.
//!
//! # Invariants
//! - Every function is pure and total: no errors, no side effects, and a
//!   missing folder or tag simply yields an empty result.
//! - Outputs borrow from the input slice and keep its relative order unless
//!   a function documents a different ordering.

pub mod folders;
pub mod recent;
pub mod tags;
