//! Note search entry points.
//!
//! # Responsibility
//! - Filter note snapshots by case-folded substring queries.
//! - Keep search result shaping inside core.

pub mod query;
