//! Flutter bridge for VoxNote core.

pub mod api;
