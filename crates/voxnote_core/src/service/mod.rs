//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate the store and collaborators into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod note_service;
pub mod session_service;
