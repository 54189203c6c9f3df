//! Core domain logic for VoxNote.
//! This crate is the single source of truth for note invariants.

pub mod collab;
pub mod db;
pub mod derive;
pub mod edit;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use collab::{
    CollabError, CollabResult, IdentityProvider, RecordingCollaborator, RecordingOutcome,
    SummaryProvider, SummaryRequest, TranscriptEdit, TranscriptListener,
};
pub use derive::folders::{
    category_overview, default_folder_layout, folder_count, notes_in_folder, CategoryExpansion,
    FolderCategory,
};
pub use derive::recent::{recent_notes, DEFAULT_RECENT_LIMIT};
pub use derive::tags::{popular_tags, TagCount, POPULAR_TAGS_LIMIT};
pub use edit::title_sync::{heading_title, rename_title, TitleEdit};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use model::patch::NotePatch;
pub use model::user::{User, UserPatch, UserValidationError};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use search::query::{search, search_notes, SearchQuery};
pub use service::note_service::{NoteService, NoteServiceError, NoteServiceResult};
pub use service::session_service::{SessionError, SessionService};
pub use store::note_store::{DeleteToken, NoteStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
