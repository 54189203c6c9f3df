//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level note functions to Dart via FRB.
//! - Own the process-wide note service behind a mutex.
//! - Keep error semantics simple: envelopes with `ok` and a message.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Ids and delete tokens cross the boundary as UUID strings.
//! - Every store access is serialized through one lock.

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use uuid::Uuid;
use voxnote_core::db::open_db;
use voxnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    popular_tags as popular_tags_inner, recent_notes, search_notes, DeleteToken, Note, NoteId,
    NoteService, RecordingOutcome, SearchQuery, SqliteNoteRepository, DEFAULT_RECENT_LIMIT,
    POPULAR_TAGS_LIMIT,
};

const NOTES_DB_FILE_NAME: &str = "voxnote_notes.sqlite3";
const LIST_LIMIT_MAX: u32 = 100;
static NOTES_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static NOTE_SERVICE: OnceLock<Mutex<NoteService>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Note projection handed to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    /// Markdown summary.
    pub summary: String,
    pub tags: Vec<String>,
    pub folder: Option<String>,
    pub date_epoch_ms: i64,
    pub transcript: Option<String>,
    pub duration_seconds: Option<u32>,
}

/// Generic action response envelope for note commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Note touched by the command, when it still exists.
    pub note: Option<NoteItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note: Option<NoteItem>) -> Self {
        Self {
            ok: true,
            note,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note: None,
            message: message.into(),
        }
    }
}

/// List response envelope for read views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    pub items: Vec<NoteItem>,
    pub message: String,
}

/// Response for the first step of a confirmed delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequestResponse {
    pub ok: bool,
    /// Token to pass to `note_confirm_delete` or `note_cancel_delete`.
    pub token: Option<String>,
    pub message: String,
}

/// Tag chip with its usage count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCountItem {
    pub tag: String,
    pub count: u32,
}

/// Creates a note from a finished recording and host-generated summary.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create_from_recording(
    transcript: String,
    duration_seconds: u32,
    summary: String,
) -> NoteActionResponse {
    let outcome = RecordingOutcome {
        transcript,
        duration_seconds,
    };
    let mut service = lock_service();
    match service
        .create_from_recording(outcome, summary)
        .map(to_note_item)
    {
        Ok(note) => NoteActionResponse::success("Note created.", Some(note)),
        Err(err) => NoteActionResponse::failure(format!("note_create failed: {err}")),
    }
}

/// Renames a note and keeps its summary heading in sync.
#[flutter_rust_bridge::frb(sync)]
pub fn note_rename(note_id: String, title: String) -> NoteActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => return NoteActionResponse::failure(message),
    };
    let mut service = lock_service();
    match service.store_mut().rename_title(id, &title).map(to_note_item) {
        Ok(note) => NoteActionResponse::success("Note renamed.", Some(note)),
        Err(err) => NoteActionResponse::failure(format!("note_rename failed: {err}")),
    }
}

/// Adds a tag. Adding an existing tag succeeds without change.
#[flutter_rust_bridge::frb(sync)]
pub fn note_add_tag(note_id: String, tag: String) -> NoteActionResponse {
    edit_tags(&note_id, "note_add_tag", |service, id| {
        service.store_mut().add_tag(id, &tag)
    })
}

/// Removes a tag. Removing an absent tag succeeds without change.
#[flutter_rust_bridge::frb(sync)]
pub fn note_remove_tag(note_id: String, tag: String) -> NoteActionResponse {
    edit_tags(&note_id, "note_remove_tag", |service, id| {
        service.store_mut().remove_tag(id, &tag)
    })
}

/// Moves a note into `folder`; `None` or blank removes it from its folder.
#[flutter_rust_bridge::frb(sync)]
pub fn note_move_to_folder(note_id: String, folder: Option<String>) -> NoteActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => return NoteActionResponse::failure(message),
    };
    let mut service = lock_service();
    match service.store_mut().move_to_folder(id, folder).map(to_note_item) {
        Ok(note) => NoteActionResponse::success("Note moved.", Some(note)),
        Err(err) => NoteActionResponse::failure(format!("note_move_to_folder failed: {err}")),
    }
}

/// Stores a regenerated summary produced by the host summarizer.
#[flutter_rust_bridge::frb(sync)]
pub fn note_apply_summary(note_id: String, summary: String) -> NoteActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => return NoteActionResponse::failure(message),
    };
    let mut service = lock_service();
    match service.store_mut().apply_summary(id, &summary).map(to_note_item) {
        Ok(note) => NoteActionResponse::success("Summary updated.", Some(note)),
        Err(err) => NoteActionResponse::failure(format!("note_apply_summary failed: {err}")),
    }
}

/// Looks up a single note.
#[flutter_rust_bridge::frb(sync)]
pub fn note_get(note_id: String) -> Option<NoteItem> {
    let id = parse_note_id(&note_id).ok()?;
    let service = lock_service();
    service.store().get(id).map(to_note_item)
}

/// First step of delete: issues a token, the note stays in place.
#[flutter_rust_bridge::frb(sync)]
pub fn note_request_delete(note_id: String) -> DeleteRequestResponse {
    let failure = |message: String| DeleteRequestResponse {
        ok: false,
        token: None,
        message,
    };
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(message) => return failure(message),
    };
    match lock_service().store_mut().request_delete(id) {
        Ok(token) => DeleteRequestResponse {
            ok: true,
            token: Some(token.to_string()),
            message: "Confirm to delete.".to_string(),
        },
        Err(err) => failure(format!("note_request_delete failed: {err}")),
    }
}

/// Second step of delete: removes the note the token was issued for.
#[flutter_rust_bridge::frb(sync)]
pub fn note_confirm_delete(token: String) -> NoteActionResponse {
    let token = match parse_delete_token(&token) {
        Ok(token) => token,
        Err(message) => return NoteActionResponse::failure(message),
    };
    match lock_service().store_mut().confirm_delete(token) {
        Ok(_) => NoteActionResponse::success("Note deleted.", None),
        Err(err) => NoteActionResponse::failure(format!("note_confirm_delete failed: {err}")),
    }
}

/// Drops a pending delete. Returns whether the token was pending.
#[flutter_rust_bridge::frb(sync)]
pub fn note_cancel_delete(token: String) -> bool {
    match parse_delete_token(&token) {
        Ok(token) => lock_service().store_mut().cancel_delete(token),
        Err(_) => false,
    }
}

/// All notes in storage order, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NoteListResponse {
    let service = lock_service();
    to_list_response(service.store().list().iter())
}

/// Most recent notes for the home screen.
///
/// `limit=None` or `Some(0)` uses the default of 3.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_recent(limit: Option<u32>) -> NoteListResponse {
    let limit = normalize_limit(limit, DEFAULT_RECENT_LIMIT);
    let service = lock_service();
    to_list_response(recent_notes(service.store().list(), limit).into_iter())
}

/// Case-insensitive search, optionally scoped to one folder.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_search(text: String, folder: Option<String>) -> NoteListResponse {
    let mut query = SearchQuery::new(text);
    if let Some(folder) = folder.filter(|value| !value.trim().is_empty()) {
        query = query.in_folder(folder);
    }
    let service = lock_service();
    to_list_response(search_notes(service.store().list(), &query).into_iter())
}

/// Number of notes in `folder` (exact match).
#[flutter_rust_bridge::frb(sync)]
pub fn folder_count(folder: String) -> u32 {
    let service = lock_service();
    to_u32(voxnote_core::folder_count(service.store().list(), &folder))
}

/// Notes in `folder`, in storage order.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_in_folder(folder: String) -> NoteListResponse {
    let service = lock_service();
    to_list_response(voxnote_core::notes_in_folder(service.store().list(), &folder).into_iter())
}

/// Most used tags. `limit=None` or `Some(0)` uses the default of 5.
#[flutter_rust_bridge::frb(sync)]
pub fn popular_tags(limit: Option<u32>) -> Vec<TagCountItem> {
    let limit = normalize_limit(limit, POPULAR_TAGS_LIMIT);
    let service = lock_service();
    popular_tags_inner(service.store().list(), limit)
        .into_iter()
        .map(|entry| TagCountItem {
            tag: entry.tag.to_string(),
            count: to_u32(entry.count),
        })
        .collect()
}

/// Writes the current notes to the SQLite snapshot.
///
/// The database path comes from `VOXNOTE_DB_PATH`, or a file in the temp dir.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_save() -> NoteActionResponse {
    let service = lock_service();
    match save_to_path(&*service, &resolve_notes_db_path()) {
        Ok(count) => NoteActionResponse::success(format!("Saved {count} note(s)."), None),
        Err(message) => NoteActionResponse::failure(message),
    }
}

/// Replaces the in-memory notes with the SQLite snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_load() -> NoteActionResponse {
    let mut service = lock_service();
    match load_from_path(&mut *service, &resolve_notes_db_path()) {
        Ok(count) => NoteActionResponse::success(format!("Loaded {count} note(s)."), None),
        Err(message) => NoteActionResponse::failure(message),
    }
}

fn lock_service() -> MutexGuard<'static, NoteService> {
    NOTE_SERVICE
        .get_or_init(|| Mutex::new(NoteService::default()))
        .lock()
        .unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("event=ffi_lock module=ffi status=recovered reason=poisoned");
            poisoned.into_inner()
        })
}

fn edit_tags(
    note_id: &str,
    operation: &str,
    edit: impl FnOnce(&mut NoteService, NoteId) -> voxnote_core::StoreResult<bool>,
) -> NoteActionResponse {
    let id = match parse_note_id(note_id) {
        Ok(id) => id,
        Err(message) => return NoteActionResponse::failure(message),
    };
    let mut service = lock_service();
    match edit(&mut *service, id) {
        Ok(changed) => {
            let message = if changed { "Tags updated." } else { "Tags unchanged." };
            NoteActionResponse::success(message, service.store().get(id).map(to_note_item))
        }
        Err(err) => NoteActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn save_to_path(service: &NoteService, path: &Path) -> Result<usize, String> {
    let mut conn = open_db(path).map_err(|err| format!("notes DB open failed: {err}"))?;
    let mut repo = SqliteNoteRepository::try_new(&mut conn)
        .map_err(|err| format!("notes repo init failed: {err}"))?;
    service
        .save_to(&mut repo)
        .map_err(|err| format!("notes_save failed: {err}"))?;
    Ok(service.store().len())
}

fn load_from_path(service: &mut NoteService, path: &Path) -> Result<usize, String> {
    let mut conn = open_db(path).map_err(|err| format!("notes DB open failed: {err}"))?;
    let repo = SqliteNoteRepository::try_new(&mut conn)
        .map_err(|err| format!("notes repo init failed: {err}"))?;
    service
        .load_from(&repo)
        .map_err(|err| format!("notes_load failed: {err}"))
}

fn resolve_notes_db_path() -> PathBuf {
    NOTES_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("VOXNOTE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(NOTES_DB_FILE_NAME)
        })
        .clone()
}

fn parse_note_id(raw: &str) -> Result<NoteId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid note id `{}`", raw.trim()))
}

fn parse_delete_token(raw: &str) -> Result<DeleteToken, String> {
    Uuid::parse_str(raw.trim())
        .map(DeleteToken::from_uuid)
        .map_err(|_| format!("invalid delete token `{}`", raw.trim()))
}

fn normalize_limit(limit: Option<u32>, default: usize) -> usize {
    match limit {
        Some(0) | None => default,
        Some(value) => value.min(LIST_LIMIT_MAX) as usize,
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_list_response<'a>(notes: impl Iterator<Item = &'a Note>) -> NoteListResponse {
    let items = notes.map(to_note_item).collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No notes.".to_string()
    } else {
        format!("Found {} note(s).", items.len())
    };
    NoteListResponse { items, message }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        summary: note.summary.clone(),
        tags: note.tags.clone(),
        folder: note.folder.clone(),
        date_epoch_ms: note.date,
        transcript: note.transcript.clone(),
        duration_seconds: note.duration_seconds,
    }
}
