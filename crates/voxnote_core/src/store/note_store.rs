//! In-memory note store.
//!
//! # Responsibility
//! - Own the note collection for one session.
//! - Mediate every mutation so note invariants hold after each call.
//! - Provide the two-step delete protocol used by confirmation prompts.
//!
//! # Invariants
//! - Ids are unique across the collection.
//! - New notes are inserted at the head; updates never move a note.
//! - Title changes go through `edit::title_sync`.
//! - A failed mutation leaves the collection untouched.
//! - The store never caches derived views, so reads are never stale.

use crate::edit::title_sync::{self, sync_heading};
use crate::model::note::{normalize_folder, normalize_tags, Note, NoteId, NoteValidationError};
use crate::model::patch::NotePatch;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle returned by [`NoteStore::request_delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeleteToken(Uuid);

impl Display for DeleteToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DeleteToken {
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }
}

/// Store-level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A required field is empty or an invariant would break.
    Validation(NoteValidationError),
    /// No note with this id exists.
    NotFound(NoteId),
    /// Delete token was never issued, already confirmed, or cancelled.
    UnknownDeleteToken(DeleteToken),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::UnknownDeleteToken(token) => write!(f, "unknown delete token: {token}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::UnknownDeleteToken(_) => None,
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Single-writer in-memory store.
///
/// Multi-threaded hosts must serialize access, e.g. behind a `Mutex`.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    pending_deletes: BTreeMap<DeleteToken, NoteId>,
    revision: u64,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an existing collection, keeping its order.
    pub fn from_notes(notes: Vec<Note>) -> StoreResult<Self> {
        let mut store = Self::new();
        store.bulk_load(notes)?;
        Ok(store)
    }

    /// Inserts a fully formed note at the head of the collection.
    ///
    /// Tags are trimmed and deduplicated, and a blank folder is cleared.
    ///
    /// # Errors
    /// - `Validation(DuplicateId)` when the id is already stored.
    /// - `Validation(..)` when the note breaks a field invariant.
    pub fn create(&mut self, mut note: Note) -> StoreResult<NoteId> {
        note.normalize();
        note.validate()?;
        if self.position(note.id).is_some() {
            return Err(NoteValidationError::DuplicateId(note.id).into());
        }

        let id = note.id;
        self.notes.insert(0, note);
        self.bump();
        info!("event=note_create module=store status=ok note_id={id}");
        Ok(id)
    }

    /// Shallow-merges `patch` into the note with `id`.
    ///
    /// A patch title is applied through the edit coordinator after the patch
    /// summary (if any), so the heading tracks the new title.
    pub fn update(&mut self, id: NoteId, patch: NotePatch) -> StoreResult<&Note> {
        let index = self.require(id)?;
        let mut next = self.notes[index].clone();

        if let Some(summary) = patch.summary {
            next.summary = summary;
        }
        if let Some(title) = patch.title {
            title_sync::rename_title(&next, &title)?.apply_to(&mut next);
        }
        if let Some(tags) = patch.tags {
            next.tags = normalize_tags(tags);
        }
        if let Some(folder) = patch.folder {
            next.folder = normalize_folder(folder);
        }
        if let Some(date) = patch.date {
            next.date = date;
        }
        if let Some(transcript) = patch.transcript {
            next.transcript = transcript;
        }
        next.validate()?;

        self.notes[index] = next;
        self.bump();
        debug!("event=note_update module=store status=ok note_id={id}");
        Ok(&self.notes[index])
    }

    /// Renames a note, rewriting the summary heading when present.
    pub fn rename_title(&mut self, id: NoteId, new_title: &str) -> StoreResult<&Note> {
        let index = self.require(id)?;
        let edit = title_sync::rename_title(&self.notes[index], new_title)?;
        edit.apply_to(&mut self.notes[index]);
        self.bump();
        debug!("event=note_rename module=store status=ok note_id={id}");
        Ok(&self.notes[index])
    }

    /// Adds a tag. Returns whether the tag set changed.
    pub fn add_tag(&mut self, id: NoteId, tag: &str) -> StoreResult<bool> {
        let index = self.require(id)?;
        let changed = self.notes[index].add_tag(tag);
        if changed {
            self.bump();
        }
        Ok(changed)
    }

    /// Removes a tag. Returns whether the tag set changed.
    pub fn remove_tag(&mut self, id: NoteId, tag: &str) -> StoreResult<bool> {
        let index = self.require(id)?;
        let changed = self.notes[index].remove_tag(tag);
        if changed {
            self.bump();
        }
        Ok(changed)
    }

    /// Reassigns the folder. `None` or a blank name removes the note from its folder.
    pub fn move_to_folder(&mut self, id: NoteId, folder: Option<String>) -> StoreResult<&Note> {
        let index = self.require(id)?;
        self.notes[index].folder = normalize_folder(folder);
        self.bump();
        Ok(&self.notes[index])
    }

    /// Replaces the summary with one returned by the summarizer.
    ///
    /// The heading is re-synced to the current title so a regenerated
    /// summary never disagrees with a title the user chose.
    pub fn apply_summary(&mut self, id: NoteId, summary: &str) -> StoreResult<&Note> {
        let index = self.require(id)?;
        let note = &mut self.notes[index];
        note.summary = sync_heading(summary, &note.title);
        self.bump();
        debug!("event=note_summary_apply module=store status=ok note_id={id}");
        Ok(&self.notes[index])
    }

    /// Re-attaches a transcript to the note.
    pub fn attach_transcript(&mut self, id: NoteId, transcript: String) -> StoreResult<&Note> {
        let index = self.require(id)?;
        self.notes[index].transcript = Some(transcript);
        self.bump();
        Ok(&self.notes[index])
    }

    /// Removes the note. Deleting the same id twice fails with `NotFound`.
    pub fn delete(&mut self, id: NoteId) -> StoreResult<Note> {
        let index = self.require(id)?;
        let removed = self.notes.remove(index);
        self.pending_deletes.retain(|_, pending| *pending != id);
        self.bump();
        info!("event=note_delete module=store status=ok note_id={id}");
        Ok(removed)
    }

    /// First step of a confirmed delete: issues a token for `id`.
    pub fn request_delete(&mut self, id: NoteId) -> StoreResult<DeleteToken> {
        self.require(id)?;
        let token = DeleteToken(Uuid::new_v4());
        self.pending_deletes.insert(token, id);
        debug!("event=note_delete_request module=store status=ok note_id={id} token={token}");
        Ok(token)
    }

    /// Second step of a confirmed delete. Consumes the token.
    pub fn confirm_delete(&mut self, token: DeleteToken) -> StoreResult<Note> {
        let id = self
            .pending_deletes
            .remove(&token)
            .ok_or(StoreError::UnknownDeleteToken(token))?;
        self.delete(id)
    }

    /// Drops a pending delete. Returns whether the token was pending.
    pub fn cancel_delete(&mut self, token: DeleteToken) -> bool {
        self.pending_deletes.remove(&token).is_some()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// All notes in storage order.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Clones the collection for persistence.
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.clone()
    }

    /// Replaces the whole collection, keeping the given order.
    ///
    /// Notes are normalized like in `create`. Pending delete tokens are
    /// dropped. On error the store is unchanged.
    pub fn bulk_load(&mut self, mut notes: Vec<Note>) -> StoreResult<()> {
        let mut seen = HashSet::with_capacity(notes.len());
        for note in &mut notes {
            note.normalize();
            note.validate()?;
            if !seen.insert(note.id) {
                warn!(
                    "event=note_bulk_load module=store status=error error_code=duplicate_id note_id={}",
                    note.id
                );
                return Err(NoteValidationError::DuplicateId(note.id).into());
            }
        }

        self.notes = notes;
        self.pending_deletes.clear();
        self.bump();
        info!(
            "event=note_bulk_load module=store status=ok count={}",
            self.notes.len()
        );
        Ok(())
    }

    /// Mutation counter, bumped on every successful change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn require(&self, id: NoteId) -> StoreResult<usize> {
        self.position(id).ok_or(StoreError::NotFound(id))
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
