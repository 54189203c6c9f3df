//! Note use-case service.
//!
//! # Responsibility
//! - Turn finished recordings into notes.
//! - Drive summary regeneration and transcript edits through collaborators.
//! - Bridge the store to the persistence hook.
//!
//! # Invariants
//! - Every mutation goes through `NoteStore`, so store invariants hold.
//! - A failing summarizer never changes an existing summary.
//! - A capture without a final result creates no note.

use crate::collab::{
    CollabError, RecordingCollaborator, RecordingOutcome, SummaryProvider, SummaryRequest,
    TranscriptEdit, TranscriptListener,
};
use crate::edit::title_sync::heading_title;
use crate::model::note::{now_epoch_ms, Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::store::note_store::{NoteStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Title used when neither the summary nor the transcript offers one.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled note";

const TRANSCRIPT_TITLE_MAX_CHARS: usize = 40;

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    Store(StoreError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Recording collaborator failed to start or stop.
    Recording(CollabError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Recording(err) => write!(f, "recording failed: {err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Recording(err) => Some(err),
        }
    }
}

impl From<StoreError> for NoteServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type NoteServiceResult<T> = Result<T, NoteServiceError>;

/// Note service facade over the store and its collaborators.
pub struct NoteService {
    store: NoteStore,
    summarizer: Option<Arc<dyn SummaryProvider>>,
    clock: fn() -> i64,
}

impl Default for NoteService {
    fn default() -> Self {
        Self::new(NoteStore::new())
    }
}

impl NoteService {
    /// Creates a service without a summarizer, using the wall clock.
    pub fn new(store: NoteStore) -> Self {
        Self {
            store,
            summarizer: None,
            clock: now_epoch_ms,
        }
    }

    pub fn with_summary_provider(mut self, provider: Arc<dyn SummaryProvider>) -> Self {
        self.summarizer = Some(provider);
        self
    }

    /// Overrides the timestamp source used for new notes.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NoteStore {
        &mut self.store
    }

    /// Creates a note from a finished recording and an externally produced summary.
    pub fn create_from_recording(
        &mut self,
        outcome: RecordingOutcome,
        summary: impl Into<String>,
    ) -> NoteServiceResult<&Note> {
        let summary = summary.into();
        let title = heading_title(&summary)
            .or_else(|| title_from_transcript(&outcome.transcript))
            .unwrap_or_else(|| UNTITLED_NOTE_TITLE.to_string());

        let mut note = Note::new(title, summary, (self.clock)());
        note.transcript = Some(outcome.transcript);
        note.duration_seconds = Some(outcome.duration_seconds);

        let id = self.store.create(note)?;
        info!(
            "event=recording_complete module=service status=ok note_id={id} duration_s={}",
            outcome.duration_seconds
        );
        self.require(id)
    }

    /// Summarizes a finished recording and stores it as a new note.
    ///
    /// Without a working summarizer the transcript itself becomes the body.
    pub fn complete_recording(&mut self, outcome: RecordingOutcome) -> NoteServiceResult<&Note> {
        let request = SummaryRequest {
            note_id: None,
            title: None,
            transcript: outcome.transcript.clone(),
        };
        let summary = match self.summarize(&request) {
            Some(summary) => summary,
            None => fallback_summary(&outcome.transcript),
        };
        self.create_from_recording(outcome, summary)
    }

    /// Runs one capture on `recorder` and stores the result.
    ///
    /// Returns `Ok(None)` when the capture ended without a final result.
    pub fn record(
        &mut self,
        recorder: &mut dyn RecordingCollaborator,
    ) -> NoteServiceResult<Option<&Note>> {
        recorder
            .start_capture()
            .map_err(NoteServiceError::Recording)?;

        let mut capture = FinalCapture::default();
        recorder
            .stop_capture(&mut capture)
            .map_err(NoteServiceError::Recording)?;

        match capture.outcome {
            Some(outcome) => self.complete_recording(outcome).map(Some),
            None => {
                info!(
                    "event=recording_complete module=service status=cancelled partials={}",
                    capture.partials
                );
                Ok(None)
            }
        }
    }

    /// Asks the summarizer for a fresh summary of note `id`.
    ///
    /// Returns `Ok(false)` when the summarizer is missing or fails; the
    /// summary is then left as it was.
    pub fn regenerate_summary(&mut self, id: NoteId) -> NoteServiceResult<bool> {
        let note = self.store.get(id).ok_or(StoreError::NotFound(id))?;
        let request = SummaryRequest {
            note_id: Some(id),
            title: Some(note.title.clone()),
            transcript: note.transcript.clone().unwrap_or_default(),
        };

        match self.summarize(&request) {
            Some(summary) => {
                self.store.apply_summary(id, &summary)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Applies a transcript edit: attach the transcript, rename, re-summarize.
    ///
    /// A blank edited title keeps the current title.
    pub fn edit_transcript(
        &mut self,
        id: NoteId,
        edit: TranscriptEdit,
    ) -> NoteServiceResult<&Note> {
        self.store.attach_transcript(id, edit.transcript)?;
        if !edit.title.trim().is_empty() {
            self.store.rename_title(id, &edit.title)?;
        }
        self.regenerate_summary(id)?;
        self.require(id)
    }

    /// Writes the current snapshot through `repo`.
    pub fn save_to(&self, repo: &mut dyn NoteRepository) -> NoteServiceResult<()> {
        repo.replace_all(self.store.list())?;
        info!(
            "event=notes_save module=service status=ok count={}",
            self.store.len()
        );
        Ok(())
    }

    /// Replaces the store contents with the snapshot held by `repo`.
    pub fn load_from(&mut self, repo: &dyn NoteRepository) -> NoteServiceResult<usize> {
        let notes = repo.load_all()?;
        let count = notes.len();
        self.store.bulk_load(notes)?;
        Ok(count)
    }

    fn summarize(&self, request: &SummaryRequest) -> Option<String> {
        let provider = match self.summarizer.as_ref() {
            Some(provider) => provider,
            None => {
                warn!("event=summary_generate module=service status=skipped reason=no_provider");
                return None;
            }
        };

        match provider.summarize(request) {
            Ok(summary) => Some(summary),
            Err(err) => {
                warn!(
                    "event=summary_generate module=service status=error provider={} error_code={}",
                    provider.provider_id(),
                    err.code
                );
                None
            }
        }
    }

    fn require(&self, id: NoteId) -> NoteServiceResult<&Note> {
        self.store
            .get(id)
            .ok_or(NoteServiceError::Store(StoreError::NotFound(id)))
    }
}

#[derive(Default)]
struct FinalCapture {
    outcome: Option<RecordingOutcome>,
    partials: usize,
}

impl TranscriptListener for FinalCapture {
    fn on_partial_result(&mut self, _partial: &str) {
        self.partials += 1;
    }

    fn on_final_result(&mut self, outcome: RecordingOutcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }
}

/// First non-blank transcript line, capped for display.
fn title_from_transcript(transcript: &str) -> Option<String> {
    let line = transcript.lines().map(str::trim).find(|line| !line.is_empty())?;
    let mut title = line
        .chars()
        .take(TRANSCRIPT_TITLE_MAX_CHARS)
        .collect::<String>();
    if line.chars().count() > TRANSCRIPT_TITLE_MAX_CHARS {
        title.push_str("...");
    }
    Some(title)
}

fn fallback_summary(transcript: &str) -> String {
    let title =
        title_from_transcript(transcript).unwrap_or_else(|| UNTITLED_NOTE_TITLE.to_string());
    format!("# {title}\n\n{}", transcript.trim())
}

#[cfg(test)]
mod tests {
    use super::{fallback_summary, title_from_transcript};

    #[test]
    fn transcript_title_uses_first_non_blank_line() {
        assert_eq!(
            title_from_transcript("\n  Weekly sync \nmore").as_deref(),
            Some("Weekly sync")
        );
        assert_eq!(title_from_transcript("   \n"), None);
    }

    #[test]
    fn transcript_title_is_capped() {
        let long = "a".repeat(60);
        let title = title_from_transcript(&long).unwrap();
        assert_eq!(title.chars().count(), 43);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn fallback_summary_has_heading_and_body() {
        assert_eq!(fallback_summary("hello there"), "# hello there\n\nhello there");
    }
}
