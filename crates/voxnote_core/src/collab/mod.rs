//! Collaborator contracts for capabilities that live outside core.
//!
//! # Responsibility
//! - Describe recording, summarization and identity as pluggable traits.
//! - Keep randomness, audio and network calls out of core logic.
//!
//! # Invariants
//! - Core only ever sees finished values from collaborators.
//! - A cancelled capture delivers no final result; core then does nothing.

use crate::model::note::NoteId;
use crate::model::user::User;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CollabResult<T> = Result<T, CollabError>;

/// Error envelope returned by collaborator adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollabError {
    /// Adapter that produced the error.
    pub collaborator: String,
    /// Stable machine-readable error code.
    pub code: String,
    pub message: String,
}

impl CollabError {
    pub fn new(
        collaborator: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            collaborator: collaborator.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for CollabError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failed with `{}`: {}",
            self.collaborator, self.code, self.message
        )
    }
}

impl Error for CollabError {}

/// Final value of a completed recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingOutcome {
    pub transcript: String,
    pub duration_seconds: u32,
}

/// Manual edit submitted from the transcript editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEdit {
    pub title: String,
    pub transcript: String,
}

/// Receives transcription results while a capture is stopped.
pub trait TranscriptListener {
    /// Streaming text shown while recording. Core ignores it by default.
    fn on_partial_result(&mut self, _partial: &str) {}
    /// The accepted transcript. Delivered at most once per capture.
    fn on_final_result(&mut self, outcome: RecordingOutcome);
}

/// Audio capture and speech-to-text adapter.
pub trait RecordingCollaborator {
    fn start_capture(&mut self) -> CollabResult<()>;
    /// Ends the capture and flushes results into `listener`.
    ///
    /// A cancelled capture returns `Ok(())` without a final result.
    fn stop_capture(&mut self, listener: &mut dyn TranscriptListener) -> CollabResult<()>;
}

/// Input handed to the summarizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    /// `None` for a recording that has no note yet.
    pub note_id: Option<NoteId>,
    /// Current title when the note already exists.
    pub title: Option<String>,
    pub transcript: String,
}

/// Markdown summary generator.
pub trait SummaryProvider: Send + Sync {
    fn provider_id(&self) -> &str;
    fn summarize(&self, request: &SummaryRequest) -> CollabResult<String>;
}

/// Identity source used at login.
pub trait IdentityProvider {
    fn sign_in(&self) -> CollabResult<User>;
    fn sign_out(&self) -> CollabResult<()>;
}
