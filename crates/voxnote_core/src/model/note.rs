//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record captured from a recording or import.
//! - Own the tag editor so tag uniqueness is enforced at the source.
//!
//! # Invariants
//! - `id` is stable, never nil, and never reused for another note.
//! - `title` is non-blank after trimming.
//! - `tags` never holds a blank value or a duplicate; order is insertion order.
//! - A note belongs to at most one `folder`.
//!
//! # See also
//! - crate::edit::title_sync for the title/summary heading contract.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every note.
pub type NoteId = Uuid;

/// Validation errors for note invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Notes must not use the nil UUID.
    NilId,
    /// Title is empty after trimming.
    EmptyTitle,
    /// Tag value is empty after trimming.
    BlankTag,
    /// Tag value carries leading or trailing whitespace.
    UntrimmedTag(String),
    /// Folder name is empty after trimming.
    BlankFolder,
    /// Folder name carries leading or trailing whitespace.
    UntrimmedFolder(String),
    /// The same tag appears twice on one note.
    DuplicateTag(String),
    /// Another note in the collection already uses this id.
    DuplicateId(NoteId),
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be nil"),
            Self::EmptyTitle => write!(f, "note title must not be blank"),
            Self::BlankTag => write!(f, "tag must not be blank"),
            Self::UntrimmedTag(tag) => write!(f, "tag `{tag}` has surrounding whitespace"),
            Self::BlankFolder => write!(f, "folder name must not be blank"),
            Self::UntrimmedFolder(folder) => {
                write!(f, "folder `{folder}` has surrounding whitespace")
            }
            Self::DuplicateTag(tag) => write!(f, "duplicate tag `{tag}`"),
            Self::DuplicateId(id) => write!(f, "note id already exists: {id}"),
        }
    }
}

impl Error for NoteValidationError {}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNote")]
pub struct Note {
    pub id: NoteId,
    /// Short display string, mirrored by the summary heading when present.
    pub title: String,
    /// Markdown body produced by the summarization collaborator.
    pub summary: String,
    /// Insertion-ordered, unique tag values.
    pub tags: Vec<String>,
    pub folder: Option<String>,
    /// Unix epoch milliseconds of creation or last recording.
    pub date: i64,
    /// Last transcript attached by a recording or a transcript edit.
    pub transcript: Option<String>,
    pub duration_seconds: Option<u32>,
}

/// Wire shape used to validate notes on deserialization.
#[derive(Deserialize)]
struct RawNote {
    id: NoteId,
    title: String,
    summary: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    folder: Option<String>,
    date: i64,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    duration_seconds: Option<u32>,
}

impl TryFrom<RawNote> for Note {
    type Error = NoteValidationError;

    fn try_from(raw: RawNote) -> Result<Self, Self::Error> {
        let note = Note {
            id: raw.id,
            title: raw.title,
            summary: raw.summary,
            tags: raw.tags,
            folder: raw.folder,
            date: raw.date,
            transcript: raw.transcript,
            duration_seconds: raw.duration_seconds,
        };
        note.validate()?;
        Ok(note)
    }
}

impl Note {
    /// Creates a note with a generated id.
    ///
    /// Tags start empty and the note sits outside any folder.
    pub fn new(title: impl Into<String>, summary: impl Into<String>, date: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            summary: summary.into(),
            tags: Vec::new(),
            folder: None,
            date,
            transcript: None,
            duration_seconds: None,
        }
    }

    /// Creates a note with a caller-provided id, for import paths.
    ///
    /// # Errors
    /// - `NilId` when `id` is nil.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        summary: impl Into<String>,
        date: i64,
    ) -> Result<Self, NoteValidationError> {
        if id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        let mut note = Self::new(title, summary, date);
        note.id = id;
        Ok(note)
    }

    /// Builder-style folder assignment. Blank names clear the folder.
    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = normalize_folder(Some(folder.into()));
        self
    }

    /// Builder-style tag assignment going through the tag editor.
    pub fn tagged<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
        self
    }

    /// Trims and deduplicates tags and clears a blank folder.
    ///
    /// Store entry points call this before `validate`, so imported notes
    /// follow the same rules as the tag editor.
    pub fn normalize(&mut self) {
        self.tags = normalize_tags(&self.tags);
        self.folder = normalize_folder(self.folder.take());
    }

    /// Checks field invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if let Some(folder) = self.folder.as_deref() {
            if folder.trim().is_empty() {
                return Err(NoteValidationError::BlankFolder);
            }
            if folder.trim() != folder {
                return Err(NoteValidationError::UntrimmedFolder(folder.to_string()));
            }
        }
        validate_tags(&self.tags)
    }

    /// Appends a tag unless it is blank or already present.
    ///
    /// Returns `true` when the tag set changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let Some(tag) = normalize_tag(tag) else {
            return false;
        };
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes a tag by exact match. Absent tags are a no-op.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|current| current != tag);
        self.tags.len() != before
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|current| current == tag)
    }

    pub fn is_in_folder(&self, folder: &str) -> bool {
        self.folder.as_deref() == Some(folder)
    }
}

/// Trims one tag; blank input yields `None`.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims and deduplicates tags, keeping the first occurrence of each.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag.as_ref()) {
            if !normalized.contains(&value) {
                normalized.push(value);
            }
        }
    }
    normalized
}

/// Trims a folder name; blank names mean "no folder".
pub fn normalize_folder(folder: Option<String>) -> Option<String> {
    folder.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn validate_tags(tags: &[String]) -> Result<(), NoteValidationError> {
    for (index, tag) in tags.iter().enumerate() {
        if tag.trim().is_empty() {
            return Err(NoteValidationError::BlankTag);
        }
        if tag.trim() != tag {
            return Err(NoteValidationError::UntrimmedTag(tag.clone()));
        }
        if tags[..index].contains(tag) {
            return Err(NoteValidationError::DuplicateTag(tag.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalize_folder, normalize_tags, Note, NoteValidationError};

    #[test]
    fn add_tag_trims_and_ignores_duplicates() {
        let mut note = Note::new("Meeting", "# Meeting", 0);
        assert!(note.add_tag("  work "));
        assert!(!note.add_tag("work"));
        assert!(!note.add_tag("   "));
        assert_eq!(note.tags, vec!["work".to_string()]);
    }

    #[test]
    fn remove_tag_is_exact_and_silent_when_absent() {
        let mut note = Note::new("Meeting", "", 0).tagged(["work", "Work"]);
        assert!(!note.remove_tag("WORK"));
        assert!(note.remove_tag("Work"));
        assert_eq!(note.tags, vec!["work".to_string()]);
    }

    #[test]
    fn normalize_tags_keeps_first_occurrence_order() {
        let tags = normalize_tags(["b", " a", "b ", "", "c"]);
        assert_eq!(tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn normalize_folder_clears_blank_names() {
        assert_eq!(normalize_folder(Some("  ".to_string())), None);
        assert_eq!(
            normalize_folder(Some(" Ideas ".to_string())).as_deref(),
            Some("Ideas")
        );
    }

    #[test]
    fn validate_rejects_untrimmed_tags_and_blank_folders() {
        let mut note = Note::new("Meeting", "", 0);
        note.tags = vec![" work".to_string()];
        assert_eq!(
            note.validate(),
            Err(NoteValidationError::UntrimmedTag(" work".to_string()))
        );

        note.tags.clear();
        note.folder = Some("   ".to_string());
        assert_eq!(note.validate(), Err(NoteValidationError::BlankFolder));
    }

    #[test]
    fn normalize_trims_tags_and_clears_blank_folder() {
        let mut note = Note::new("Meeting", "", 0);
        note.tags = vec![" work".to_string(), "work".to_string(), " ".to_string()];
        note.folder = Some("   ".to_string());
        note.normalize();
        assert_eq!(note.tags, vec!["work".to_string()]);
        assert_eq!(note.folder, None);
        assert_eq!(note.validate(), Ok(()));
    }

    #[test]
    fn validate_reports_duplicate_tags() {
        let mut note = Note::new("Meeting", "", 0);
        note.tags = vec!["a".to_string(), "a".to_string()];
        assert_eq!(
            note.validate(),
            Err(NoteValidationError::DuplicateTag("a".to_string()))
        );
    }
}
