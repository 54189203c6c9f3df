//! Title/summary heading synchronization.
//!
//! # Responsibility
//! - Compute the `(title, summary)` pair produced by a rename.
//! - Extract the heading text a summarizer placed on the first line.
//!
//! # Invariants
//! - A blank title is rejected before anything is computed.
//! - Only the first summary line is ever rewritten, and only when it starts
//!   with the heading marker. Every other line is preserved byte-for-byte.

use crate::model::note::{Note, NoteValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown marker that makes the first summary line the title heading.
pub const HEADING_MARKER: char = '#';

// A closing `#` run only counts when whitespace separates it from the text.
static HEADING_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#+[ \t]*(.*?)(?:[ \t]+#+)?[ \t]*\r?$").expect("valid heading regex")
});

/// Result of a rename, applied to the note as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEdit {
    pub title: String,
    pub summary: String,
}

impl TitleEdit {
    /// Writes both fields. Callers hold the note exclusively, so the pair
    /// lands together.
    pub fn apply_to(self, note: &mut Note) {
        note.title = self.title;
        note.summary = self.summary;
    }
}

/// Computes the rename of `note` to `new_title`.
///
/// # Errors
/// - `EmptyTitle` when `new_title` is blank after trimming.
pub fn rename_title(note: &Note, new_title: &str) -> Result<TitleEdit, NoteValidationError> {
    let title = new_title.trim();
    if title.is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }

    Ok(TitleEdit {
        title: title.to_string(),
        summary: sync_heading(&note.summary, title),
    })
}

/// Rewrites the first summary line to `# {title}` when it is a heading.
pub fn sync_heading(summary: &str, title: &str) -> String {
    let first_line_end = summary.find('\n').unwrap_or(summary.len());
    let (first, rest) = summary.split_at(first_line_end);
    if !first.starts_with(HEADING_MARKER) {
        return summary.to_string();
    }

    let carriage_return = if first.ends_with('\r') { "\r" } else { "" };
    format!("{HEADING_MARKER} {title}{carriage_return}{rest}")
}

/// Returns the heading text of the summary's first line, if it has one.
pub fn heading_title(summary: &str) -> Option<String> {
    let first = summary.split('\n').next()?;
    let captures = HEADING_LINE_RE.captures(first)?;
    let text = captures.get(1)?.as_str().trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{heading_title, rename_title, sync_heading};
    use crate::model::note::{Note, NoteValidationError};

    #[test]
    fn rename_rewrites_heading_and_keeps_body() {
        let note = Note::new("Meeting", "# Meeting\nNotes here\n\n- item", 0);
        let edit = rename_title(&note, "Kickoff").unwrap();
        assert_eq!(edit.title, "Kickoff");
        assert_eq!(edit.summary, "# Kickoff\nNotes here\n\n- item");
    }

    #[test]
    fn rename_leaves_plain_summary_untouched() {
        let note = Note::new("Meeting", "Notes here\n# not first", 0);
        let edit = rename_title(&note, "Kickoff").unwrap();
        assert_eq!(edit.summary, "Notes here\n# not first");
    }

    #[test]
    fn rename_rejects_blank_title() {
        let note = Note::new("Meeting", "# Meeting", 0);
        assert_eq!(
            rename_title(&note, "  \t"),
            Err(NoteValidationError::EmptyTitle)
        );
    }

    #[test]
    fn sync_heading_normalizes_level_and_keeps_crlf() {
        assert_eq!(sync_heading("## Old\r\nbody", "New"), "# New\r\nbody");
        assert_eq!(sync_heading("", "New"), "");
    }

    #[test]
    fn heading_title_extracts_first_line_text() {
        assert_eq!(heading_title("# Weekly sync\nbody").as_deref(), Some("Weekly sync"));
        assert_eq!(heading_title("### Plan ##").as_deref(), Some("Plan"));
        assert_eq!(heading_title("# Learning C#").as_deref(), Some("Learning C#"));
        assert_eq!(heading_title("# Retro #2\r\nbody").as_deref(), Some("Retro #2"));
        assert_eq!(heading_title("#\nbody"), None);
        assert_eq!(heading_title("plain"), None);
    }
}
