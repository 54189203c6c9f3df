//! Substring search over note snapshots.
//!
//! # Responsibility
//! - Match notes by title, summary, or any tag.
//! - Support the folder-scoped search screen.
//!
//! # Invariants
//! - Matching is case-insensitive substring matching; no tokenizing, no fuzz.
//! - A blank query returns the (scoped) input unfiltered, in order.
//! - Results are always a subsequence of the input.

use crate::model::note::Note;

/// Search options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// User query text.
    pub text: String,
    /// Restricts candidates to one folder before matching.
    pub folder: Option<String>,
}

impl SearchQuery {
    /// Creates an unscoped query.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            folder: None,
        }
    }

    /// Restricts this query to one folder.
    pub fn in_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

/// Returns the notes matching `query`, in input order.
pub fn search<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    filter_matches(notes.iter(), query)
}

/// Runs a scoped search.
pub fn search_notes<'a>(notes: &'a [Note], query: &SearchQuery) -> Vec<&'a Note> {
    match query.folder.as_deref() {
        Some(folder) => filter_matches(
            notes.iter().filter(|note| note.is_in_folder(folder)),
            &query.text,
        ),
        None => search(notes, &query.text),
    }
}

/// Whether `note` matches an already case-folded needle.
pub fn note_matches(note: &Note, folded_needle: &str) -> bool {
    contains_folded(&note.title, folded_needle)
        || contains_folded(&note.summary, folded_needle)
        || note
            .tags
            .iter()
            .any(|tag| contains_folded(tag, folded_needle))
}

fn filter_matches<'a>(candidates: impl Iterator<Item = &'a Note>, query: &str) -> Vec<&'a Note> {
    if query.trim().is_empty() {
        return candidates.collect();
    }

    let needle = query.to_lowercase();
    candidates
        .filter(|note| note_matches(note, &needle))
        .collect()
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

#[cfg(test)]
mod tests {
    use super::{search, search_notes, SearchQuery};
    use crate::model::note::Note;

    fn sample() -> Vec<Note> {
        vec![
            Note::new("Work meeting", "# Work meeting\nBudget", 3).in_folder("Meetings"),
            Note::new("Groceries", "milk", 2).tagged(["Home"]),
            Note::new("Design", "Sketch ideas", 1).in_folder("Ideas"),
        ]
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let notes = sample();
        let hits = search(&notes, "   ");
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].id, notes[0].id);
        assert_eq!(hits[2].id, notes[2].id);
    }

    #[test]
    fn matches_title_summary_and_tags_case_insensitively() {
        let notes = sample();
        assert_eq!(search(&notes, "WORK")[0].id, notes[0].id);
        assert_eq!(search(&notes, "budget")[0].id, notes[0].id);
        assert_eq!(search(&notes, "home")[0].id, notes[1].id);
        assert!(search(&notes, "zebra").is_empty());
    }

    #[test]
    fn query_keeps_inner_whitespace() {
        let notes = sample();
        assert_eq!(search(&notes, "work meeting").len(), 1);
        assert!(search(&notes, "work  meeting").is_empty());
    }

    #[test]
    fn folder_scope_applies_before_matching() {
        let notes = sample();
        let scoped = search_notes(&notes, &SearchQuery::new("").in_folder("Ideas"));
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].title, "Design");

        let scoped_miss = search_notes(&notes, &SearchQuery::new("budget").in_folder("Ideas"));
        assert!(scoped_miss.is_empty());
    }
}
