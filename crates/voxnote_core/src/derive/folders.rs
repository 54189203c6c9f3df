//! Folder membership views.
//!
//! Folders are not entities: a note's `folder` string is compared by exact,
//! case-sensitive equality. Category layouts group folder names for display
//! and are owned by the presentation layer, which passes them in.

use crate::model::note::Note;
use std::collections::BTreeMap;

/// Number of notes whose folder equals `folder`.
pub fn folder_count(notes: &[Note], folder: &str) -> usize {
    notes.iter().filter(|note| note.is_in_folder(folder)).count()
}

/// Notes whose folder equals `folder`, in storage order.
pub fn notes_in_folder<'a>(notes: &'a [Note], folder: &str) -> Vec<&'a Note> {
    notes.iter().filter(|note| note.is_in_folder(folder)).collect()
}

/// The note opened when a folder is tapped: first match in storage order.
pub fn first_note_in_folder<'a>(notes: &'a [Note], folder: &str) -> Option<&'a Note> {
    notes.iter().find(|note| note.is_in_folder(folder))
}

/// Distinct folder names in first-seen order.
pub fn folder_names(notes: &[Note]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for folder in notes.iter().filter_map(|note| note.folder.as_deref()) {
        if !names.contains(&folder) {
            names.push(folder);
        }
    }
    names
}

/// Display grouping of folder names under one category heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderCategory {
    pub name: String,
    pub folders: Vec<String>,
    /// Whether the category starts expanded.
    pub expanded_by_default: bool,
}

impl FolderCategory {
    pub fn new<I, S>(name: impl Into<String>, folders: I, expanded_by_default: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            folders: folders.into_iter().map(Into::into).collect(),
            expanded_by_default,
        }
    }
}

/// Folder layout shown on the home screen of a fresh install.
pub fn default_folder_layout() -> Vec<FolderCategory> {
    vec![
        FolderCategory::new("Work", ["Projects", "Meetings", "Client Notes"], true),
        FolderCategory::new("Personal", ["Learning", "Ideas", "Reading Notes"], true),
        FolderCategory::new("Archive", ["Old Projects"], false),
    ]
}

/// One folder row with its note count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry<'a> {
    pub name: &'a str,
    pub count: usize,
}

/// One category with counted folder rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOverview<'a> {
    pub name: &'a str,
    pub folders: Vec<FolderEntry<'a>>,
    pub total: usize,
}

/// Counts notes for every folder named in `categories`.
pub fn category_overview<'a>(
    notes: &[Note],
    categories: &'a [FolderCategory],
) -> Vec<CategoryOverview<'a>> {
    categories
        .iter()
        .map(|category| {
            let folders = category
                .folders
                .iter()
                .map(|folder| FolderEntry {
                    name: folder.as_str(),
                    count: folder_count(notes, folder),
                })
                .collect::<Vec<_>>();
            let total = folders.iter().map(|entry| entry.count).sum();
            CategoryOverview {
                name: category.name.as_str(),
                folders,
                total,
            }
        })
        .collect()
}

/// Expanded/collapsed state of category headings.
///
/// Presentation-owned view state; it never lives in the note store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryExpansion {
    expanded: BTreeMap<String, bool>,
}

impl CategoryExpansion {
    /// Seeds the state from each category's default.
    pub fn from_layout(categories: &[FolderCategory]) -> Self {
        Self {
            expanded: categories
                .iter()
                .map(|category| (category.name.clone(), category.expanded_by_default))
                .collect(),
        }
    }

    /// Unknown categories read as collapsed.
    pub fn is_expanded(&self, category: &str) -> bool {
        self.expanded.get(category).copied().unwrap_or(false)
    }

    /// Flips one category and returns its new state.
    pub fn toggle(&mut self, category: &str) -> bool {
        let entry = self.expanded.entry(category.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }
}

#[cfg(test)]
mod tests {
    use super::{
        category_overview, default_folder_layout, folder_count, folder_names, notes_in_folder,
        CategoryExpansion,
    };
    use crate::model::note::Note;

    fn sample() -> Vec<Note> {
        vec![
            Note::new("a", "", 3).in_folder("Projects"),
            Note::new("b", "", 2).in_folder("projects"),
            Note::new("c", "", 1).in_folder("Ideas"),
            Note::new("d", "", 0).in_folder("Projects"),
            Note::new("e", "", 0),
        ]
    }

    #[test]
    fn folder_matching_is_case_sensitive() {
        let notes = sample();
        assert_eq!(folder_count(&notes, "Projects"), 2);
        assert_eq!(folder_count(&notes, "projects"), 1);
        assert_eq!(folder_count(&notes, "Missing"), 0);
        assert!(notes_in_folder(&notes, "Missing").is_empty());
    }

    #[test]
    fn folder_names_are_distinct_in_first_seen_order() {
        let notes = sample();
        assert_eq!(folder_names(&notes), vec!["Projects", "projects", "Ideas"]);
    }

    #[test]
    fn overview_counts_layout_folders() {
        let notes = sample();
        let layout = default_folder_layout();
        let overview = category_overview(&notes, &layout);
        assert_eq!(overview[0].name, "Work");
        assert_eq!(overview[0].folders[0].count, 2);
        assert_eq!(overview[0].total, 2);
        assert_eq!(overview[1].total, 1);
        assert_eq!(overview[2].total, 0);
    }

    #[test]
    fn expansion_state_toggles_per_category() {
        let layout = default_folder_layout();
        let mut expansion = CategoryExpansion::from_layout(&layout);
        assert!(expansion.is_expanded("Work"));
        assert!(!expansion.is_expanded("Archive"));
        assert!(expansion.toggle("Archive"));
        assert!(!expansion.toggle("Work"));
        assert!(!expansion.is_expanded("Work"));
    }
}
