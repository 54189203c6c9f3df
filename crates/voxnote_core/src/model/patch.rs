//! Partial note updates.
//!
//! `NotePatch` is a shallow merge: `None` keeps the current value. Nested
//! `Option`s distinguish "keep" (`None`) from "clear" (`Some(None)`).

/// Shallow partial update applied by `NoteStore::update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    /// Routed through the edit coordinator, never assigned directly.
    pub title: Option<String>,
    pub summary: Option<String>,
    /// Full replacement; trimmed and deduplicated before it is stored.
    pub tags: Option<Vec<String>>,
    pub folder: Option<Option<String>>,
    pub date: Option<i64>,
    pub transcript: Option<Option<String>>,
}

impl NotePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn summary(value: impl Into<String>) -> Self {
        Self {
            summary: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn tags<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn folder(value: Option<String>) -> Self {
        Self {
            folder: Some(value),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
