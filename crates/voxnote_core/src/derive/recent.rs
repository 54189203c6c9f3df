//! Recency ordering.

use crate::model::note::Note;

/// Number of notes on the home screen's "recent" strip.
pub const DEFAULT_RECENT_LIMIT: usize = 3;

/// Returns the `limit` most recent notes.
///
/// Notes are ordered by `date` descending. The sort is stable, so notes with
/// equal dates keep their storage order. With newest-first insertion this is
/// exactly the head of the storage order.
pub fn recent_notes(notes: &[Note], limit: usize) -> Vec<&Note> {
    let mut ordered = notes.iter().collect::<Vec<_>>();
    ordered.sort_by(|left, right| right.date.cmp(&left.date));
    ordered.truncate(limit);
    ordered
}
