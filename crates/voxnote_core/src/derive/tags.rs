//! Tag aggregation.

use crate::model::note::Note;

/// Number of tag chips suggested on the search screen.
pub const POPULAR_TAGS_LIMIT: usize = 5;

/// Tag with its occurrence count across the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount<'a> {
    pub tag: &'a str,
    pub count: usize,
}

/// Distinct tags over all notes, in first-seen order.
pub fn all_tags(notes: &[Note]) -> Vec<&str> {
    tag_counts(notes).into_iter().map(|entry| entry.tag).collect()
}

/// Most used tags, by descending frequency; ties keep first-seen order.
pub fn popular_tags(notes: &[Note], limit: usize) -> Vec<TagCount<'_>> {
    let mut counts = tag_counts(notes);
    counts.sort_by(|left, right| right.count.cmp(&left.count));
    counts.truncate(limit);
    counts
}

fn tag_counts(notes: &[Note]) -> Vec<TagCount<'_>> {
    let mut counts: Vec<TagCount<'_>> = Vec::new();
    for tag in notes.iter().flat_map(|note| note.tags.iter()) {
        match counts.iter_mut().find(|entry| entry.tag == tag) {
            Some(entry) => entry.count += 1,
            None => counts.push(TagCount {
                tag: tag.as_str(),
                count: 1,
            }),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::{all_tags, popular_tags, TagCount};
    use crate::model::note::Note;

    #[test]
    fn popular_tags_rank_by_frequency_then_first_seen() {
        let notes = vec![
            Note::new("a", "", 0).tagged(["idea", "work"]),
            Note::new("b", "", 0).tagged(["work", "dev"]),
            Note::new("c", "", 0).tagged(["dev", "work"]),
        ];
        assert_eq!(
            popular_tags(&notes, 2),
            vec![
                TagCount { tag: "work", count: 3 },
                TagCount { tag: "dev", count: 2 },
            ]
        );
        assert_eq!(all_tags(&notes), vec!["idea", "work", "dev"]);
    }

    #[test]
    fn empty_collection_has_no_tags() {
        assert!(popular_tags(&[], 5).is_empty());
        assert!(all_tags(&[]).is_empty());
    }
}
