use uuid::Uuid;
use voxnote_core::{
    folder_count, DeleteToken, Note, NotePatch, NoteStore, NoteValidationError, StoreError,
};

fn seeded_store() -> (NoteStore, Vec<Uuid>) {
    let mut store = NoteStore::new();
    let ids = vec![
        store.create(Note::new("Oldest", "", 1)).unwrap(),
        store.create(Note::new("Middle", "", 2)).unwrap(),
        store.create(Note::new("Newest", "", 3)).unwrap(),
    ];
    (store, ids)
}

#[test]
fn create_rejects_duplicate_id_and_blank_title() {
    let mut store = NoteStore::new();
    let note = Note::new("Dup", "", 0);
    store.create(note.clone()).unwrap();

    assert_eq!(
        store.create(note.clone()).unwrap_err(),
        StoreError::Validation(NoteValidationError::DuplicateId(note.id))
    );
    assert_eq!(
        store.create(Note::new(" ", "", 0)).unwrap_err(),
        StoreError::Validation(NoteValidationError::EmptyTitle)
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn update_never_moves_a_note() {
    let (mut store, ids) = seeded_store();
    store.update(ids[0], NotePatch::summary("changed")).unwrap();

    let titles = store
        .list()
        .iter()
        .map(|note| note.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    assert_eq!(store.get(ids[0]).unwrap().summary, "changed");
}

#[test]
fn update_patch_can_clear_folder_and_replace_tags() {
    let mut store = NoteStore::new();
    let id = store
        .create(Note::new("n", "", 0).in_folder("Ideas").tagged(["a"]))
        .unwrap();

    let note = store
        .update(
            id,
            NotePatch {
                folder: Some(None),
                tags: Some(vec![" b ".to_string(), "b".to_string(), "".to_string()]),
                ..NotePatch::default()
            },
        )
        .unwrap();

    assert_eq!(note.folder, None);
    assert_eq!(note.tags, vec!["b"]);
}

#[test]
fn unknown_id_yields_not_found_everywhere() {
    let mut store = NoteStore::new();
    let missing = Uuid::new_v4();

    assert_eq!(store.get(missing), None);
    assert_eq!(
        store.update(missing, NotePatch::title("x")).unwrap_err(),
        StoreError::NotFound(missing)
    );
    assert_eq!(store.add_tag(missing, "x").unwrap_err(), StoreError::NotFound(missing));
    assert_eq!(
        store.request_delete(missing).unwrap_err(),
        StoreError::NotFound(missing)
    );
}

#[test]
fn delete_is_terminal() {
    let (mut store, ids) = seeded_store();

    let removed = store.delete(ids[1]).unwrap();
    assert_eq!(removed.title, "Middle");
    assert_eq!(store.get(ids[1]), None);
    assert_eq!(store.delete(ids[1]).unwrap_err(), StoreError::NotFound(ids[1]));
    assert_eq!(store.len(), 2);
}

#[test]
fn two_step_delete_only_removes_after_confirmation() {
    let (mut store, ids) = seeded_store();

    let token = store.request_delete(ids[2]).unwrap();
    assert!(store.get(ids[2]).is_some());

    store.confirm_delete(token).unwrap();
    assert!(store.get(ids[2]).is_none());
    assert_eq!(
        store.confirm_delete(token).unwrap_err(),
        StoreError::UnknownDeleteToken(token)
    );
}

#[test]
fn direct_delete_invalidates_pending_tokens() {
    let (mut store, ids) = seeded_store();
    let token = store.request_delete(ids[0]).unwrap();

    store.delete(ids[0]).unwrap();

    assert!(!store.cancel_delete(token));
    assert!(store.confirm_delete(token).is_err());
}

#[test]
fn forged_token_is_rejected() {
    let (mut store, _) = seeded_store();
    let forged = DeleteToken::from_uuid(Uuid::new_v4());
    assert_eq!(
        store.confirm_delete(forged).unwrap_err(),
        StoreError::UnknownDeleteToken(forged)
    );
    assert_eq!(store.len(), 3);
}

#[test]
fn tag_edits_only_bump_revision_on_change() {
    let (mut store, ids) = seeded_store();
    let start = store.revision();

    assert!(store.add_tag(ids[0], "urgent").unwrap());
    assert!(!store.add_tag(ids[0], "urgent").unwrap());
    assert_eq!(store.revision(), start + 1);

    assert!(store.remove_tag(ids[0], "urgent").unwrap());
    assert!(!store.remove_tag(ids[0], "urgent").unwrap());
    assert_eq!(store.revision(), start + 2);
    assert!(store.get(ids[0]).unwrap().tags.is_empty());
}

#[test]
fn move_to_folder_normalizes_blank_names() {
    let (mut store, ids) = seeded_store();

    let note = store.move_to_folder(ids[0], Some(" Projects ".to_string())).unwrap();
    assert_eq!(note.folder.as_deref(), Some("Projects"));

    let note = store.move_to_folder(ids[0], Some("  ".to_string())).unwrap();
    assert_eq!(note.folder, None);
}

#[test]
fn bulk_load_rejects_duplicates_and_keeps_previous_state() {
    let (mut store, ids) = seeded_store();
    let dup = Note::new("a", "", 0);

    let err = store.bulk_load(vec![dup.clone(), dup.clone()]).unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(NoteValidationError::DuplicateId(dup.id))
    );
    assert_eq!(store.len(), 3);
    assert!(store.get(ids[0]).is_some());
}

#[test]
fn created_note_tags_are_trimmed_before_tag_edits() {
    let mut store = NoteStore::new();
    let mut note = Note::new("Imported", "", 0);
    note.tags = vec![" work".to_string(), "work ".to_string()];
    let id = store.create(note).unwrap();

    assert_eq!(store.get(id).unwrap().tags, vec!["work"]);
    assert!(!store.add_tag(id, "work").unwrap());
    assert_eq!(store.get(id).unwrap().tags, vec!["work"]);
}

#[test]
fn bulk_loaded_notes_are_normalized() {
    let mut store = NoteStore::new();
    let mut note = Note::new("Imported", "", 0);
    note.tags = vec![" idea ".to_string()];
    note.folder = Some("   ".to_string());
    let id = note.id;
    store.bulk_load(vec![note]).unwrap();

    let stored = store.get(id).unwrap();
    assert_eq!(stored.tags, vec!["idea"]);
    assert_eq!(stored.folder, None);
    assert!(!store.add_tag(id, "idea").unwrap());
}

#[test]
fn blank_folder_on_create_means_no_folder() {
    let mut store = NoteStore::new();
    let mut note = Note::new("Loose", "", 0);
    note.folder = Some("   ".to_string());
    let id = store.create(note).unwrap();

    assert_eq!(store.get(id).unwrap().folder, None);
    assert_eq!(folder_count(store.list(), "   "), 0);
}
