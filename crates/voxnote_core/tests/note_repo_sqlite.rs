use rusqlite::Connection;
use voxnote_core::db::{open_db, open_db_in_memory};
use voxnote_core::{Note, NoteRepository, NoteService, NoteStore, RepoError, SqliteNoteRepository};

fn sample_notes() -> Vec<Note> {
    let mut meeting = Note::new("Meeting", "# Meeting\n- agenda", 1_700_000_000_000)
        .in_folder("Meetings")
        .tagged(["work", "urgent", "q3"]);
    meeting.transcript = Some("we met and talked".to_string());
    meeting.duration_seconds = Some(95);

    vec![
        meeting,
        Note::new("Reading list", "books", 1_600_000_000_000),
        Note::new("Ideas", "# Ideas", 1_650_000_000_000).tagged(["idea"]),
    ]
}

#[test]
fn replace_then_load_round_trips_order_tags_and_optionals() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let notes = sample_notes();

    repo.replace_all(&notes).unwrap();
    let loaded = repo.load_all().unwrap();

    assert_eq!(loaded, notes);
    assert_eq!(loaded[0].tags, vec!["work", "urgent", "q3"]);
    assert_eq!(loaded[1].folder, None);
    assert_eq!(loaded[1].transcript, None);
}

#[test]
fn replace_all_overwrites_previous_snapshot() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let notes = sample_notes();

    repo.replace_all(&notes).unwrap();
    repo.replace_all(&notes[1..2]).unwrap();

    let loaded = repo.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, "Reading list");
}

#[test]
fn repository_requires_migrated_schema() {
    let mut conn = Connection::open_in_memory().unwrap();
    let err = SqliteNoteRepository::try_new(&mut conn)
        .err()
        .expect("bare connection should be rejected");
    assert!(matches!(err, RepoError::MissingRequiredTable("notes")));
}

#[test]
fn invalid_persisted_row_is_reported_not_masked() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (id, position, title, summary, date) VALUES ('not-a-uuid', 0, 'T', '', 0);",
        [],
    )
    .unwrap();

    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let err = repo.load_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_snapshot_survives_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    let notes = sample_notes();

    {
        let service = NoteService::new(NoteStore::from_notes(notes.clone()).unwrap());
        let mut conn = open_db(&path).unwrap();
        let mut repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
        service.save_to(&mut repo).unwrap();
    }

    let mut service = NoteService::default();
    let mut conn = open_db(&path).unwrap();
    let repo = SqliteNoteRepository::try_new(&mut conn).unwrap();
    let count = service.load_from(&repo).unwrap();

    assert_eq!(count, 3);
    assert_eq!(service.store().list(), notes.as_slice());
}
