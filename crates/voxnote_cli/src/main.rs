//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `voxnote_core` linkage.
//! - Run one in-memory note flow with deterministic output.

use voxnote_core::{
    folder_count, recent_notes, search, NoteService, NoteServiceResult, RecordingOutcome,
    DEFAULT_RECENT_LIMIT,
};

fn main() {
    println!("voxnote_core ping={}", voxnote_core::ping());
    println!("voxnote_core version={}", voxnote_core::core_version());

    if let Err(err) = run_demo() {
        eprintln!("voxnote demo failed: {err}");
        std::process::exit(1);
    }
}

fn run_demo() -> NoteServiceResult<()> {
    let mut service = NoteService::default().with_clock(|| 1_700_000_000_000);
    let outcome = RecordingOutcome {
        transcript: "Agreed on the launch date and owners.".to_string(),
        duration_seconds: 42,
    };
    let id = service
        .create_from_recording(outcome, "# Meeting\n\n- launch date agreed")?
        .id;

    let store = service.store_mut();
    store.move_to_folder(id, Some("Meetings".to_string()))?;
    store.rename_title(id, "Kickoff")?;
    store.add_tag(id, "urgent")?;

    let notes = store.list();
    println!("demo notes={}", notes.len());
    for note in recent_notes(notes, DEFAULT_RECENT_LIMIT) {
        println!("demo recent title={} tags={}", note.title, note.tags.join(","));
    }
    println!("demo folder Meetings={}", folder_count(notes, "Meetings"));
    println!("demo search urgent={}", search(notes, "URGENT").len());

    let token = store.request_delete(id)?;
    store.confirm_delete(token)?;
    println!("demo after_delete notes={}", store.len());
    Ok(())
}
