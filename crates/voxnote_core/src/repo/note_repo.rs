//! Note snapshot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the persistence hook hosts use to save and restore the store.
//! - Provide a SQLite adapter that keeps storage order and tag order.
//!
//! # Invariants
//! - `replace_all` swaps the whole snapshot in one transaction.
//! - Read paths re-validate notes and reject invalid persisted state
//!   instead of masking it.
//! - `load_all` returns notes in the order they were saved.

use crate::db::DbError;
use crate::model::note::{Note, NoteValidationError};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(NoteValidationError),
    Db(DbError),
    /// Connection schema is missing a table the adapter needs.
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "note repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence hook for note snapshots.
pub trait NoteRepository {
    /// Loads every saved note in saved order.
    fn load_all(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the saved snapshot with `notes`.
    fn replace_all(&mut self, notes: &[Note]) -> RepoResult<()>;
}

/// SQLite-backed note snapshot repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when migrations have not been applied.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        for table in ["notes", "note_tags"] {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn load_all(&self) -> RepoResult<Vec<Note>> {
        let mut tags_by_note = load_tags(self.conn)?;

        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                title,
                summary,
                folder,
                date,
                transcript,
                duration_seconds
             FROM notes
             ORDER BY position ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            let mut note = parse_note_row(row)?;
            note.tags = tags_by_note.remove(&note.id).unwrap_or_default();
            note.validate()?;
            notes.push(note);
        }

        Ok(notes)
    }

    fn replace_all(&mut self, notes: &[Note]) -> RepoResult<()> {
        for note in notes {
            note.validate()?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM note_tags;", [])?;
        tx.execute("DELETE FROM notes;", [])?;

        for (position, note) in notes.iter().enumerate() {
            let id = note.id.to_string();
            tx.execute(
                "INSERT INTO notes (
                    id,
                    position,
                    title,
                    summary,
                    folder,
                    date,
                    transcript,
                    duration_seconds
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    id.as_str(),
                    to_sql_index(position)?,
                    note.title.as_str(),
                    note.summary.as_str(),
                    note.folder.as_deref(),
                    note.date,
                    note.transcript.as_deref(),
                    note.duration_seconds,
                ],
            )?;

            for (ordinal, tag) in note.tags.iter().enumerate() {
                tx.execute(
                    "INSERT INTO note_tags (note_id, ordinal, tag) VALUES (?1, ?2, ?3);",
                    params![id.as_str(), to_sql_index(ordinal)?, tag.as_str()],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<Note> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in notes.id"))
    })?;

    Ok(Note {
        id,
        title: row.get("title")?,
        summary: row.get("summary")?,
        tags: Vec::new(),
        folder: row.get("folder")?,
        date: row.get("date")?,
        transcript: row.get("transcript")?,
        duration_seconds: row.get("duration_seconds")?,
    })
}

fn load_tags(conn: &Connection) -> RepoResult<HashMap<Uuid, Vec<String>>> {
    let mut stmt =
        conn.prepare("SELECT note_id, tag FROM note_tags ORDER BY note_id ASC, ordinal ASC;")?;
    let mut rows = stmt.query([])?;
    let mut tags: HashMap<Uuid, Vec<String>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let id_text: String = row.get(0)?;
        let id = Uuid::parse_str(&id_text).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{id_text}` in note_tags.note_id"))
        })?;
        tags.entry(id).or_default().push(row.get(1)?);
    }
    Ok(tags)
}

fn to_sql_index(value: usize) -> RepoResult<i64> {
    i64::try_from(value).map_err(|_| RepoError::InvalidData(format!("index {value} overflows i64")))
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
