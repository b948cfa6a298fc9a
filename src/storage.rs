use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, error, info, trace};
use rusqlite::{params, Connection};

use crate::{day_from_display, format_timestamp, MoodEntry, MoodError, MoodRating, Result, DAY_FORMAT};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS moods (
    id INTEGER PRIMARY KEY,
    date TEXT,
    mood INTEGER,
    notes TEXT
)";

/// Append-only store of mood entries backed by a SQLite file.
///
/// A connection is opened for each operation and dropped when it returns, so
/// no state is shared between calls.
#[derive(Debug, Clone)]
pub struct MoodStore {
    /// Location of the SQLite database file
    db_path: PathBuf,
}

impl MoodStore {
    /// Creates a store for the given database file. Nothing is touched on disk
    /// until [`MoodStore::initialize`] or one of the operations runs.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Ensures the `moods` table exists. Safe to call any number of times.
    ///
    /// Databases created before the structured `day` column existed are
    /// upgraded in place; their old rows keep a NULL day.
    pub fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating database directory: {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| {
                    error!("Failed to create database directory: {}", e);
                    MoodError::DirectoryError {
                        path: parent.to_path_buf(),
                    }
                })?;
            }
        }

        let conn = self.connect()?;
        conn.execute_batch(CREATE_TABLE_SQL)?;

        if !column_exists(&conn, "moods", "day")? {
            info!("Adding day column to {}", self.db_path.display());
            conn.execute("ALTER TABLE moods ADD COLUMN day TEXT", [])?;
        }

        trace!("Mood store ready at {}", self.db_path.display());
        Ok(())
    }

    /// Appends one record with a caller-supplied display timestamp.
    ///
    /// The structured day is derived from `date` when it follows the display
    /// format and left empty otherwise. `mood` is stored as given.
    pub fn insert(&self, date: &str, mood: i64, notes: &str) -> Result<MoodEntry> {
        self.insert_row(date, day_from_display(date), mood, notes)
    }

    /// Appends one validated record stamped with `timestamp`.
    pub fn insert_at(
        &self,
        timestamp: NaiveDateTime,
        mood: MoodRating,
        notes: &str,
    ) -> Result<MoodEntry> {
        let date = format_timestamp(timestamp);
        self.insert_row(&date, Some(timestamp.date()), mood.value(), notes)
    }

    /// Returns every record in insertion order.
    pub fn read_all(&self) -> Result<Vec<MoodEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, date, mood, notes, day FROM moods ORDER BY id")?;
        let rows = stmt.query_map([], parse_entry_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }

        debug!("Read {} mood entries", entries.len());
        Ok(entries)
    }

    fn insert_row(
        &self,
        date: &str,
        day: Option<NaiveDate>,
        mood: i64,
        notes: &str,
    ) -> Result<MoodEntry> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO moods (date, mood, notes, day) VALUES (?1, ?2, ?3, ?4)",
            params![date, mood, notes, day],
        )?;
        let id = conn.last_insert_rowid();

        info!("Saved mood entry {} ({}) for {}", id, mood, date);
        Ok(MoodEntry {
            id,
            date: date.to_string(),
            day,
            mood,
            notes: notes.to_string(),
        })
    }

    fn connect(&self) -> Result<Connection> {
        trace!("Opening {}", self.db_path.display());
        Connection::open(&self.db_path).map_err(|e| {
            error!("Failed to open database {}: {}", self.db_path.display(), e);
            MoodError::Database(e)
        })
    }
}

fn parse_entry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MoodEntry> {
    let date: Option<String> = row.get(1)?;
    let notes: Option<String> = row.get(3)?;
    let day: Option<String> = row.get(4)?;

    Ok(MoodEntry {
        id: row.get(0)?,
        date: date.unwrap_or_default(),
        mood: row.get(2)?,
        notes: notes.unwrap_or_default(),
        day: day.and_then(|raw| NaiveDate::parse_from_str(&raw, DAY_FORMAT).ok()),
    })
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let pragma = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&pragma)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
