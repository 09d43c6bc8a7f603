// src/db.rs

use crate::error::{MoodlogError, Result};
use crate::models::{format_date, start_of_day, JournalEntry, Tags, DAY_MILLIS};
use crate::search::SearchPatterns;
use log::{debug, info};
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// Current `PRAGMA user_version` of the entries schema.
pub const SCHEMA_VERSION: i32 = 2;

const ENTRY_COLUMNS: &str = "id, content, mood, tags, date";

/// Persistence operations the CLI depends on.
///
/// A missing row is reported as `Ok(false)` / `Ok(None)`; only storage
/// failures come back as `Err`.
pub trait EntryStore {
    /// Updates every column of the row with `entry.id` if it is positive,
    /// otherwise inserts and writes the new id back into `entry`.
    fn add_or_update(&self, entry: &mut JournalEntry) -> Result<bool>;

    /// The entry with this id, if any.
    fn get_by_id(&self, id: i64) -> Result<Option<JournalEntry>>;

    /// All entries on the local day containing `day`, newest first.
    fn get_by_date(&self, day: i64) -> Result<Vec<JournalEntry>>;

    /// First entry dated within `start..=end`.
    fn get_in_range(&self, start: i64, end: i64) -> Result<Option<JournalEntry>>;

    /// Every entry, newest first.
    fn get_all(&self) -> Result<Vec<JournalEntry>>;

    /// Removes one entry. `false` when no row had that id.
    fn delete(&self, id: i64) -> Result<bool>;

    /// Removes every entry with an id in `start..=end` and returns how many went.
    fn delete_range(&self, start: i64, end: i64) -> Result<usize>;

    /// Case-insensitive substring match on content and tags, or a match on the display date.
    fn search(&self, query: &str) -> Result<Vec<JournalEntry>>;

    /// Number of stored entries.
    fn count(&self) -> Result<usize>;
}

/// SQLite-backed store. The connection closes when the store is dropped.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and brings its schema up to date.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!("opening journal database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrate(&conn)?;
        conn.create_scalar_function(
            "entry_date",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| Ok(format_date(ctx.get::<i64>(0)?)),
        )?;
        // LIKE only folds ASCII case
        conn.create_scalar_function(
            "casefold",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
        )?;
        Ok(SqliteStore { conn })
    }

    pub fn schema_version(&self) -> Result<i32> {
        user_version(&self.conn)
    }

    fn query_entries(&self, sql: &str, params: impl rusqlite::Params) -> Result<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let entries = stmt
            .query_map(params, entry_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

impl EntryStore for SqliteStore {
    fn add_or_update(&self, entry: &mut JournalEntry) -> Result<bool> {
        let tags = entry.tags.to_string();
        if entry.is_persisted() {
            let count = self.conn.execute(
                "UPDATE entries SET content = ?1, mood = ?2, tags = ?3, date = ?4 WHERE id = ?5",
                params![entry.content, entry.mood, tags, entry.date, entry.id],
            )?;
            debug!("updated entry #{} ({} row(s))", entry.id, count);
            Ok(count > 0)
        } else {
            self.conn.execute(
                "INSERT INTO entries (content, mood, tags, date) VALUES (?1, ?2, ?3, ?4)",
                params![entry.content, entry.mood, tags, entry.date],
            )?;
            entry.id = self.conn.last_insert_rowid();
            debug!("inserted entry #{}", entry.id);
            Ok(true)
        }
    }

    fn get_by_id(&self, id: i64) -> Result<Option<JournalEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("SELECT {} FROM entries WHERE id = ?", ENTRY_COLUMNS),
                [id],
                entry_from_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn get_by_date(&self, day: i64) -> Result<Vec<JournalEntry>> {
        let start = start_of_day(day);
        self.query_entries(
            &format!(
                "SELECT {} FROM entries WHERE date >= ?1 AND date < ?2 ORDER BY date DESC, id DESC",
                ENTRY_COLUMNS
            ),
            params![start, start + DAY_MILLIS],
        )
    }

    fn get_in_range(&self, start: i64, end: i64) -> Result<Option<JournalEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM entries WHERE date BETWEEN ?1 AND ?2 ORDER BY id LIMIT 1",
                    ENTRY_COLUMNS
                ),
                params![start, end],
                entry_from_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn get_all(&self) -> Result<Vec<JournalEntry>> {
        self.query_entries(
            &format!("SELECT {} FROM entries ORDER BY date DESC, id DESC", ENTRY_COLUMNS),
            [],
        )
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let count = self.conn.execute("DELETE FROM entries WHERE id = ?", [id])?;
        debug!("delete entry #{} ({} row(s))", id, count);
        Ok(count > 0)
    }

    fn delete_range(&self, start: i64, end: i64) -> Result<usize> {
        let count = self
            .conn
            .execute("DELETE FROM entries WHERE id BETWEEN ?1 AND ?2", [start, end])?;
        debug!("delete entries #{}-#{} ({} row(s))", start, end, count);
        Ok(count)
    }

    fn search(&self, query: &str) -> Result<Vec<JournalEntry>> {
        let patterns = SearchPatterns::new(query);
        self.query_entries(
            &format!(
                "SELECT {} FROM entries
                 WHERE casefold(content) LIKE casefold(?1) ESCAPE '\\'
                    OR casefold(tags) LIKE casefold(?1) ESCAPE '\\'
                    OR casefold(entry_date(date)) LIKE casefold(?2) ESCAPE '\\'
                 ORDER BY date DESC, id DESC",
                ENTRY_COLUMNS
            ),
            params![patterns.text, patterns.date],
        )
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    let tags: Option<String> = row.get(3)?;
    Ok(JournalEntry {
        id: row.get(0)?,
        content: row.get(1)?,
        mood: row.get(2)?,
        tags: Tags::parse(tags.as_deref().unwrap_or_default()),
        date: row.get(4)?,
    })
}

fn user_version(conn: &Connection) -> Result<i32> {
    let version = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version)
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Creates the entries table or upgrades an older one. Never drops data.
///
/// The table's shape decides what to run, not the stored version alone, so an
/// unversioned table from an old build still gets its `tags` column. The
/// change and the version bump commit together.
fn migrate(conn: &Connection) -> Result<()> {
    let version = user_version(conn)?;
    if version > SCHEMA_VERSION {
        return Err(MoodlogError::UnsupportedSchema(version));
    }
    if version == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    if !table_exists(&tx, "entries")? {
        tx.execute_batch(
            "CREATE TABLE entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                content TEXT NOT NULL,
                mood INTEGER DEFAULT 0,
                tags TEXT,
                date INTEGER NOT NULL
            );",
        )?;
        info!("created entries table");
    } else if !has_column(&tx, "entries", "tags")? {
        tx.execute_batch("ALTER TABLE entries ADD COLUMN tags TEXT DEFAULT '';")?;
        info!("migrated entries table from version {} to 2", version);
    }
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    Ok(())
}
