//! SQLite persistence for per-guild settings and moderation notes.
//!
//! A single connection is shared behind a mutex. Every method holds the lock for one short
//! statement, so none of them should be called while a guard is alive across an `.await`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use rusqlite::{Connection, OptionalExtension, Result as SqlResult, params};
use serenity::{GuildId, UserId};

/// A note left about a member by a moderator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub user_id: UserId,
    pub author_id: UserId,
    pub text: String,
    pub added_time: DateTime<Utc>,
}

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens (or creates) the database file and makes sure the tables exist.
    pub fn open(path: impl AsRef<Path>) -> SqlResult<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> SqlResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> SqlResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS prefixes (
                guild_id INTEGER PRIMARY KEY,
                prefix TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                guild_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                text TEXT NOT NULL,
                added_time INTEGER NOT NULL,
                author_id INTEGER NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // A panic while holding the lock cannot leave a statement half applied.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Round-trips a trivial query.
    pub fn ping(&self) -> SqlResult<()> {
        self.conn().query_row("SELECT 1", [], |_| Ok(()))
    }

    pub fn guild_prefix(&self, guild_id: GuildId) -> SqlResult<Option<String>> {
        self.conn()
            .query_row(
                "SELECT prefix FROM prefixes WHERE guild_id = ?1",
                params![guild_id.get() as i64],
                |row| row.get(0),
            )
            .optional()
    }

    pub fn set_guild_prefix(&self, guild_id: GuildId, prefix: &str) -> SqlResult<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO prefixes (guild_id, prefix) VALUES (?1, ?2)",
            params![guild_id.get() as i64, prefix],
        )?;
        Ok(())
    }

    /// Stores a note and returns its id.
    pub fn add_note(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        author_id: UserId,
        text: &str,
        added_time: DateTime<Utc>,
    ) -> SqlResult<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO notes (guild_id, user_id, text, added_time, author_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                guild_id.get() as i64,
                user_id.get() as i64,
                text,
                added_time.timestamp(),
                author_id.get() as i64
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn note(&self, guild_id: GuildId, id: i64) -> SqlResult<Option<Note>> {
        self.conn()
            .query_row(
                "SELECT id, user_id, author_id, text, added_time FROM notes
                 WHERE guild_id = ?1 AND id = ?2",
                params![guild_id.get() as i64, id],
                note_from_row,
            )
            .optional()
    }

    /// Deletes one note. Returns whether it existed.
    pub fn remove_note(&self, guild_id: GuildId, id: i64) -> SqlResult<bool> {
        let removed = self.conn().execute(
            "DELETE FROM notes WHERE guild_id = ?1 AND id = ?2",
            params![guild_id.get() as i64, id],
        )?;
        Ok(removed > 0)
    }

    /// All notes about `user_id`, oldest first.
    pub fn notes_for(&self, guild_id: GuildId, user_id: UserId) -> SqlResult<Vec<Note>> {
        let conn = self.conn();
        let mut statement = conn.prepare(
            "SELECT id, user_id, author_id, text, added_time FROM notes
             WHERE guild_id = ?1 AND user_id = ?2 ORDER BY id",
        )?;
        let notes: SqlResult<Vec<Note>> = statement
            .query_map(
                params![guild_id.get() as i64, user_id.get() as i64],
                note_from_row,
            )?
            .collect();
        notes
    }

    /// Deletes every note about `user_id`, returning how many were removed.
    pub fn clear_notes(&self, guild_id: GuildId, user_id: UserId) -> SqlResult<usize> {
        self.conn().execute(
            "DELETE FROM notes WHERE guild_id = ?1 AND user_id = ?2",
            params![guild_id.get() as i64, user_id.get() as i64],
        )
    }
}

fn note_from_row(row: &rusqlite::Row<'_>) -> SqlResult<Note> {
    let added: i64 = row.get(4)?;
    Ok(Note {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, i64>(1)? as u64),
        author_id: UserId::new(row.get::<_, i64>(2)? as u64),
        text: row.get(3)?,
        added_time: DateTime::from_timestamp(added, 0).unwrap_or_default(),
    })
}
