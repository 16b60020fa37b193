//! SQLite-backed warehouse.
//!
//! `Warehouse` owns the single connection used for a whole run. Writes go
//! through `SqliteWriter`, which borrows either the connection or an open
//! transaction together with the shared `Statements`.

use super::models::*;
use super::schema::{latest_schema, table_names};
use super::statements::Statements;
use super::trait_def::WarehouseWriter;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

pub struct Warehouse {
    conn: Connection,
    statements: Statements,
}

fn create_or_validate_schema(conn: &Connection) -> Result<()> {
    let table_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |r| r.get(0),
    )?;

    let schema = latest_schema();
    if table_count == 0 {
        info!("Creating warehouse schema at version {}", schema.version);
        schema.create(conn)?;
        return Ok(());
    }

    schema
        .validate(conn)
        .context("Existing database does not match the warehouse schema")
}

impl Warehouse {
    /// Open (or create) the warehouse database at `db_path`.
    pub fn open<P: AsRef<Path>>(db_path: P, statements: Statements) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open warehouse database {:?}", db_path))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        create_or_validate_schema(&conn)?;
        Ok(Warehouse { conn, statements })
    }

    /// Open the database at `db_path` and replace whatever warehouse tables
    /// it holds with empty ones. Existing tables are not validated.
    pub fn open_fresh<P: AsRef<Path>>(db_path: P, statements: Statements) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open warehouse database {:?}", db_path))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        let mut warehouse = Warehouse { conn, statements };
        warehouse.reset()?;
        Ok(warehouse)
    }

    pub fn open_in_memory(statements: Statements) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_or_validate_schema(&conn)?;
        Ok(Warehouse { conn, statements })
    }

    /// Writer bound to the bare connection, each insert autocommits.
    pub fn writer(&self) -> SqliteWriter<'_> {
        SqliteWriter::new(&self.conn, &self.statements)
    }

    /// Run `f` with a writer bound to a fresh transaction.
    ///
    /// The transaction is committed when `f` succeeds. On error it is
    /// dropped uncommitted, rolling back everything `f` wrote.
    pub fn in_transaction<T, E, F>(&mut self, f: F) -> std::result::Result<T, E>
    where
        E: From<rusqlite::Error>,
        F: FnOnce(&SqliteWriter<'_>) -> std::result::Result<T, E>,
    {
        let tx = self.conn.transaction()?;
        let out = f(&SqliteWriter::new(&tx, &self.statements))?;
        tx.commit()?;
        Ok(out)
    }

    /// Drop all warehouse tables and create them again, empty.
    pub fn reset(&mut self) -> Result<()> {
        let schema = latest_schema();
        let tx = self.conn.transaction()?;
        schema.drop_tables(&tx)?;
        schema.create(&tx)?;
        tx.commit()?;
        info!("Warehouse tables dropped and recreated");
        Ok(())
    }

    pub fn counts(&self) -> Result<TableCounts> {
        let mut counts = TableCounts::default();
        for table in table_names() {
            let count: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", table),
                params![],
                |r| r.get(0),
            )?;
            let count = count as usize;
            match table {
                "songplays" => counts.songplays = count,
                "users" => counts.users = count,
                "songs" => counts.songs = count,
                "artists" => counts.artists = count,
                "time" => counts.time = count,
                other => debug!("Not counting unknown table {}", other),
            }
        }
        Ok(counts)
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close warehouse database")
    }
}

pub struct SqliteWriter<'a> {
    conn: &'a Connection,
    statements: &'a Statements,
}

impl<'a> SqliteWriter<'a> {
    pub fn new(conn: &'a Connection, statements: &'a Statements) -> Self {
        SqliteWriter { conn, statements }
    }
}

impl WarehouseWriter for SqliteWriter<'_> {
    fn insert_song(&self, song: &Song) -> rusqlite::Result<bool> {
        let mut stmt = self.conn.prepare_cached(self.statements.song_insert)?;
        let changed = stmt.execute(params![
            song.song_id,
            song.title,
            song.artist_id,
            song.year,
            song.duration
        ])?;
        Ok(changed > 0)
    }

    fn insert_artist(&self, artist: &Artist) -> rusqlite::Result<bool> {
        let mut stmt = self.conn.prepare_cached(self.statements.artist_insert)?;
        let changed = stmt.execute(params![
            artist.artist_id,
            artist.name,
            artist.location,
            artist.latitude,
            artist.longitude
        ])?;
        Ok(changed > 0)
    }

    fn insert_time(&self, entry: &TimeEntry) -> rusqlite::Result<bool> {
        let mut stmt = self.conn.prepare_cached(self.statements.time_insert)?;
        let changed = stmt.execute(params![
            format_timestamp(&entry.start_time),
            entry.hour,
            entry.day,
            entry.week,
            entry.month,
            entry.year,
            entry.weekday
        ])?;
        Ok(changed > 0)
    }

    fn insert_user(&self, user: &User) -> rusqlite::Result<bool> {
        let mut stmt = self.conn.prepare_cached(self.statements.user_insert)?;
        let changed = stmt.execute(params![
            user.user_id,
            user.first_name,
            user.last_name,
            user.gender,
            user.level
        ])?;
        Ok(changed > 0)
    }

    fn insert_songplay(&self, songplay: &Songplay) -> rusqlite::Result<bool> {
        let mut stmt = self.conn.prepare_cached(self.statements.songplay_insert)?;
        let changed = stmt.execute(params![
            format_timestamp(&songplay.start_time),
            songplay.user_id,
            songplay.level,
            songplay.song_id,
            songplay.artist_id,
            songplay.session_id,
            songplay.location,
            songplay.user_agent
        ])?;
        Ok(changed > 0)
    }

    fn find_song(&self, title: &str) -> rusqlite::Result<Option<SongMatch>> {
        let mut stmt = self.conn.prepare_cached(self.statements.song_select)?;
        stmt.query_row(params![title], |row| {
            Ok(SongMatch {
                song_id: row.get(0)?,
                artist_id: row.get(1)?,
            })
        })
        .optional()
    }
}
