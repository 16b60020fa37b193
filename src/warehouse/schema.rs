//! SQLite schema definitions for the sparkify star schema.
//!
//! One fact table (`songplays`) and four dimension tables (`users`, `songs`,
//! `artists`, `time`). No foreign keys are declared: songplays coming from
//! non-playback pages have no matching `time` row.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

// =============================================================================
// Fact Table
// =============================================================================

/// Songplays - one row per log event of an identified user
const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!("songplay_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("start_time", &SqlType::Text, non_null = true),
        sqlite_column!("user_id", &SqlType::Integer, non_null = true),
        sqlite_column!("level", &SqlType::Text),
        sqlite_column!("song_id", &SqlType::Text),
        sqlite_column!("artist_id", &SqlType::Text),
        sqlite_column!("session_id", &SqlType::Integer),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("user_agent", &SqlType::Text),
    ],
    indices: &[("idx_songplays_user", "user_id")],
    // Natural key of a log event, makes reloading a log file a no-op
    unique_constraints: &[&["start_time", "user_id", "session_id"]],
};

// =============================================================================
// Dimension Tables
// =============================================================================

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("first_name", &SqlType::Text, non_null = true),
        sqlite_column!("last_name", &SqlType::Text, non_null = true),
        sqlite_column!("gender", &SqlType::Text),
        sqlite_column!("level", &SqlType::Text),
    ],
    indices: &[],
    unique_constraints: &[],
};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!(
            "song_id",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("artist_id", &SqlType::Text, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("duration", &SqlType::Real, non_null = true),
    ],
    indices: &[("idx_songs_title", "title")],
    unique_constraints: &[&["title", "artist_id"]],
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
    indices: &[],
    unique_constraints: &[],
};

/// Time dimension, start_time is stored as `YYYY-MM-DD HH:MM:SS.fff` (UTC)
const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        sqlite_column!(
            "start_time",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("hour", &SqlType::Integer),
        sqlite_column!("day", &SqlType::Integer),
        sqlite_column!("week", &SqlType::Integer),
        sqlite_column!("month", &SqlType::Integer),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("weekday", &SqlType::Integer),
    ],
    indices: &[],
    unique_constraints: &[],
};

// =============================================================================
// Versioned Schema Definition
// =============================================================================

pub const WAREHOUSE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        SONGPLAYS_TABLE,
        USERS_TABLE,
        SONGS_TABLE,
        ARTISTS_TABLE,
        TIME_TABLE,
    ],
}];

/// Names of the five warehouse tables, in declaration order.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    latest_schema().tables.iter().map(|t| t.name)
}

pub fn latest_schema() -> &'static VersionedSchema {
    &WAREHOUSE_VERSIONED_SCHEMAS[WAREHOUSE_VERSIONED_SCHEMAS.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    #[test]
    fn test_schema_creates_successfully() {
        let conn = Connection::open_in_memory().unwrap();
        let schema = latest_schema();
        schema.create(&conn).unwrap();
        schema.validate(&conn).unwrap();
    }

    #[test]
    fn test_table_names() {
        let names: Vec<_> = table_names().collect();
        assert_eq!(names, vec!["songplays", "users", "songs", "artists", "time"]);
    }

    #[test]
    fn test_songs_unique_title_per_artist() {
        let conn = Connection::open_in_memory().unwrap();
        latest_schema().create(&conn).unwrap();

        conn.execute(
            "INSERT INTO songs VALUES ('S1', 'Title', 'A1', 2000, 120.5)",
            params![],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO songs VALUES ('S2', 'Title', 'A1', 2001, 99.0)",
            params![],
        );
        assert!(duplicate.is_err());

        conn.execute(
            "INSERT INTO songs VALUES ('S3', 'Title', 'A2', 2001, 99.0)",
            params![],
        )
        .unwrap();
    }

    #[test]
    fn test_songplay_id_is_assigned() {
        let conn = Connection::open_in_memory().unwrap();
        latest_schema().create(&conn).unwrap();

        conn.execute(
            "INSERT INTO songplays (start_time, user_id, session_id) VALUES ('2018-11-03 01:03:20.000', 7, 1)",
            params![],
        )
        .unwrap();
        let id: i64 = conn
            .query_row("SELECT songplay_id FROM songplays", [], |r| r.get(0))
            .unwrap();
        assert_eq!(id, 1);
    }
}
