//! DML statement templates for the warehouse tables.
//!
//! A `Statements` value is built once at startup and handed to every writer,
//! so all SQL used by the load path lives in one place.

/// Insert and lookup statements. Every insert is a no-op on conflict.
#[derive(Clone, Debug)]
pub struct Statements {
    pub songplay_insert: &'static str,
    pub user_insert: &'static str,
    pub song_insert: &'static str,
    pub artist_insert: &'static str,
    pub time_insert: &'static str,
    pub song_select: &'static str,
}

impl Statements {
    pub fn new() -> Self {
        Statements {
            songplay_insert: "INSERT INTO songplays (
                    start_time, user_id, level, song_id, artist_id, session_id, location, user_agent
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT DO NOTHING",
            user_insert: "INSERT INTO users (
                    user_id, first_name, last_name, gender, level
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT DO NOTHING",
            song_insert: "INSERT INTO songs (
                    song_id, title, artist_id, year, duration
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT DO NOTHING",
            artist_insert: "INSERT INTO artists (
                    artist_id, name, location, latitude, longitude
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT DO NOTHING",
            time_insert: "INSERT INTO time (
                    start_time, hour, day, week, month, year, weekday
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT DO NOTHING",
            song_select: "SELECT songs.song_id, songs.artist_id
                FROM songs
                JOIN artists ON songs.artist_id = artists.artist_id
                WHERE songs.title = ?1
                LIMIT 1",
        }
    }
}

impl Default for Statements {
    fn default() -> Self {
        Self::new()
    }
}
