use super::constants::*;
use rusqlite::Connection;
use serde_json::{json, Value};
use sparkify_etl::{Statements, Warehouse};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestDataset {
    pub dir: TempDir,
}

impl TestDataset {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("song_data")).unwrap();
        fs::create_dir_all(dir.path().join("log_data")).unwrap();
        TestDataset { dir }
    }

    pub fn song_data(&self) -> PathBuf {
        self.dir.path().join("song_data")
    }

    pub fn log_data(&self) -> PathBuf {
        self.dir.path().join("log_data")
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("sparkify.db")
    }

    pub fn open_warehouse(&self) -> Warehouse {
        Warehouse::open(self.db_path(), Statements::new()).unwrap()
    }

    /// Writes a song file under `song_data/<relative>`.
    pub fn add_song_file(&self, relative: &str, song: Value) -> PathBuf {
        write_lines(&self.song_data().join(relative), &[song])
    }

    /// Writes a log file under `log_data/<relative>`.
    pub fn add_log_file(&self, relative: &str, records: &[Value]) -> PathBuf {
        write_lines(&self.log_data().join(relative), records)
    }

    /// Two songs by two artists, and one log file of five records: three
    /// playbacks (one of them anonymous) and two navigation events.
    pub fn standard() -> Self {
        let dataset = TestDataset::new();
        dataset.add_song_file(
            "A/A/A/TRAAABD128F429CF47.json",
            song_record(SONG_1_ID, SONG_1_TITLE, ARTIST_1_ID, ARTIST_1_NAME),
        );
        dataset.add_song_file(
            "A/B/C/TRABCAJ12903CDFCC2.json",
            song_record(SONG_2_ID, SONG_2_TITLE, ARTIST_2_ID, ARTIST_2_NAME),
        );
        dataset.add_log_file(
            "2018/11/2018-11-03-events.json",
            &[
                log_record(BASE_TS, "NextSong", json!("15"), Some(SONG_1_TITLE)),
                log_record(BASE_TS + 1000, "NextSong", json!("15"), Some("Not In Catalog")),
                anonymous_log_record(BASE_TS + 2000, "NextSong", Some(SONG_2_TITLE)),
                log_record(BASE_TS + 3000, "Home", json!("26"), None),
                log_record(BASE_TS + 4000, "Logout", json!("26"), None),
            ],
        );
        dataset
    }
}

fn write_lines(path: &Path, records: &[Value]) -> PathBuf {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let content = records
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

pub fn song_record(song_id: &str, title: &str, artist_id: &str, artist_name: &str) -> Value {
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": 266.39628,
        "year": 2009
    })
}

pub fn log_record(ts: i64, page: &str, user_id: Value, song: Option<&str>) -> Value {
    let (first_name, last_name) = match user_id.as_str() {
        Some("26") => ("Ryan", "Smith"),
        _ => ("Lily", "Koch"),
    };
    json!({
        "artist": null,
        "auth": "Logged In",
        "firstName": first_name,
        "gender": "F",
        "itemInSession": 0,
        "lastName": last_name,
        "length": null,
        "level": "paid",
        "location": "Chicago-Naperville-Elgin, IL-IN-WI",
        "method": "PUT",
        "page": page,
        "registration": 1541048010796.0,
        "sessionId": 818,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0 (X11; Linux x86_64)",
        "userId": user_id
    })
}

pub fn anonymous_log_record(ts: i64, page: &str, song: Option<&str>) -> Value {
    json!({
        "artist": null,
        "auth": "Logged Out",
        "firstName": null,
        "gender": null,
        "itemInSession": 0,
        "lastName": null,
        "length": null,
        "level": "free",
        "location": null,
        "method": "GET",
        "page": page,
        "registration": null,
        "sessionId": 52,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": null,
        "userId": ""
    })
}

/// Every row of every warehouse table, rendered as text and sorted, for
/// comparing full table contents across runs.
pub fn dump_tables(db_path: &Path) -> Vec<String> {
    let conn = Connection::open(db_path).unwrap();
    let mut rows = Vec::new();
    for table in sparkify_etl::warehouse::table_names() {
        let mut stmt = conn.prepare(&format!("SELECT * FROM {}", table)).unwrap();
        let column_count = stmt.column_count();
        let table_rows = stmt
            .query_map([], |row| {
                let mut values = Vec::with_capacity(column_count);
                for i in 0..column_count {
                    let value: rusqlite::types::Value = row.get(i)?;
                    values.push(format!("{:?}", value));
                }
                Ok(format!("{}: {}", table, values.join(", ")))
            })
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap();
        rows.extend(table_rows);
    }
    rows.sort();
    rows
}
