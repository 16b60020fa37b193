//! Row models for the warehouse tables.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Text representation of `start_time` columns.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Row of the time dimension. Every field is derived from `start_time`.
///
/// `week` is the ISO-8601 week number and `weekday` counts from Monday = 0
/// to Sunday = 6.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeEntry {
    pub start_time: DateTime<Utc>,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

impl TimeEntry {
    pub fn from_timestamp(start_time: DateTime<Utc>) -> Self {
        TimeEntry {
            start_time,
            hour: start_time.hour(),
            day: start_time.day(),
            week: start_time.iso_week().week(),
            month: start_time.month(),
            year: start_time.year(),
            weekday: start_time.weekday().num_days_from_monday(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub level: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Songplay {
    pub start_time: DateTime<Utc>,
    pub user_id: i64,
    pub level: Option<String>,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// Song and artist ids resolved from a played song title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}

/// Row counts of the five warehouse tables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub songplays: usize,
    pub users: usize,
    pub songs: usize,
    pub artists: usize,
    pub time: usize,
}
