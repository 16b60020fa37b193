//! Typed source records, one struct per file kind.
//!
//! Every key a transformer reads must be present in the JSON record. Keys
//! whose value may legitimately be null are `Option`s; they go through
//! `deserialize_with` so that a missing key is still rejected.

use crate::warehouse::{Artist, Song};
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Page type of a log record that stands for an actual playback.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// A song-metadata record, one per song file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
    pub artist_name: String,
    #[serde(deserialize_with = "nullable")]
    pub artist_location: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub artist_latitude: Option<f64>,
    #[serde(deserialize_with = "nullable")]
    pub artist_longitude: Option<f64>,
}

impl SongRecord {
    pub fn song(&self) -> Song {
        Song {
            song_id: self.song_id.clone(),
            title: self.title.clone(),
            artist_id: self.artist_id.clone(),
            year: self.year,
            duration: self.duration,
        }
    }

    pub fn artist(&self) -> Artist {
        Artist {
            artist_id: self.artist_id.clone(),
            name: self.artist_name.clone(),
            location: self.artist_location.clone(),
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        }
    }
}

/// A user-activity record from a log file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    #[serde(rename = "ts", deserialize_with = "epoch_millis")]
    pub start_time: DateTime<Utc>,
    pub page: String,
    /// `None` for null or empty-string ids (logged-out users).
    #[serde(deserialize_with = "optional_id")]
    pub user_id: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub level: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub song: Option<String>,
    #[serde(deserialize_with = "optional_id")]
    pub session_id: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub location: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub user_agent: Option<String>,
}

impl LogRecord {
    pub fn is_song_play(&self) -> bool {
        self.page == NEXT_SONG_PAGE
    }

    /// User id usable for a songplay: present and non-zero.
    pub fn playing_user_id(&self) -> Option<i64> {
        self.user_id.filter(|id| *id != 0)
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

fn epoch_millis<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = i64::deserialize(deserializer)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| D::Error::custom(format!("timestamp {} out of range", millis)))
}

/// Identifiers show up both as JSON numbers and as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

fn parse_id<E: serde::de::Error>(raw: Option<RawId>) -> Result<Option<i64>, E> {
    match raw {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid identifier {:?}", text)))
        }
    }
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    parse_id(Option::<RawId>::deserialize(deserializer)?)
}
