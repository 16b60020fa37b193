//! Log file processing.
//!
//! A log file is an ordered sequence of activity records. Three row sets are
//! derived from it and written in this order: time entries, users, then
//! songplays, so that the dimensions a songplay refers to are written first.

use super::error::EtlError;
use super::jsonl;
use super::records::LogRecord;
use super::stats::FileStats;
use crate::warehouse::{Songplay, TimeEntry, User, WarehouseWriter};
use std::path::Path;
use tracing::debug;

pub fn process_log_file(writer: &dyn WarehouseWriter, path: &Path) -> Result<FileStats, EtlError> {
    let records: Vec<LogRecord> = jsonl::read_records(path)?;
    let mut stats = FileStats {
        records: records.len(),
        ..Default::default()
    };

    insert_time_data(writer, &records, &mut stats)?;
    insert_user_data(writer, path, &records, &mut stats)?;
    insert_songplay_data(writer, &records, &mut stats)?;

    debug!(
        "{:?}: {} records, {} rows inserted, {} ignored",
        path, stats.records, stats.rows_inserted, stats.rows_ignored
    );
    Ok(stats)
}

/// One time entry per playback record. Duplicates are left to the table's
/// conflict-ignore.
pub fn time_entries(records: &[LogRecord]) -> impl Iterator<Item = TimeEntry> + '_ {
    records
        .iter()
        .filter(|record| record.is_song_play())
        .map(|record| TimeEntry::from_timestamp(record.start_time))
}

/// One user row per record that carries a user id, across all pages.
pub fn users(path: &Path, records: &[LogRecord]) -> Result<Vec<User>, EtlError> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| record.user_id.map(|user_id| (index, user_id, record)))
        .map(|(index, user_id, record)| -> Result<User, EtlError> {
            let required = |value: &Option<String>, field: &'static str| {
                value.clone().ok_or_else(|| EtlError::MissingField {
                    path: path.to_path_buf(),
                    index,
                    field,
                })
            };
            Ok(User {
                user_id,
                first_name: required(&record.first_name, "firstName")?,
                last_name: required(&record.last_name, "lastName")?,
                gender: record.gender.clone(),
                level: record.level.clone(),
            })
        })
        .collect()
}

fn insert_time_data(
    writer: &dyn WarehouseWriter,
    records: &[LogRecord],
    stats: &mut FileStats,
) -> Result<(), EtlError> {
    for entry in time_entries(records) {
        stats.record_write(writer.insert_time(&entry)?);
    }
    Ok(())
}

fn insert_user_data(
    writer: &dyn WarehouseWriter,
    path: &Path,
    records: &[LogRecord],
    stats: &mut FileStats,
) -> Result<(), EtlError> {
    for user in users(path, records)? {
        stats.record_write(writer.insert_user(&user)?);
    }
    Ok(())
}

fn insert_songplay_data(
    writer: &dyn WarehouseWriter,
    records: &[LogRecord],
    stats: &mut FileStats,
) -> Result<(), EtlError> {
    for record in records {
        let Some(user_id) = record.playing_user_id() else {
            continue;
        };

        let song_match = match &record.song {
            Some(title) => writer.find_song(title)?,
            None => None,
        };
        if song_match.is_none() {
            stats.unmatched_songs += 1;
        }
        let (song_id, artist_id) = match song_match {
            Some(m) => (Some(m.song_id), Some(m.artist_id)),
            None => (None, None),
        };

        let songplay = Songplay {
            start_time: record.start_time,
            user_id,
            level: record.level.clone(),
            song_id,
            artist_id,
            session_id: record.session_id,
            location: record.location.clone(),
            user_agent: record.user_agent.clone(),
        };
        stats.record_write(writer.insert_songplay(&songplay)?);
    }
    Ok(())
}
