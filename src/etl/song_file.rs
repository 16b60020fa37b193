//! Song file processing: one song record becomes a song row and an artist row.

use super::error::EtlError;
use super::jsonl;
use super::records::SongRecord;
use super::stats::FileStats;
use crate::warehouse::WarehouseWriter;
use std::path::Path;

pub fn process_song_file(writer: &dyn WarehouseWriter, path: &Path) -> Result<FileStats, EtlError> {
    let record: SongRecord = jsonl::read_first_record(path)?;
    let mut stats = FileStats {
        records: 1,
        ..Default::default()
    };

    stats.record_write(writer.insert_song(&record.song())?);
    stats.record_write(writer.insert_artist(&record.artist())?);

    Ok(stats)
}
