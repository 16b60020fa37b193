mod error;
pub mod jsonl;
mod loader;
mod locator;
mod log_file;
mod records;
mod song_file;
mod stats;
#[cfg(test)]
mod test_support;

pub use error::EtlError;
pub use loader::process_data;
pub use locator::find_files;
pub use log_file::{process_log_file, time_entries, users};
pub use records::{LogRecord, SongRecord, NEXT_SONG_PAGE};
pub use song_file::process_song_file;
pub use stats::{FileStats, LoadSummary};
