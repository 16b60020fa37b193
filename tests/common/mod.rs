//! Common test infrastructure
//!
//! Builds song-data and log-data directory trees in a temp dir, in the
//! layout of the sparkify dataset, and opens a warehouse next to them.

mod constants;
mod fixtures;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{anonymous_log_record, dump_tables, log_record, song_record, TestDataset};
