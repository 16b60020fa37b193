//! Sparkify ETL Library
//!
//! Loads song-metadata files and user-activity log files into a SQLite star
//! schema. The binaries are thin wrappers around these modules.

pub mod config;
pub mod etl;
pub mod sqlite_persistence;
pub mod warehouse;

pub use etl::{process_data, process_log_file, process_song_file, EtlError, LoadSummary};
pub use warehouse::{Statements, Warehouse, WarehouseWriter};
