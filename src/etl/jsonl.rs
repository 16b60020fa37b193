//! Newline-delimited JSON file reading.
//!
//! Records are read with serde_json's stream deserializer, so files holding
//! a single pretty-printed object are accepted as well.

use super::error::EtlError;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

fn open(path: &Path) -> Result<BufReader<File>, EtlError> {
    let file = File::open(path).map_err(|source| EtlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Parse every record of the file, in file order.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, EtlError> {
    serde_json::Deserializer::from_reader(open(path)?)
        .into_iter::<T>()
        .enumerate()
        .map(|(index, record)| {
            record.map_err(|source| EtlError::Parse {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

/// Parse only the first record of the file.
///
/// Anything after the first record is not parsed; a warning is logged when
/// more content follows.
pub fn read_first_record<T: DeserializeOwned>(path: &Path) -> Result<T, EtlError> {
    let mut stream = serde_json::Deserializer::from_reader(open(path)?).into_iter::<T>();
    let first = match stream.next() {
        Some(record) => record.map_err(|source| EtlError::Parse {
            path: path.to_path_buf(),
            index: 0,
            source,
        })?,
        None => return Err(EtlError::EmptyFile(path.to_path_buf())),
    };
    if stream.next().is_some() {
        warn!("{:?} holds more than one record, only the first is used", path);
    }
    Ok(first)
}
