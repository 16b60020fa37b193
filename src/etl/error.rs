use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the processing of a data file.
///
/// None of them are recovered from: the file's transaction is rolled back
/// and the error ends the batch.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, a missing key, a value of the wrong type or a
    /// non-numeric identifier.
    #[error("Malformed record #{index} in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("No record found in {0:?}")]
    EmptyFile(PathBuf),

    /// A value that the derived row cannot do without is null.
    #[error("Record #{index} in {path:?} has no value for required field `{field}`")]
    MissingField {
        path: PathBuf,
        index: usize,
        field: &'static str,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
