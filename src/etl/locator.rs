//! Data file discovery.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Every regular file under `root` (recursively) with the given extension.
///
/// Paths are absolute and sorted by file name within each directory, so the
/// order is stable for a given directory snapshot. A missing or empty root
/// yields no files; unreadable entries are skipped.
pub fn find_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let root = match root.canonicalize() {
        Ok(root) => root,
        Err(e) => {
            warn!("Cannot access data directory {:?}: {}", root, e);
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file()
                    && entry.path().extension() == Some(OsStr::new(extension))
                {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!("Error accessing entry: {}", e);
            }
        }
    }

    debug!("{} .{} files under {:?}", files.len(), extension, root);
    files
}
