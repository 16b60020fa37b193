//! Batch driver: runs a file processor over every data file of a directory,
//! one transaction per file.

use super::error::EtlError;
use super::locator::find_files;
use super::stats::{FileStats, LoadSummary};
use crate::warehouse::{Warehouse, WarehouseWriter};
use std::path::Path;
use tracing::{debug, info};

/// Process every `extension` file under `root` with `func`.
///
/// Each file is committed as soon as it is processed. The first failing file
/// is rolled back and its error returned; files committed before it stay in
/// the warehouse, and since every insert ignores conflicts the whole batch
/// can simply be run again.
pub fn process_data<F>(
    warehouse: &mut Warehouse,
    root: &Path,
    extension: &str,
    mut func: F,
) -> Result<LoadSummary, EtlError>
where
    F: FnMut(&dyn WarehouseWriter, &Path) -> Result<FileStats, EtlError>,
{
    let files = find_files(root, extension);
    let num_files = files.len();
    info!("{} files found in {}", num_files, root.display());

    let mut summary = LoadSummary {
        files_found: num_files,
        ..Default::default()
    };

    for (i, datafile) in files.iter().enumerate() {
        debug!("Processing {:?}", datafile);
        let stats = warehouse.in_transaction(|writer| func(writer, datafile))?;
        summary.add_file(&stats);
        info!("{}/{} files processed.", i + 1, num_files);
    }

    Ok(summary)
}
