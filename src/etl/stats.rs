/// Counters for one processed file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileStats {
    pub records: usize,
    pub rows_inserted: usize,
    /// Rows dropped by the conflict-ignore policy.
    pub rows_ignored: usize,
    /// Songplays whose title did not match any loaded song.
    pub unmatched_songs: usize,
}

impl FileStats {
    pub fn record_write(&mut self, inserted: bool) {
        if inserted {
            self.rows_inserted += 1;
        } else {
            self.rows_ignored += 1;
        }
    }
}

/// Totals of a batch run over one data directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub files_found: usize,
    pub files_processed: usize,
    pub records: usize,
    pub rows_inserted: usize,
    pub rows_ignored: usize,
    pub unmatched_songs: usize,
}

impl LoadSummary {
    pub fn add_file(&mut self, stats: &FileStats) {
        self.files_processed += 1;
        self.records += stats.records;
        self.rows_inserted += stats.rows_inserted;
        self.rows_ignored += stats.rows_ignored;
        self.unmatched_songs += stats.unmatched_songs;
    }
}
