//! WarehouseWriter trait definition.
//!
//! File transformers only talk to the warehouse through this trait, the
//! loader hands them a writer bound to the current file's transaction.

use super::models::{Artist, Song, SongMatch, Songplay, TimeEntry, User};

/// Write access to the warehouse tables.
///
/// Every `insert_*` method returns `true` when a new row was stored and
/// `false` when the row conflicted with an existing key and was ignored.
pub trait WarehouseWriter {
    fn insert_song(&self, song: &Song) -> rusqlite::Result<bool>;

    fn insert_artist(&self, artist: &Artist) -> rusqlite::Result<bool>;

    fn insert_time(&self, entry: &TimeEntry) -> rusqlite::Result<bool>;

    fn insert_user(&self, user: &User) -> rusqlite::Result<bool>;

    fn insert_songplay(&self, songplay: &Songplay) -> rusqlite::Result<bool>;

    /// Resolve a played song title to its song and artist ids.
    ///
    /// Matching is exact on the title; `None` when no loaded song has it.
    fn find_song(&self, title: &str) -> rusqlite::Result<Option<SongMatch>>;
}
