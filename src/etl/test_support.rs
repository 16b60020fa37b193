//! In-memory `WarehouseWriter` that records every write.

use crate::warehouse::{Artist, Song, SongMatch, Songplay, TimeEntry, User, WarehouseWriter};
use std::cell::RefCell;

#[derive(Default)]
pub struct RecordingWriter {
    pub songs: RefCell<Vec<Song>>,
    pub artists: RefCell<Vec<Artist>>,
    pub times: RefCell<Vec<TimeEntry>>,
    pub users: RefCell<Vec<User>>,
    pub songplays: RefCell<Vec<Songplay>>,
    pub lookups: RefCell<Vec<String>>,
}

impl WarehouseWriter for RecordingWriter {
    fn insert_song(&self, song: &Song) -> rusqlite::Result<bool> {
        self.songs.borrow_mut().push(song.clone());
        Ok(true)
    }

    fn insert_artist(&self, artist: &Artist) -> rusqlite::Result<bool> {
        self.artists.borrow_mut().push(artist.clone());
        Ok(true)
    }

    fn insert_time(&self, entry: &TimeEntry) -> rusqlite::Result<bool> {
        self.times.borrow_mut().push(entry.clone());
        Ok(true)
    }

    fn insert_user(&self, user: &User) -> rusqlite::Result<bool> {
        self.users.borrow_mut().push(user.clone());
        Ok(true)
    }

    fn insert_songplay(&self, songplay: &Songplay) -> rusqlite::Result<bool> {
        self.songplays.borrow_mut().push(songplay.clone());
        Ok(true)
    }

    fn find_song(&self, title: &str) -> rusqlite::Result<Option<SongMatch>> {
        self.lookups.borrow_mut().push(title.to_string());
        Ok(self
            .songs
            .borrow()
            .iter()
            .find(|song| song.title == title)
            .map(|song| SongMatch {
                song_id: song.song_id.clone(),
                artist_id: song.artist_id.clone(),
            }))
    }
}
