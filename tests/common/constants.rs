// Song fixtures
pub const SONG_1_ID: &str = "SOUDSGM12AC9618304";
pub const SONG_1_TITLE: &str = "Insatiable (Instrumental Version)";
pub const SONG_2_ID: &str = "SOBLFFE12AF72AA5BA";
pub const SONG_2_TITLE: &str = "Scream";

// Artist fixtures
pub const ARTIST_1_ID: &str = "ARNTLGG11E2835DDB9";
pub const ARTIST_1_NAME: &str = "Clp";
pub const ARTIST_2_ID: &str = "ARJNIUY12298900C91";
pub const ARTIST_2_NAME: &str = "Adelitas Way";

// User fixtures
pub const USER_1_ID: i64 = 15;
pub const USER_2_ID: i64 = 26;

// 2018-11-03 01:03:20 UTC
pub const BASE_TS: i64 = 1541207000000;
