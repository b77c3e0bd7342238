//! Search API.
//!
//! Endpoint: `GET /rest/search3`
//!
//! Request parameters:
//! - `query` — search keyword
//! - `artistCount` / `artistOffset` — artist page (default 20 / 0)
//! - `albumCount` / `albumOffset` — album page (default 20 / 0)
//! - `songCount` / `songOffset` — song page (default 20 / 0)
//!
//! Response JSON:
//! ```json
//! {
//!   "subsonic-response": {
//!     "status": "ok",
//!     "searchResult3": {
//!       "artist": [ { "id": "1", "name": "...", "albumCount": 3 } ],
//!       "album":  [ { "id": "2", "name": "...", "artist": "..." } ],
//!       "song":   [ { "id": "3", "title": "...", "duration": 240 } ]
//!     }
//!   }
//! }
//! ```
//!
//! Empty kinds are omitted by the server.

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::types::{SearchPage, SearchResult};

impl SubsonicClient {
    /// Search artists, albums and songs by ID3 tags.
    pub fn search(&self, query: &str, page: SearchPage) -> Result<SearchResult> {
        let counts = [
            page.artist_count.to_string(),
            page.artist_offset.to_string(),
            page.album_count.to_string(),
            page.album_offset.to_string(),
            page.song_count.to_string(),
            page.song_offset.to_string(),
        ];
        let params = [
            ("query", query),
            ("artistCount", counts[0].as_str()),
            ("artistOffset", counts[1].as_str()),
            ("albumCount", counts[2].as_str()),
            ("albumOffset", counts[3].as_str()),
            ("songCount", counts[4].as_str()),
            ("songOffset", counts[5].as_str()),
        ];
        self.get("search3", &params)?.field("searchResult3")
    }
}
