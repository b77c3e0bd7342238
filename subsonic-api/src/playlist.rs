//! Playlist APIs.
//!
//! ## `playlists` — `GET /rest/getPlaylists`
//!
//! Response: `{ "playlists": { "playlist": [ { "id": "1", "name": "Mix", ... } ] } }`
//!
//! ## `playlist` — `GET /rest/getPlaylist?id=1`
//!
//! Response:
//! ```json
//! {
//!   "subsonic-response": {
//!     "status": "ok",
//!     "playlist": {
//!       "id": "1", "name": "Mix", "owner": "alice", "public": false,
//!       "songCount": 2, "duration": 480,
//!       "entry": [ { "id": "3", "title": "...", "duration": 240 }, ... ]
//!     }
//!   }
//! }
//! ```
//!
//! ## `create_playlist` — `GET /rest/createPlaylist?name=Mix&songId=3&songId=4`
//!
//! `songId` is repeated once per song. Servers speaking 1.14+ echo the new
//! playlist back; at 1.8.0 the response is empty, so nothing is returned.
//!
//! ## `delete_playlist` — `GET /rest/deletePlaylist?id=1`

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::types::Playlist;
use serde::Deserialize;

#[derive(Deserialize)]
struct Playlists {
    #[serde(rename = "playlist", default)]
    playlists: Vec<Playlist>,
}

impl SubsonicClient {
    /// List the playlists visible to the current user.
    pub fn playlists(&self) -> Result<Vec<Playlist>> {
        let list: Playlists = self.get("getPlaylists", &[])?.field("playlists")?;
        Ok(list.playlists)
    }

    /// Get a playlist with its entries.
    pub fn playlist(&self, id: &str) -> Result<Playlist> {
        self.get("getPlaylist", &[("id", id)])?.field("playlist")
    }

    /// Create a playlist containing `song_ids` in order.
    pub fn create_playlist(&self, name: &str, song_ids: &[&str]) -> Result<()> {
        let mut params = Vec::with_capacity(song_ids.len() + 1);
        params.push(("name", name));
        params.extend(song_ids.iter().map(|id| ("songId", *id)));
        self.get("createPlaylist", &params)?;
        Ok(())
    }

    /// Delete a playlist owned by the current user.
    pub fn delete_playlist(&self, id: &str) -> Result<()> {
        self.get("deletePlaylist", &[("id", id)])?;
        Ok(())
    }
}
