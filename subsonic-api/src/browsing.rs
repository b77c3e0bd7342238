//! ID3 browsing APIs: artists, albums and songs.
//!
//! | Method    | Endpoint     | Payload field |
//! |-----------|--------------|---------------|
//! | `artists` | `getArtists` | `artists.index[]` |
//! | `artist`  | `getArtist`  | `artist` (with `album[]`) |
//! | `album`   | `getAlbum`   | `album` (with `song[]`) |
//! | `song`    | `getSong`    | `song` |
//!
//! Unknown IDs are reported by the server as code 70 ("not found").

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::types::{Album, Artist, ArtistIndex, Song};
use serde::Deserialize;

#[derive(Deserialize)]
struct Artists {
    #[serde(default)]
    index: Vec<ArtistIndex>,
}

impl SubsonicClient {
    /// Get all artists grouped by index letter, optionally restricted to
    /// one music folder.
    pub fn artists(&self, music_folder_id: Option<&str>) -> Result<Vec<ArtistIndex>> {
        let params: Vec<(&str, &str)> = music_folder_id
            .map(|id| ("musicFolderId", id))
            .into_iter()
            .collect();
        let artists: Artists = self.get("getArtists", &params)?.field("artists")?;
        Ok(artists.index)
    }

    /// Get an artist with their albums.
    pub fn artist(&self, id: &str) -> Result<Artist> {
        self.get("getArtist", &[("id", id)])?.field("artist")
    }

    /// Get an album with its songs.
    pub fn album(&self, id: &str) -> Result<Album> {
        self.get("getAlbum", &[("id", id)])?.field("album")
    }

    /// Get a single song.
    pub fn song(&self, id: &str) -> Result<Song> {
        self.get("getSong", &[("id", id)])?.field("song")
    }
}
