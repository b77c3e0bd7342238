//! Data types for Subsonic API responses.
//!
//! These are deserialized from fields of the decoded
//! [`Payload`](crate::envelope::Payload). Field names follow Rust
//! conventions (`snake_case`); the API uses camelCase. List fields the
//! server omits when empty default to an empty `Vec`.
//!
//! IDs are strings in the protocol but some servers send numbers; both are
//! accepted and stored as `String`.

use serde::{Deserialize, Deserializer, Serialize};

/// Software license status.
///
/// Returned by [`SubsonicClient::license`](crate::SubsonicClient::license).
/// Open-source servers always report a valid license.
///
/// API JSON path: `subsonic-response.license`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// ISO 8601 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_expires: Option<String>,
    /// ISO 8601 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_expires: Option<String>,
}

/// A top-level music folder configured on the server.
///
/// API JSON path: `subsonic-response.musicFolders.musicFolder[]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicFolder {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One letter of the ID3 artist index (`A`, `B`, ..., `#`).
///
/// API JSON path: `subsonic-response.artists.index[]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistIndex {
    pub name: String,
    #[serde(rename = "artist", default)]
    pub artists: Vec<Artist>,
}

/// An artist, organized by ID3 tags.
///
/// Returned in [`ArtistIndex`] and [`SearchResult`] without albums, and by
/// [`SubsonicClient::artist`](crate::SubsonicClient::artist) with `albums`
/// populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub album_count: u64,
    /// Timestamp the current user starred this artist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starred: Option<String>,
    #[serde(rename = "album", default)]
    pub albums: Vec<Album>,
}

/// An album, organized by ID3 tags.
///
/// `songs` is only populated by
/// [`SubsonicClient::album`](crate::SubsonicClient::album).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub artist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub song_count: u64,
    /// Total duration in seconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "song", default)]
    pub songs: Vec<Song>,
}

/// A song (a `Child` entry in protocol terms).
///
/// Returned by [`SubsonicClient::song`](crate::SubsonicClient::song) and
/// inside [`Album`], [`Playlist`] and [`SearchResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "de_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<String>,
    #[serde(default)]
    pub is_dir: bool,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Track number within the album.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    /// File size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// MIME type, e.g. `audio/flac`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// File extension, e.g. `flac`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// Bit rate in kbps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub album_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "de_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub artist_id: Option<String>,
}

/// A saved playlist.
///
/// `entries` is only populated by
/// [`SubsonicClient::playlist`](crate::SubsonicClient::playlist).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub song_count: u64,
    /// Total duration in seconds.
    #[serde(default)]
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    #[serde(rename = "entry", default)]
    pub entries: Vec<Song>,
}

/// Results of an ID3 search (`search3`).
///
/// API JSON path: `subsonic-response.searchResult3`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "artist", default)]
    pub artists: Vec<Artist>,
    #[serde(rename = "album", default)]
    pub albums: Vec<Album>,
    #[serde(rename = "song", default)]
    pub songs: Vec<Song>,
}

/// Page sizes and offsets for [`SubsonicClient::search`](crate::SubsonicClient::search).
///
/// Defaults match the server defaults: 20 of each kind, from offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPage {
    pub artist_count: u32,
    pub artist_offset: u32,
    pub album_count: u32,
    pub album_offset: u32,
    pub song_count: u32,
    pub song_offset: u32,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self {
            artist_count: 20,
            artist_offset: 0,
            album_count: 20,
            album_offset: 0,
            song_count: 20,
            song_offset: 0,
        }
    }
}

impl SearchPage {
    /// Same limit for every kind, starting at offset 0.
    pub fn limit(count: u32) -> Self {
        Self {
            artist_count: count,
            album_count: count,
            song_count: count,
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    RawId::deserialize(d).map(String::from)
}

fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(d)?.map(String::from))
}
