//! Subsonic API client library.
//!
//! Provides authenticated access to Subsonic-compatible music servers
//! (Subsonic, Navidrome, Airsonic, Gonic, ...) over the JSON flavour of the
//! REST API. Playback is out of scope: media endpoints hand back the raw
//! byte stream.
//!
//! # Authentication
//!
//! The password never leaves the process. Each
//! [`authenticate`](SubsonicClient::authenticate) draws a fresh random salt
//! and sends `md5(password + salt)` alongside it, then verifies the pair
//! with a `ping`.
//!
//! ```no_run
//! use subsonic_api::SubsonicClient;
//!
//! let client = SubsonicClient::new("https://music.example.com", "alice", "my-player")?;
//! client.authenticate("sesame")?;
//! let license = client.license()?;
//! println!("license valid: {}", license.valid);
//! # Ok::<(), subsonic_api::SubsonicError>(())
//! ```
//!
//! Endpoints without a typed wrapper are reachable through
//! [`SubsonicClient::get`], which returns the decoded
//! [`Payload`](envelope::Payload):
//!
//! ```no_run
//! # let client = subsonic_api::SubsonicClient::new("http://localhost:4533", "u", "c")?;
//! let payload = client.get("getGenres", &[])?;
//! let genres: serde_json::Value = payload.field("genres")?;
//! # Ok::<(), subsonic_api::SubsonicError>(())
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                  | Endpoint          | Description            |
//! |-----------------------------------------|-------------------|------------------------|
//! | [`SubsonicClient::ping`]                | `ping`            | Liveness check         |
//! | [`SubsonicClient::license`]             | `getLicense`      | License status         |
//! | [`SubsonicClient::music_folders`]       | `getMusicFolders` | Top-level folders      |
//! | [`SubsonicClient::artists`]             | `getArtists`      | Artist index           |
//! | [`SubsonicClient::artist`]              | `getArtist`       | Artist with albums     |
//! | [`SubsonicClient::album`]               | `getAlbum`        | Album with songs       |
//! | [`SubsonicClient::song`]                | `getSong`         | Single song            |
//! | [`SubsonicClient::search`]              | `search3`         | Search                 |
//! | [`SubsonicClient::playlists`]           | `getPlaylists`    | List playlists         |
//! | [`SubsonicClient::playlist`]            | `getPlaylist`     | Playlist with entries  |
//! | [`SubsonicClient::create_playlist`]     | `createPlaylist`  | New playlist           |
//! | [`SubsonicClient::delete_playlist`]     | `deletePlaylist`  | Remove playlist        |
//! | [`SubsonicClient::stream`]              | `stream`          | Audio stream (raw)     |
//! | [`SubsonicClient::download`]            | `download`        | Original file (raw)    |
//! | [`SubsonicClient::cover_art`]           | `getCoverArt`     | Cover image (raw)      |

mod browsing;
pub mod client;
pub mod credential;
pub mod envelope;
pub mod error;
mod media;
mod playlist;
pub mod profile;
pub mod request;
mod search;
mod system;
pub mod types;

pub use client::SubsonicClient;
pub use credential::Credential;
pub use envelope::Payload;
pub use error::{Result, SubsonicError};
pub use profile::Profile;
