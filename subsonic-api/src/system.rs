//! System and folder APIs.
//!
//! ## `license` — `GET /rest/getLicense`
//!
//! Response:
//! ```json
//! {
//!   "subsonic-response": {
//!     "status": "ok",
//!     "license": {
//!       "valid": true,
//!       "email": "foo@bar.com",
//!       "licenseExpires": "2019-09-03T14:46:43"
//!     }
//!   }
//! }
//! ```
//!
//! Subsonic itself requires a license after a 30-day trial; compatible
//! servers report a perpetually valid one.
//!
//! ## `music_folders` — `GET /rest/getMusicFolders`
//!
//! Response: `{ "musicFolders": { "musicFolder": [{ "id": 1, "name": "Music" }] } }`

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::types::{License, MusicFolder};
use serde::Deserialize;

#[derive(Deserialize)]
struct MusicFolders {
    #[serde(rename = "musicFolder", default)]
    folders: Vec<MusicFolder>,
}

impl SubsonicClient {
    /// Get details about the server's software license.
    pub fn license(&self) -> Result<License> {
        self.get("getLicense", &[])?.field("license")
    }

    /// List the configured top-level music folders.
    pub fn music_folders(&self) -> Result<Vec<MusicFolder>> {
        let folders: MusicFolders = self.get("getMusicFolders", &[])?.field("musicFolders")?;
        Ok(folders.folders)
    }
}
