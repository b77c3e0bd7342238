//! Saved server profile.
//!
//! The profile file is stored at `~/.config/subsonic/profile.json` and
//! contains:
//!
//! ```json
//! {
//!   "url": "https://music.example.com",
//!   "user": "alice",
//!   "client": "subsonic-cli",
//!   "salt": "k3Jd9aLq0Z",
//!   "token": "5f1d..."
//! }
//! ```
//!
//! Only the derived salt/token pair is kept, never the password. The pair
//! stays valid until the password changes on the server.

use crate::client::SubsonicClient;
use crate::credential::Credential;
use crate::error::{Result, SubsonicError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Connection details for one server, persisted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Server base URL, including any sub-path.
    pub url: String,
    pub user: String,
    /// Client name sent as `c`.
    pub client: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Profile {
    /// Capture a client's connection details and current credential.
    pub fn from_client(client: &SubsonicClient) -> Self {
        let credential = client.credential();
        Self {
            url: client.base_url().to_string(),
            user: client.identity().user.clone(),
            client: client.identity().client.clone(),
            salt: credential.as_ref().map(|c| c.salt().to_owned()),
            token: credential.as_ref().map(|c| c.token().to_owned()),
        }
    }

    /// Stored credential, if both halves are present.
    pub fn credential(&self) -> Option<Credential> {
        match (&self.salt, &self.token) {
            (Some(salt), Some(token)) => Some(Credential::from_parts(salt.as_str(), token.as_str())),
            _ => None,
        }
    }

    /// Build a client for this profile, restoring the stored credential
    /// without contacting the server.
    pub fn connect(&self) -> Result<SubsonicClient> {
        let client = SubsonicClient::new(&self.url, &self.user, &self.client)?;
        if let Some(credential) = self.credential() {
            client.restore_credential(credential);
        }
        Ok(client)
    }

    /// Load the profile from `~/.config/subsonic/profile.json`.
    ///
    /// Returns `None` if no profile has been saved.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    /// Save the profile, creating parent directories if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Delete the saved profile.
    pub fn clear() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn path() -> Result<PathBuf> {
        let config = dirs::config_dir()
            .ok_or_else(|| SubsonicError::Other("cannot determine config directory".into()))?;
        Ok(config.join("subsonic").join("profile.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            url: "http://localhost:4533/music".into(),
            user: "alice".into(),
            client: "tests".into(),
            salt: Some("abcdef1234".into()),
            token: Some("0123456789abcdef0123456789abcdef".into()),
        }
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.json");

        assert_eq!(Profile::load_from(&path).unwrap(), None);
        profile().save_to(&path).unwrap();
        assert_eq!(Profile::load_from(&path).unwrap(), Some(profile()));
    }

    #[test]
    fn half_a_credential_is_no_credential() {
        let mut p = profile();
        p.token = None;
        assert!(p.credential().is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        p.save_to(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("token"));
    }

    #[test]
    fn connect_restores_credential() {
        let client = profile().connect().unwrap();
        let cred = client.credential().unwrap();
        assert_eq!(cred.salt(), "abcdef1234");
        assert_eq!(Profile::from_client(&client), profile());
    }

    #[test]
    fn connect_without_credential() {
        let mut p = profile();
        p.salt = None;
        p.token = None;
        let client = p.connect().unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Profile::load_from(&path),
            Err(SubsonicError::Json(_))
        ));
    }
}
