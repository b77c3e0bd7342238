//! Media retrieval APIs.
//!
//! These endpoints return raw bytes (audio or image), not an envelope, so
//! they go through [`SubsonicClient::request`] and hand back the
//! [`Response`] for the caller to consume. On failure most servers still
//! answer with a JSON error envelope; check the `Content-Type` before
//! treating the body as media, or use [`save_download`](SubsonicClient::save_download)
//! which does that for you.
//!
//! | Method      | Endpoint      | Extra parameters         |
//! |-------------|---------------|--------------------------|
//! | `stream`    | `stream`      | `maxBitRate` (kbps, opt) |
//! | `download`  | `download`    | none                     |
//! | `cover_art` | `getCoverArt` | `size` (pixels, opt)     |

use crate::client::SubsonicClient;
use crate::envelope;
use crate::error::{Result, SubsonicError};
use reqwest::Method;
use reqwest::blocking::Response;
use reqwest::header::CONTENT_TYPE;
use std::fs::{self, File};
use std::path::Path;

impl SubsonicClient {
    /// Stream a song, transcoded by the server if `max_bit_rate` is below
    /// the file's bit rate.
    pub fn stream(&self, id: &str, max_bit_rate: Option<u32>) -> Result<Response> {
        let rate = max_bit_rate.map(|r| r.to_string());
        let mut params = vec![("id", id)];
        if let Some(rate) = rate.as_deref() {
            params.push(("maxBitRate", rate));
        }
        self.request(Method::GET, "stream", &params)
    }

    /// Download the original, untranscoded file.
    pub fn download(&self, id: &str) -> Result<Response> {
        self.request(Method::GET, "download", &[("id", id)])
    }

    /// Fetch cover art, optionally scaled to `size` pixels.
    pub fn cover_art(&self, id: &str, size: Option<u32>) -> Result<Response> {
        let size = size.map(|s| s.to_string());
        let mut params = vec![("id", id)];
        if let Some(size) = size.as_deref() {
            params.push(("size", size));
        }
        self.request(Method::GET, "getCoverArt", &params)
    }

    /// Download a song to `dest`.
    ///
    /// If the server answers with a JSON envelope instead of media, it is
    /// decoded and its error returned, and `dest` is not created.
    ///
    /// A transfer that fails part way removes the partial file.
    ///
    /// Returns the number of bytes written.
    pub fn save_download(&self, id: &str, dest: &Path) -> Result<u64> {
        let mut resp = self.download(id)?;

        if is_json(&resp) {
            let body = resp.bytes()?;
            envelope::decode(&body)?;
            return Err(SubsonicError::Other(format!(
                "server returned an envelope instead of media for {id}"
            )));
        }

        let mut file = File::create(dest)?;
        let written = match resp.copy_to(&mut file) {
            Ok(n) => n,
            Err(e) => {
                drop(file);
                if let Err(rm) = fs::remove_file(dest) {
                    tracing::warn!(
                        dest = %dest.display(),
                        error = %rm,
                        "failed to remove partial download"
                    );
                }
                return Err(e.into());
            }
        };
        tracing::debug!(id, bytes = written, dest = %dest.display(), "download saved");
        Ok(written)
    }
}

fn is_json(resp: &Response) -> bool {
    resp.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json") || ct.starts_with("text/json"))
}
