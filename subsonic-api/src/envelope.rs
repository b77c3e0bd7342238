//! Response envelope decoding.
//!
//! Every JSON reply is wrapped the same way:
//!
//! ```json
//! {
//!   "subsonic-response": {
//!     "status": "ok",
//!     "version": "1.16.1",
//!     ...endpoint-specific fields...
//!   }
//! }
//! ```
//!
//! Failures carry an `error` record instead:
//!
//! ```json
//! {
//!   "subsonic-response": {
//!     "status": "failed",
//!     "version": "1.16.1",
//!     "error": { "code": 40, "message": "Wrong username or password" }
//!   }
//! }
//! ```
//!
//! If an `error` record is present it wins over anything else in the
//! object.

use crate::error::{Result, SubsonicError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "subsonic-response")]
    response: Map<String, Value>,
}

#[derive(Deserialize)]
struct ErrorRecord {
    code: i64,
    #[serde(default)]
    message: String,
}

/// The contents of a successful `subsonic-response` object.
///
/// Opaque to the core; endpoint methods pull typed fields out of it with
/// [`Payload::field`].
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// `status` as reported by the server (`"ok"` on success).
    pub fn status(&self) -> Option<&str> {
        self.0.get("status").and_then(Value::as_str)
    }

    /// Protocol version the server speaks.
    pub fn version(&self) -> Option<&str> {
        self.0.get("version").and_then(Value::as_str)
    }

    /// Raw access to a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Deserialize the top-level field `key` into `T`.
    ///
    /// Fails with [`SubsonicError::MissingField`] if the field is absent,
    /// or [`SubsonicError::Json`] if it does not fit `T`.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .0
            .get(key)
            .ok_or_else(|| SubsonicError::MissingField(key.to_owned()))?;
        Ok(T::deserialize(value)?)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Decode a raw response body.
///
/// Returns [`SubsonicError::Envelope`] if the body is not an envelope and
/// [`SubsonicError::Api`] if the server reported an error.
pub fn decode(body: &[u8]) -> Result<Payload> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(SubsonicError::Envelope)?;
    let mut response = envelope.response;

    // A null `error` is not an error record.
    if let Some(error) = response.remove("error").filter(|v| !v.is_null()) {
        let record = ErrorRecord::deserialize(error).map_err(SubsonicError::Envelope)?;
        return Err(SubsonicError::Api {
            code: record.code,
            message: record.message,
        });
    }

    Ok(Payload(response))
}
