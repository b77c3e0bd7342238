//! Error types for the Subsonic API client.

use thiserror::Error;

/// Errors that can occur when talking to a Subsonic server.
///
/// Transport, envelope and application failures are kept apart so callers
/// can branch on what actually went wrong.
#[derive(Debug, Error)]
pub enum SubsonicError {
    /// HTTP transport error (connection refused, timeout, TLS failure,
    /// truncated body, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// The base URL parsed but cannot carry a path (e.g. `mailto:`).
    #[error("base URL cannot be used for API requests: {0}")]
    InvalidBaseUrl(String),

    /// The endpoint name is empty or contains control characters.
    #[error("invalid endpoint name: {0:?}")]
    InvalidEndpoint(String),

    /// The response body is not JSON or is missing the
    /// `subsonic-response` wrapper.
    #[error("malformed response envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The server understood the request and reported a failure.
    ///
    /// Common codes:
    /// - `10` — required parameter is missing
    /// - `20`/`30` — client/server protocol version too old
    /// - `40` — wrong username or password
    /// - `50` — user is not authorized for the operation
    /// - `70` — requested data was not found
    #[error("API error (code {code}): {message}")]
    Api {
        /// Subsonic error code (not the HTTP status).
        code: i64,
        /// Human-readable message from the server.
        message: String,
    },

    /// The connectivity check made during `authenticate` failed.
    #[error("authentication failed")]
    AuthenticationFailed(#[source] Box<SubsonicError>),

    /// A successful payload did not contain the field an endpoint needs.
    #[error("response is missing field `{0}`")]
    MissingField(String),

    /// A payload field did not have the expected shape, or a profile file
    /// could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error (profile read/write, download write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for other errors (e.g. missing config directory).
    #[error("{0}")]
    Other(String),
}

impl SubsonicError {
    /// Server error code, if this is an application error or an
    /// authentication failure caused by one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::AuthenticationFailed(cause) => cause.api_code(),
            _ => None,
        }
    }
}

/// Convenience alias for `Result<T, SubsonicError>`.
pub type Result<T> = std::result::Result<T, SubsonicError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn api_code_through_auth_failure() {
        let err = SubsonicError::AuthenticationFailed(Box::new(SubsonicError::Api {
            code: 40,
            message: "Wrong username or password".into(),
        }));
        assert_eq!(err.api_code(), Some(40));
        assert_eq!(err.to_string(), "authentication failed");
        let source = err.source().expect("cause is kept");
        assert_eq!(
            source.to_string(),
            "API error (code 40): Wrong username or password"
        );
    }

    #[test]
    fn api_code_absent_for_transport_errors() {
        let err = SubsonicError::InvalidEndpoint("bad\n".into());
        assert_eq!(err.api_code(), None);
    }
}
