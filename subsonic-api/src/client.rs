//! Blocking HTTP client for the Subsonic REST API.
//!
//! Request pipeline:
//!
//! 1. [`build_url`](crate::request::build_url) joins `<base>/rest/<endpoint>`
//!    and adds the protocol parameters plus the caller's
//! 2. GET via the shared [`reqwest::blocking::Client`]
//! 3. The whole body is read, then [`decode`](crate::envelope::decode)d
//!
//! HTTP status codes are not interpreted; failures are reported by the
//! server inside the envelope.
//!
//! # Credentials
//!
//! The salt and token live together behind one lock, so a concurrent
//! reader never sees a token paired with the wrong salt. Calls made before
//! [`authenticate`](SubsonicClient::authenticate) are still sent, with
//! empty `t`/`s`, and the server rejects them with code 40.

use crate::credential::{self, Credential};
use crate::envelope::{self, Payload};
use crate::error::{Result, SubsonicError};
use crate::request::{self, Identity};
use parking_lot::RwLock;
use reqwest::Method;
use reqwest::blocking::{Client, Response};
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("subsonic-rs/", env!("CARGO_PKG_VERSION"));
const CONNECTIVITY_ENDPOINT: &str = "ping";

/// Blocking client for one user on one Subsonic server.
///
/// Holds a [`reqwest::blocking::Client`] (cheap to clone, shareable across
/// sessions), the base URL and identity, and the current [`Credential`].
/// Endpoint methods are implemented in separate modules (`system`,
/// `browsing`, `search`, `playlist`, `media`) as `impl SubsonicClient`
/// blocks.
#[derive(Debug)]
pub struct SubsonicClient {
    http: Client,
    base_url: Url,
    identity: Identity,
    credential: RwLock<Option<Credential>>,
}

impl SubsonicClient {
    /// Create an unauthenticated client with a default transport
    /// (30 second timeout).
    pub fn new(base_url: &str, user: &str, client: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Self::with_http(http, base_url, user, client)
    }

    /// Create an unauthenticated client on top of an existing transport
    /// (for custom TLS, proxy or timeout settings, or to share one
    /// connection pool between sessions).
    pub fn with_http(http: Client, base_url: &str, user: &str, client: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        request::validate_base(&base_url)?;
        Ok(Self {
            http,
            base_url,
            identity: Identity {
                user: user.to_owned(),
                client: client.to_owned(),
            },
            credential: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Snapshot of the current credential, `None` before the first
    /// successful [`authenticate`](Self::authenticate).
    pub fn credential(&self) -> Option<Credential> {
        self.credential.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.read().is_some()
    }

    /// Install a previously derived credential without contacting the
    /// server.
    pub fn restore_credential(&self, credential: Credential) {
        *self.credential.write() = Some(credential);
    }

    /// Derive a fresh salt and token from `password` and verify them with
    /// a `ping`.
    ///
    /// The new credential replaces the old one only if the check succeeds.
    ///
    /// # Errors
    ///
    /// [`SubsonicError::AuthenticationFailed`] whatever the cause (wrong
    /// password, unreachable server, bad envelope); the cause is
    /// available via [`std::error::Error::source`].
    pub fn authenticate(&self, password: &str) -> Result<()> {
        let candidate = credential::derive(password);
        self.dispatch(Method::GET, CONNECTIVITY_ENDPOINT, &[], Some(&candidate))
            .and_then(read_payload)
            .map_err(|e| SubsonicError::AuthenticationFailed(Box::new(e)))?;

        *self.credential.write() = Some(candidate);
        tracing::info!(user = %self.identity.user, server = %self.base_url, "authenticated");
        Ok(())
    }

    /// Send an authenticated request and return the raw response.
    ///
    /// Nothing is decoded; used directly for media endpoints whose body is
    /// a byte stream. Blocks until the response headers arrive.
    pub fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Response> {
        let credential = self.credential();
        self.dispatch(method, endpoint, params, credential.as_ref())
    }

    /// GET `endpoint`, read the whole body and decode the envelope.
    ///
    /// This is what every typed endpoint method goes through.
    pub fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Payload> {
        self.request(Method::GET, endpoint, params).and_then(read_payload)
    }

    /// Check that the server is reachable and accepts the current
    /// credential.
    ///
    /// Any failure collapses to `false`; the cause is only logged.
    pub fn ping(&self) -> bool {
        match self.get(CONNECTIVITY_ENDPOINT, &[]) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(server = %self.base_url, error = %e, "ping failed");
                false
            }
        }
    }

    fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, &str)],
        credential: Option<&Credential>,
    ) -> Result<Response> {
        let url = request::build_url(&self.base_url, endpoint, params, &self.identity, credential)?;
        tracing::debug!(%method, endpoint, "subsonic request");
        Ok(self.http.request(method, url).send()?)
    }
}

fn read_payload(resp: Response) -> Result<Payload> {
    let body = resp.bytes()?;
    envelope::decode(&body)
}
