//! Authenticated request URL construction.
//!
//! Every call goes to `<base path>/rest/<endpoint>` with the protocol
//! parameters in the query string:
//!
//! | Key | Value                          |
//! |-----|--------------------------------|
//! | `f` | `json`                         |
//! | `v` | [`API_VERSION`]                |
//! | `c` | client identifier              |
//! | `u` | user name                      |
//! | `t` | token (empty if unauthenticated) |
//! | `s` | salt (empty if unauthenticated)  |
//!
//! Caller parameters follow. A caller parameter whose key is one of the
//! above is dropped so it can never break authentication.

use crate::credential::Credential;
use crate::error::{Result, SubsonicError};
use url::Url;

/// Protocol version sent with every request.
pub const API_VERSION: &str = "1.8.0";

const REST_SEGMENT: &str = "rest";
const FORMAT: &str = "json";

/// Query keys owned by the protocol.
pub const RESERVED_KEYS: [&str; 6] = ["f", "v", "c", "u", "t", "s"];

/// Who is making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Subsonic user name (`u`).
    pub user: String,
    /// Client application name (`c`).
    pub client: String,
}

/// Check that `url` can have path segments appended.
pub(crate) fn validate_base(url: &Url) -> Result<()> {
    if url.cannot_be_a_base() {
        return Err(SubsonicError::InvalidBaseUrl(url.to_string()));
    }
    Ok(())
}

/// Build the full URL for an authenticated call.
///
/// Any path already on `base` is kept (`http://host/music` becomes
/// `http://host/music/rest/<endpoint>`), and so is any query it carries.
pub fn build_url(
    base: &Url,
    endpoint: &str,
    params: &[(&str, &str)],
    identity: &Identity,
    credential: Option<&Credential>,
) -> Result<Url> {
    if endpoint.is_empty() || endpoint.chars().any(char::is_control) {
        return Err(SubsonicError::InvalidEndpoint(endpoint.to_owned()));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| SubsonicError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .push(REST_SEGMENT)
        .push(endpoint);

    let (salt, token) = credential.map_or(("", ""), |c| (c.salt(), c.token()));
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("f", FORMAT)
            .append_pair("v", API_VERSION)
            .append_pair("c", &identity.client)
            .append_pair("u", &identity.user)
            .append_pair("t", token)
            .append_pair("s", salt);
        for &(key, value) in params {
            if RESERVED_KEYS.contains(&key) {
                tracing::warn!(key, endpoint, "ignoring caller parameter with reserved key");
                continue;
            }
            query.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn identity() -> Identity {
        Identity {
            user: "alice".into(),
            client: "tests".into(),
        }
    }

    fn query_map(url: &Url) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (k, v) in url.query_pairs() {
            map.entry(k.into_owned()).or_default().push(v.into_owned());
        }
        map
    }

    #[test]
    fn ping_under_sub_path() {
        let base = Url::parse("http://host/music").unwrap();
        let cred = Credential::from_parts("abcdef1234", "deadbeef");
        let url = build_url(&base, "ping", &[], &identity(), Some(&cred)).unwrap();

        assert_eq!(url.path(), "/music/rest/ping");
        let q = query_map(&url);
        assert_eq!(q["f"], ["json"]);
        assert_eq!(q["v"], ["1.8.0"]);
        assert_eq!(q["c"], ["tests"]);
        assert_eq!(q["u"], ["alice"]);
        assert_eq!(q["t"], ["deadbeef"]);
        assert_eq!(q["s"], ["abcdef1234"]);
        assert_eq!(q.len(), 6);
    }

    #[test]
    fn trailing_slash_and_bare_host() {
        let cred = Credential::from_parts("s", "t");
        let slash = Url::parse("http://host/music/").unwrap();
        let url = build_url(&slash, "getLicense", &[], &identity(), Some(&cred)).unwrap();
        assert_eq!(url.path(), "/music/rest/getLicense");

        let bare = Url::parse("https://host:4533").unwrap();
        let url = build_url(&bare, "ping", &[], &identity(), Some(&cred)).unwrap();
        assert_eq!(url.as_str().split('?').next(), Some("https://host:4533/rest/ping"));
    }

    #[test]
    fn caller_params_are_appended_verbatim() {
        let base = Url::parse("http://host").unwrap();
        let params = [("id", "al-12"), ("query", "a b&c"), ("songId", "1"), ("songId", "2")];
        let url = build_url(&base, "search3", &params, &identity(), None).unwrap();
        let q = query_map(&url);
        assert_eq!(q["id"], ["al-12"]);
        assert_eq!(q["query"], ["a b&c"]);
        assert_eq!(q["songId"], ["1", "2"]);
    }

    #[test]
    fn reserved_keys_cannot_be_overridden() {
        let base = Url::parse("http://host").unwrap();
        let cred = Credential::from_parts("salt", "token");
        let params = [("u", "mallory"), ("f", "xml"), ("t", "x"), ("id", "7")];
        let url = build_url(&base, "getSong", &params, &identity(), Some(&cred)).unwrap();
        let q = query_map(&url);
        assert_eq!(q["u"], ["alice"]);
        assert_eq!(q["f"], ["json"]);
        assert_eq!(q["t"], ["token"]);
        assert_eq!(q["id"], ["7"]);
    }

    #[test]
    fn unauthenticated_sends_empty_token_and_salt() {
        let base = Url::parse("http://host").unwrap();
        let url = build_url(&base, "ping", &[], &identity(), None).unwrap();
        let q = query_map(&url);
        assert_eq!(q["t"], [""]);
        assert_eq!(q["s"], [""]);
    }

    #[test]
    fn base_query_is_preserved() {
        let base = Url::parse("http://host/proxy?tenant=1").unwrap();
        let url = build_url(&base, "ping", &[], &identity(), None).unwrap();
        let q = query_map(&url);
        assert_eq!(q["tenant"], ["1"]);
        assert_eq!(q["f"], ["json"]);
    }

    #[test]
    fn rejects_bad_endpoints() {
        let base = Url::parse("http://host").unwrap();
        for endpoint in ["", "ping\r\nHost: evil", "get\0Song"] {
            let err = build_url(&base, endpoint, &[], &identity(), None).unwrap_err();
            assert!(matches!(err, SubsonicError::InvalidEndpoint(_)), "{endpoint:?}");
        }
    }

    #[test]
    fn rejects_non_hierarchical_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            validate_base(&base),
            Err(SubsonicError::InvalidBaseUrl(_))
        ));
        let err = build_url(&base, "ping", &[], &identity(), None).unwrap_err();
        assert!(matches!(err, SubsonicError::InvalidBaseUrl(_)));
    }
}
