//! Backend URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};
use crate::types::ObjectKey;

/// A validated backend URL.
///
/// Network backends (HTTPS, or HTTP for localhost) expose a GraphQL
/// endpoint and an object-storage surface. Local backends (`file://`)
/// store notes and objects on the filesystem, which keeps development
/// and tests free of any network dependency.
///
/// # Example
///
/// ```
/// use memo_core::BackendUrl;
///
/// let backend = BackendUrl::new("https://api.example.com").unwrap();
/// assert_eq!(backend.graphql_url(), "https://api.example.com/graphql");
/// assert_eq!(
///     backend.object_url("cover.png"),
///     "https://api.example.com/storage/cover.png"
/// );
///
/// let local = BackendUrl::new("file:///tmp/memo").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BackendUrl(Url);

impl BackendUrl {
    /// Create a new backend URL from a string, validating the format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::BackendUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: drop a bare trailing slash.
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the GraphQL endpoint URL.
    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base())
    }

    /// Returns the object-storage URL for a key (PUT target).
    pub fn object_url(&self, key: impl AsRef<str>) -> String {
        format!("{}/storage/{}", self.base(), key.as_ref())
    }

    /// Returns the URL-resolution endpoint for a stored object.
    ///
    /// A GET here yields a temporary, displayable URL for the object.
    pub fn object_resolve_url(&self, key: &ObjectKey) -> String {
        format!("{}/storage/{}/url", self.base(), key.as_str())
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns true if this is a local filesystem backend (file:// URL).
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns true if this is a network backend (http:// or https:// URL).
    pub fn is_network(&self) -> bool {
        matches!(self.0.scheme(), "http" | "https")
    }

    /// Returns the filesystem path for file:// URLs, `None` otherwise.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn base(&self) -> &str {
        // The url crate keeps a trailing slash on root paths.
        self.0.as_str().trim_end_matches('/')
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::BackendUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }

        let scheme = url.scheme();

        if scheme == "file" {
            if url.path().is_empty() {
                return Err(invalid("file:// URL must have a path"));
            }
            return Ok(());
        }

        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(invalid("must use HTTPS (HTTP allowed only for localhost)"));
        }

        if url.host_str().is_none() {
            return Err(invalid("must have a host"));
        }

        Ok(())
    }
}

impl fmt::Display for BackendUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BackendUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BackendUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BackendUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BackendUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for BackendUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
