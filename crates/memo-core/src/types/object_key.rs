//! Object storage key type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A validated object-storage key.
///
/// Keys address uploaded binary assets (note images). Slash-separated
/// segments are allowed, but a key is never absolute and never contains
/// `.` or `..` segments, so joining a key onto a local root directory
/// is safe for filesystem-backed gateways.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Maximum accepted key length in bytes.
    const MAX_LEN: usize = 512;

    /// Create a new object key from a string, validating the format.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();

        if s.is_empty() {
            return Err(Self::invalid(s, "must not be empty"));
        }
        if s.len() > Self::MAX_LEN {
            return Err(Self::invalid(s, "too long"));
        }
        if s.chars().any(|c| c.is_control()) {
            return Err(Self::invalid(s, "must not contain control characters"));
        }
        if s.starts_with('/') {
            return Err(Self::invalid(s, "must not be absolute"));
        }
        if s.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
            return Err(Self::invalid(s, "must not contain empty, '.', or '..' segments"));
        }

        Ok(Self(s.to_string()))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn invalid(value: &str, reason: &str) -> Error {
        InvalidInputError::ObjectKey {
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ObjectKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectKey::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_file_name() {
        let key = ObjectKey::new("cover.png").unwrap();
        assert_eq!(key.as_str(), "cover.png");
    }

    #[test]
    fn valid_nested_key() {
        assert!(ObjectKey::new("uploads/2024/cover.png").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(ObjectKey::new("").is_err());
    }

    #[test]
    fn rejects_absolute() {
        assert!(ObjectKey::new("/etc/passwd").is_err());
    }

    #[test]
    fn rejects_traversal() {
        assert!(ObjectKey::new("../secret").is_err());
        assert!(ObjectKey::new("a/../b").is_err());
        assert!(ObjectKey::new("a/./b").is_err());
        assert!(ObjectKey::new("a//b").is_err());
    }

    #[test]
    fn rejects_control_characters() {
        assert!(ObjectKey::new("a\nb").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let key = ObjectKey::new("cover.png").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        let back: ObjectKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
