//! Token types for backend authentication.

use std::fmt;

/// An access token for authenticated backend requests.
///
/// Access tokens are short-lived and treated as opaque; their value is
/// hidden from Debug output.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide the token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token for obtaining new access tokens without
/// re-authentication.
#[derive(Clone)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh requests.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide the token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_hide_value_in_debug() {
        let access = AccessToken::new("eyJhbGciOiJIUzI1NiJ9.access");
        assert!(!format!("{:?}", access).contains("eyJ"));
        assert!(format!("{:?}", access).contains("[REDACTED]"));

        let refresh = RefreshToken::new("refresh-token-value");
        assert!(!format!("{:?}", refresh).contains("refresh-token-value"));
    }
}
