//! Error types for the memo client.
//!
//! A unified error type with explicit variants for transport,
//! authentication, protocol, and input validation failures, so callers
//! can tell retryable conditions apart from fatal ones.

use std::fmt;
use thiserror::Error;

/// The unified error type for memo operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (backend error responses, unexpected payloads).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (invalid id, key, URL, or draft).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Whether retrying the same operation could plausibly succeed.
    ///
    /// Transport failures and throttling/server-side protocol errors
    /// are retryable; everything else is fatal for the attempted call.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Protocol(p) => p.status == 429 || p.status >= 500,
            Error::Auth(_) | Error::InvalidInput(_) => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP or I/O failure below the protocol layer.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials provided.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Session has expired.
    #[error("session expired")]
    SessionExpired,

    /// Refresh token is missing, invalid, or expired.
    #[error("refresh token invalid")]
    RefreshTokenInvalid,

    /// No active session where one is required.
    #[error("not signed in")]
    NotSignedIn,
}

/// Protocol-level errors from backend responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code (200 for in-band GraphQL errors).
    pub status: u16,
    /// Backend error code, if present.
    pub code: Option<String>,
    /// Error message from the backend.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Convenience constructor for a not-found condition.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, Some("NotFound".to_string()), Some(message.into()))
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
            || self.code.as_deref() == Some("Unauthorized")
            || self.code.as_deref() == Some("ExpiredToken")
            || self.code.as_deref() == Some("InvalidToken")
    }

    /// Check if this reports a missing resource.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
            || self.code.as_deref() == Some("NotFound")
            || self.code.as_deref() == Some("ResourceNotFound")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid note id format.
    #[error("invalid note id '{value}': {reason}")]
    NoteId { value: String, reason: String },

    /// Invalid object key format.
    #[error("invalid object key '{value}': {reason}")]
    ObjectKey { value: String, reason: String },

    /// Invalid backend URL format.
    #[error("invalid backend URL '{value}': {reason}")]
    BackendUrl { value: String, reason: String },

    /// A required draft field is empty.
    #[error("draft field '{field}' must not be empty")]
    Draft { field: &'static str },

    /// Invalid pagination parameters.
    #[error("invalid page: {reason}")]
    Page { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_retryable() {
        let err = Error::Transport(TransportError::Timeout);
        assert!(err.is_retryable());
    }

    #[test]
    fn server_side_protocol_errors_are_retryable() {
        let err = Error::Protocol(ProtocolError::new(502, None, None));
        assert!(err.is_retryable());
        let err = Error::Protocol(ProtocolError::new(429, None, None));
        assert!(err.is_retryable());
    }

    #[test]
    fn client_side_errors_are_fatal() {
        let err = Error::Protocol(ProtocolError::not_found("gone"));
        assert!(!err.is_retryable());
        let err = Error::InvalidInput(InvalidInputError::Draft { field: "name" });
        assert!(!err.is_retryable());
        let err = Error::Auth(AuthError::SessionExpired);
        assert!(!err.is_retryable());
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::new(401, Some("ExpiredToken".into()), Some("expired".into()));
        assert_eq!(err.to_string(), "HTTP 401 [ExpiredToken]: expired");
        assert!(err.is_auth_error());
    }
}
