//! Error types for guestbook core operations.
//!
//! Errors are descriptive at the core level; the HTTP or CLI layer maps
//! these to redirects, status codes, or user-facing messages.

use thiserror::Error;

/// Result type alias for guestbook operations.
pub type Result<T> = std::result::Result<T, GuestbookError>;

/// Core error type for guestbook operations.
#[derive(Debug, Error)]
pub enum GuestbookError {
    /// Resource not found (id, email, or token)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation (duplicate email or id)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Empty or malformed argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Verification code or session token past its expiration
    #[error("Expired: {0}")]
    Expired(String),

    /// Verification code does not match
    #[error("Wrong verification code")]
    WrongCode,

    /// Token signature or claim is malformed
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (file read/write)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for GuestbookError {
    fn from(err: std::io::Error) -> Self {
        GuestbookError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for GuestbookError {
    fn from(err: serde_json::Error) -> Self {
        GuestbookError::Validation(err.to_string())
    }
}
