//! Session tokens: signed values bound to a user id, with server-side
//! expiration and revocation.
//!
//! The signature lets the HTTP layer recover the user id from a cookie
//! without a lookup. The server-side table is what makes a session valid:
//! it holds at most one token per user, carries the sliding expiration, and
//! makes logout take effect immediately.

mod cookie;
mod service;
mod signing;

pub use cookie::{SameSite, SessionCookie};
pub use service::{TokenService, DEFAULT_COOKIE_NAME, REMEMBER_TTL, SESSION_TTL};
pub use signing::TokenSigner;

use uuid::Uuid;

use crate::error::Result;

/// Session lifecycle operations consumed by the HTTP layer.
pub trait SessionStore: Send + Sync {
    /// Issue a token for `user_id`, replacing any token the user already has.
    ///
    /// The session lasts 15 minutes, or 24 hours when `remember` is set.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::InvalidInput` for a nil user id.
    fn create_token(
        &self,
        session_name: &str,
        domain: &str,
        user_id: &Uuid,
        remember: bool,
    ) -> Result<SessionCookie>;

    /// Check that `token` is a live session.
    ///
    /// # Errors
    ///
    /// - `GuestbookError::NotFound` if no session holds this token
    /// - `GuestbookError::Expired` if the session has expired; the record is kept
    fn valid(&self, token: &str) -> Result<()>;

    /// Slide the session forward and return a fresh cookie for it.
    ///
    /// The returned cookie always expires 15 minutes from now.
    fn refresh(&self, token: &str) -> Result<SessionCookie>;

    /// Verify the token signature and return the user id it carries.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::InvalidToken` on a bad signature or claim.
    fn get_token_value(&self, token: &str) -> Result<Uuid>;

    /// Revoke the session of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::InvalidInput` for a nil id and
    /// `GuestbookError::NotFound` if the user has no session.
    fn delete_token(&self, user_id: &Uuid) -> Result<()>;
}
