//! # Guestbook Core
//!
//! Core library for the guestbook: file-backed stores for entries and user
//! accounts, and the session token service used for logins.
//!
//! This crate holds the domain logic independent of any HTTP layer.
//!
//! ## Architecture
//!
//! - **storage**: JSON file codec, entry store, user store
//! - **session**: signed session tokens with server-side expiry
//! - **clock**: wall-clock source, swappable in tests
//! - **random**: short random codes (verification codes, secrets)

pub mod clock;
pub mod error;
pub mod fs;
pub mod random;
pub mod session;
pub mod storage;

pub use error::{GuestbookError, Result};
pub use session::{SessionCookie, SessionStore, TokenService};
pub use storage::{EntryStore, GuestbookEntry, JsonEntryStore, JsonUserStore, User, UserStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
