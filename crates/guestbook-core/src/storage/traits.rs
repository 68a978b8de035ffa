//! Store interfaces consumed by the HTTP layer.
//!
//! Implementations must ensure:
//! - Record ids are non-nil and unique within a store
//! - Every successful mutating call leaves a complete serialization of the
//!   collection on disk
//! - A failed write leaves the in-memory collection unchanged

use uuid::Uuid;

use super::types::{GuestbookEntry, User};
use crate::error::Result;

/// Guestbook entry storage.
pub trait EntryStore: Send + Sync {
    /// Insert a new entry.
    ///
    /// Assigns a fresh id when `entry.id` is nil and stamps `created_at` with
    /// the current time.
    ///
    /// # Returns
    ///
    /// Returns the id of the stored entry.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Conflict` if the id is already taken and
    /// `GuestbookError::Storage` if the store file cannot be written.
    fn create_entry(&self, entry: GuestbookEntry) -> Result<Uuid>;

    /// List all entries, newest first.
    fn list_entries(&self) -> Result<Vec<GuestbookEntry>>;

    /// Get an entry by its own id.
    ///
    /// Returns `Ok(None)` if no entry has that id.
    fn get_entry(&self, id: &Uuid) -> Result<Option<GuestbookEntry>>;

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::InvalidInput` for a nil id and
    /// `GuestbookError::NotFound` if the entry does not exist.
    fn delete_entry(&self, id: &Uuid) -> Result<()>;

    /// Entries whose author name is exactly `name`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::NotFound` when nothing matches.
    fn get_entry_by_name(&self, name: &str) -> Result<Vec<GuestbookEntry>>;

    /// Entries whose author name contains `snippet`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::NotFound` when nothing matches.
    fn get_entry_by_snippet(&self, snippet: &str) -> Result<Vec<GuestbookEntry>>;

    /// Entries owned by `owner_id`, newest first.
    ///
    /// An owner with no entries yields an empty list, not an error.
    fn get_entry_by_id(&self, owner_id: &Uuid) -> Result<Vec<GuestbookEntry>>;
}

/// User account storage, including the email verification protocol.
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Unverified users without a code get a fresh verification code.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Conflict` if the email or id is already used.
    fn create_user(&self, user: User) -> Result<Uuid>;

    /// Replace the stored record with the same id, inserting it if absent.
    ///
    /// No field merging happens; callers read, modify, and write back.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Conflict` if another user holds the email.
    fn update_user(&self, user: User) -> Result<()>;

    /// Look up a user by id. Returns `Ok(None)` if absent.
    fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>>;

    /// Look up a user by email. Returns `Ok(None)` if absent.
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::InvalidInput` for a nil id and
    /// `GuestbookError::NotFound` if the user does not exist.
    fn delete_user(&self, id: &Uuid) -> Result<()>;

    /// All users ordered by display name, ascending.
    fn list_users(&self) -> Result<Vec<User>>;

    /// Issue a new verification code valid for five minutes.
    ///
    /// # Returns
    ///
    /// Returns the code so the caller can deliver it.
    fn create_verification_code(&self, id: &Uuid) -> Result<String>;

    /// Check a verification code.
    ///
    /// # Errors
    ///
    /// - `GuestbookError::NotFound` if the user does not exist
    /// - `GuestbookError::Expired` if the code has expired; the user is deleted
    /// - `GuestbookError::WrongCode` if the code does not match
    fn code_validation(&self, id: &Uuid, code: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traits_are_object_safe() {
        fn _accepts_entry_store(_store: &dyn EntryStore) {}
        fn _accepts_user_store(_store: &dyn UserStore) {}
    }
}
