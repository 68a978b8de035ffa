//! JSON-file-backed user store and the email verification protocol.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Duration;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{GuestbookError, Result};
use crate::random::{random_string, VERIFICATION_CODE_LEN};
use crate::storage::codec::{JsonFile, Records};
use crate::storage::traits::UserStore;
use crate::storage::types::User;

/// How long a verification code stays valid.
pub const VERIFICATION_CODE_TTL: Duration = Duration::minutes(5);

/// User store holding every account in memory behind one lock and mirroring
/// it to a JSON file.
pub struct JsonUserStore {
    file: JsonFile<User>,
    users: Mutex<Records<User>>,
    clock: Arc<dyn Clock>,
}

impl JsonUserStore {
    /// Open the user store at `path`, creating an empty file if needed.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::Storage` if the file cannot be read or
    /// created, and `GuestbookError::Validation` if it holds malformed JSON.
    pub fn open(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self> {
        let (file, users) = JsonFile::open_or_create(path)?;
        Ok(Self {
            file,
            users: Mutex::new(users),
            clock,
        })
    }

    fn lock_users(&self) -> Result<MutexGuard<'_, Records<User>>> {
        self.users
            .lock()
            .map_err(|_| GuestbookError::Storage("User store lock poisoned".to_string()))
    }

    /// Persist `next`, then make it the live collection.
    fn commit(&self, live: &mut MutexGuard<'_, Records<User>>, next: Records<User>) -> Result<()> {
        self.file.persist(&next)?;
        **live = next;
        Ok(())
    }

    fn issue_code(&self, user: &mut User) -> String {
        let code = random_string(VERIFICATION_CODE_LEN);
        user.verification_code = code.clone();
        user.code_expires_at = Some(self.clock.now() + VERIFICATION_CODE_TTL);
        code
    }
}

fn require_id(id: &Uuid) -> Result<()> {
    if id.is_nil() {
        return Err(GuestbookError::InvalidInput("User id is required".to_string()));
    }
    Ok(())
}

fn email_taken(users: &Records<User>, email: &str, except: Option<&Uuid>) -> bool {
    users
        .values()
        .any(|user| user.email == email && Some(&user.id) != except)
}

impl UserStore for JsonUserStore {
    #[instrument(level = "debug", skip_all, fields(user_id = %user.id))]
    fn create_user(&self, mut user: User) -> Result<Uuid> {
        let mut live = self.lock_users()?;

        if user.email.is_empty() {
            return Err(GuestbookError::InvalidInput("Email is required".to_string()));
        }
        if user.id.is_nil() {
            user.id = Uuid::new_v4();
        } else if live.contains_key(&user.id) {
            return Err(GuestbookError::Conflict(format!(
                "User {} already exists",
                user.id
            )));
        }
        if email_taken(&live, &user.email, None) {
            return Err(GuestbookError::Conflict(
                "Email cannot be used more than once".to_string(),
            ));
        }
        if !user.is_verified && user.verification_code.is_empty() {
            self.issue_code(&mut user);
        }

        let id = user.id;
        let mut next = live.clone();
        next.insert(id, user);
        self.commit(&mut live, next)?;
        Ok(id)
    }

    #[instrument(level = "debug", skip_all, fields(user_id = %user.id))]
    fn update_user(&self, user: User) -> Result<()> {
        let mut live = self.lock_users()?;

        require_id(&user.id)?;
        if email_taken(&live, &user.email, Some(&user.id)) {
            return Err(GuestbookError::Conflict(
                "Email cannot be used more than once".to_string(),
            ));
        }

        let mut next = live.clone();
        next.insert(user.id, user);
        self.commit(&mut live, next)
    }

    #[instrument(level = "debug", skip_all, fields(user_id = %id))]
    fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        let live = self.lock_users()?;
        require_id(id)?;
        Ok(live.get(id).cloned())
    }

    #[instrument(level = "debug", skip_all)]
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let live = self.lock_users()?;
        if email.is_empty() {
            return Err(GuestbookError::InvalidInput("Email is required".to_string()));
        }
        Ok(live.values().find(|user| user.email == email).cloned())
    }

    #[instrument(level = "debug", skip_all, fields(user_id = %id))]
    fn delete_user(&self, id: &Uuid) -> Result<()> {
        let mut live = self.lock_users()?;

        require_id(id)?;
        if !live.contains_key(id) {
            return Err(GuestbookError::NotFound(format!("User {} not found", id)));
        }

        let mut next = live.clone();
        next.remove(id);
        self.commit(&mut live, next)
    }

    #[instrument(level = "debug", skip_all)]
    fn list_users(&self) -> Result<Vec<User>> {
        let live = self.lock_users()?;
        let mut users: Vec<User> = live.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));
        Ok(users)
    }

    #[instrument(level = "debug", skip_all, fields(user_id = %id))]
    fn create_verification_code(&self, id: &Uuid) -> Result<String> {
        let mut live = self.lock_users()?;

        require_id(id)?;
        let mut next = live.clone();
        let user = next
            .get_mut(id)
            .ok_or_else(|| GuestbookError::NotFound(format!("User {} not found", id)))?;
        let code = self.issue_code(user);

        self.commit(&mut live, next)?;
        Ok(code)
    }

    #[instrument(level = "debug", skip_all, fields(user_id = %id))]
    fn code_validation(&self, id: &Uuid, code: &str) -> Result<()> {
        let mut live = self.lock_users()?;

        require_id(id)?;
        let user = live
            .get(id)
            .ok_or_else(|| GuestbookError::NotFound(format!("User {} not found", id)))?;
        if user.is_verified {
            return Ok(());
        }

        let expired = user
            .code_expires_at
            .map_or(true, |expires_at| self.clock.now() >= expires_at);
        if expired {
            let mut next = live.clone();
            next.remove(id);
            self.commit(&mut live, next)?;
            debug!("purged user with expired verification code");
            return Err(GuestbookError::Expired(
                "Verification code expired".to_string(),
            ));
        }

        if user.verification_code != code {
            return Err(GuestbookError::WrongCode);
        }

        let mut next = live.clone();
        if let Some(user) = next.get_mut(id) {
            user.is_verified = true;
        }
        self.commit(&mut live, next)
    }
}
