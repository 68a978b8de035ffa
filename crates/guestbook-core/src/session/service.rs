//! In-memory session table keyed by user id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use tracing::instrument;
use uuid::Uuid;

use super::cookie::{SameSite, SessionCookie};
use super::signing::TokenSigner;
use super::SessionStore;
use crate::clock::Clock;
use crate::error::{GuestbookError, Result};

/// Lifetime of a normal session, and the sliding window used by refresh.
pub const SESSION_TTL: Duration = Duration::minutes(15);

/// Initial lifetime of a remember-me session.
pub const REMEMBER_TTL: Duration = Duration::hours(24);

/// Cookie name used when refreshing a token the table does not know.
pub const DEFAULT_COOKIE_NAME: &str = "session";

#[derive(Debug, Clone)]
struct TokenRecord {
    token: String,
    expires_at: DateTime<Utc>,
    cookie_name: String,
    domain: String,
}

/// Issues, validates, refreshes, and revokes session tokens.
///
/// Tokens live only in memory; a restart logs everybody out.
pub struct TokenService {
    signer: TokenSigner,
    tokens: Mutex<HashMap<Uuid, TokenRecord>>,
    clock: Arc<dyn Clock>,
    secure: bool,
}

impl TokenService {
    pub fn new(secret: SecretString, clock: Arc<dyn Clock>) -> Self {
        Self {
            signer: TokenSigner::new(secret),
            tokens: Mutex::new(HashMap::new()),
            clock,
            secure: false,
        }
    }

    /// Mark issued cookies `Secure` (HTTPS only).
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Number of users currently holding a token, expired or not.
    pub fn active_sessions(&self) -> Result<usize> {
        Ok(self.lock_tokens()?.len())
    }

    fn lock_tokens(&self) -> Result<MutexGuard<'_, HashMap<Uuid, TokenRecord>>> {
        self.tokens
            .lock()
            .map_err(|_| GuestbookError::Storage("Token table lock poisoned".to_string()))
    }

    fn cookie(&self, name: &str, domain: &str, value: &str, expires: DateTime<Utc>) -> SessionCookie {
        SessionCookie {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.to_string(),
            path: "/".to_string(),
            expires,
            http_only: true,
            secure: self.secure,
            same_site: SameSite::Lax,
        }
    }
}

impl SessionStore for TokenService {
    #[instrument(level = "debug", skip_all, fields(user_id = %user_id, remember = remember))]
    fn create_token(
        &self,
        session_name: &str,
        domain: &str,
        user_id: &Uuid,
        remember: bool,
    ) -> Result<SessionCookie> {
        let mut tokens = self.lock_tokens()?;

        if user_id.is_nil() {
            return Err(GuestbookError::InvalidInput(
                "Cannot create a token for an empty user id".to_string(),
            ));
        }

        let token = self.signer.sign(user_id)?;
        let ttl = if remember { REMEMBER_TTL } else { SESSION_TTL };
        let expires_at = self.clock.now() + ttl;

        tokens.insert(
            *user_id,
            TokenRecord {
                token: token.clone(),
                expires_at,
                cookie_name: session_name.to_string(),
                domain: domain.to_string(),
            },
        );

        Ok(self.cookie(session_name, domain, &token, expires_at))
    }

    #[instrument(level = "debug", skip_all)]
    fn valid(&self, token: &str) -> Result<()> {
        let tokens = self.lock_tokens()?;

        if token.is_empty() {
            return Err(GuestbookError::InvalidInput("Token value is empty".to_string()));
        }

        let record = tokens
            .values()
            .find(|record| record.token == token)
            .ok_or_else(|| GuestbookError::NotFound("Token was not found".to_string()))?;
        if record.expires_at < self.clock.now() {
            return Err(GuestbookError::Expired("Token expired".to_string()));
        }
        Ok(())
    }

    #[instrument(level = "debug", skip_all)]
    fn refresh(&self, token: &str) -> Result<SessionCookie> {
        let mut tokens = self.lock_tokens()?;

        if token.is_empty() {
            return Err(GuestbookError::InvalidInput(
                "Refresh failed, empty token value".to_string(),
            ));
        }

        let slid_to = self.clock.now() + SESSION_TTL;
        let cookie = match tokens.values_mut().find(|record| record.token == token) {
            Some(record) => {
                record.expires_at = record.expires_at.max(slid_to);
                self.cookie(&record.cookie_name, &record.domain, token, slid_to)
            }
            None => self.cookie(DEFAULT_COOKIE_NAME, "", token, slid_to),
        };
        Ok(cookie)
    }

    #[instrument(level = "debug", skip_all)]
    fn get_token_value(&self, token: &str) -> Result<Uuid> {
        self.signer.verify(token)
    }

    #[instrument(level = "debug", skip_all, fields(user_id = %user_id))]
    fn delete_token(&self, user_id: &Uuid) -> Result<()> {
        let mut tokens = self.lock_tokens()?;

        if user_id.is_nil() {
            return Err(GuestbookError::InvalidInput(
                "Cannot delete a token for an empty user id".to_string(),
            ));
        }
        tokens
            .remove(user_id)
            .map(|_| ())
            .ok_or_else(|| GuestbookError::NotFound(format!("No token exists for user {}", user_id)))
    }
}
