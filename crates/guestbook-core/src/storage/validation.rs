//! Sign-up input validation.

use crate::error::{GuestbookError, Result};

/// Minimum password length in bytes.
pub const MIN_PASSWORD_BYTES: usize = 8;

/// Maximum password length in bytes; longer inputs are truncated by bcrypt-style hashers.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Raw sign-up form values.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl Registration {
    /// Display name built from the capitalized first and last names.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            capitalize(self.first_name.trim()),
            capitalize(self.last_name.trim())
        )
    }
}

/// Validate a sign-up form before a user record is built from it.
///
/// # Errors
///
/// Returns `GuestbookError::Validation` describing the first failed rule.
pub fn validate_registration(form: &Registration) -> Result<()> {
    let first = form.first_name.trim();
    let last = form.last_name.trim();
    if first.is_empty() || last.is_empty() {
        return Err(GuestbookError::Validation(
            "Name fields cannot be empty".to_string(),
        ));
    }
    if first.chars().any(|c| c.is_ascii_digit()) || last.chars().any(|c| c.is_ascii_digit()) {
        return Err(GuestbookError::Validation(
            "Names cannot contain numbers".to_string(),
        ));
    }
    if form.password != form.password_confirmation {
        return Err(GuestbookError::Validation(
            "Passwords do not match".to_string(),
        ));
    }
    if form.password.len() > MAX_PASSWORD_BYTES {
        return Err(GuestbookError::Validation(format!(
            "Password is too long, at most {} characters allowed",
            MAX_PASSWORD_BYTES
        )));
    }
    if form.password.len() < MIN_PASSWORD_BYTES {
        return Err(GuestbookError::Validation(format!(
            "Password is too short, at least {} characters required",
            MIN_PASSWORD_BYTES
        )));
    }
    validate_email(&form.email)
}

/// Minimal address check: one `@`, a local part, and a dotted domain.
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = || GuestbookError::Validation(format!("Invalid email address: {}", email));

    let (local, domain) = email.trim().split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || !domain.contains('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }
    Ok(())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Registration {
        Registration {
            first_name: "peter".to_string(),
            last_name: "müller".to_string(),
            email: "peter@example.com".to_string(),
            password: "correct-horse".to_string(),
            password_confirmation: "correct-horse".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&form()).is_ok());
    }

    #[test]
    fn test_display_name_capitalizes() {
        assert_eq!(form().display_name(), "Peter Müller");
    }

    #[test]
    fn test_rejects_empty_and_numeric_names() {
        let mut f = form();
        f.last_name = "  ".to_string();
        assert!(validate_registration(&f).is_err());

        let mut f = form();
        f.first_name = "p3ter".to_string();
        assert!(validate_registration(&f).is_err());
    }

    #[test]
    fn test_rejects_password_mismatch_and_length() {
        let mut f = form();
        f.password_confirmation = "other-horse".to_string();
        assert!(validate_registration(&f).is_err());

        let mut f = form();
        f.password = "short".to_string();
        f.password_confirmation = "short".to_string();
        assert!(validate_registration(&f).is_err());

        let mut f = form();
        f.password = "x".repeat(MAX_PASSWORD_BYTES + 1);
        f.password_confirmation = f.password.clone();
        assert!(validate_registration(&f).is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("a@b.de").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@localhost").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("a b@c.com").is_err());
    }
}
