//! Password input and hashing for accounts created from the CLI.

use std::io::{self, BufRead, IsTerminal};

use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use dialoguer::Password;
use rand::RngCore;

const SALT_LEN: usize = 16;

/// Read a password from the first line of stdin, or prompt with confirmation.
pub fn read_password(from_stdin: bool) -> anyhow::Result<String> {
    if from_stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| anyhow::anyhow!("Failed to read password from stdin: {}", e))?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }
    if !io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "No TTY available for the password prompt. Use --password-stdin."
        ));
    }
    Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Hash a password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> anyhow::Result<Vec<u8>> {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| anyhow::anyhow!("Failed to encode salt: {}", e))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct-horse").unwrap();
        let encoded = std::str::from_utf8(&hash).unwrap();
        assert!(encoded.starts_with("$argon2id$"));

        let parsed = PasswordHash::new(encoded).unwrap();
        assert!(Argon2::default()
            .verify_password(b"correct-horse", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong-horse", &parsed)
            .is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }
}
