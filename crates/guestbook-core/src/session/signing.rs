//! HS256 compact token signing (JWT-compatible).
//!
//! A token is `base64url(header).base64url(claims).base64url(mac)` with no
//! padding. The only claim is the user id.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{GuestbookError, Result};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default)]
    typ: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
}

/// Signs and verifies session tokens with a shared secret.
pub struct TokenSigner {
    secret: SecretString,
}

impl TokenSigner {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| GuestbookError::InvalidToken(format!("Bad signing key: {}", e)))
    }

    /// Produce a signed token carrying `user_id`.
    pub fn sign(&self, user_id: &Uuid) -> Result<String> {
        let header = serde_json::to_vec(&Header {
            alg: ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        })?;
        let claims = serde_json::to_vec(&Claims {
            id: user_id.to_string(),
        })?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Check the signature of `token` and return the user id it carries.
    ///
    /// # Errors
    ///
    /// Returns `GuestbookError::InvalidToken` if the token is malformed, uses
    /// another algorithm, has a bad signature, or lacks a valid `id` claim.
    pub fn verify(&self, token: &str) -> Result<Uuid> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected three segments"));
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != ALGORITHM {
            return Err(invalid(&format!("unsupported algorithm {}", header.alg)));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| invalid("signature is not base64url"))?;
        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(claims_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| invalid("signature mismatch"))?;

        let claims: Claims = decode_segment(claims_b64)?;
        Uuid::parse_str(&claims.id).map_err(|_| invalid("id claim is not a uuid"))
    }
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| invalid("segment is not base64url"))?;
    serde_json::from_slice(&bytes).map_err(|_| invalid("segment is not valid JSON"))
}

fn invalid(reason: &str) -> GuestbookError {
    GuestbookError::InvalidToken(reason.to_string())
}
