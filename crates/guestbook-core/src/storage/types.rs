//! Record types persisted by the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single guestbook message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    /// Unique identifier; nil until the store assigns one
    pub id: Uuid,

    /// Author name
    pub name: String,

    /// Message text
    pub message: String,

    /// Set by the store on creation; also the sort key
    pub created_at: DateTime<Utc>,

    /// Owning user, or `None` for anonymous entries
    #[serde(default, rename = "userid")]
    pub user_id: Option<Uuid>,
}

impl GuestbookEntry {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            message: message.into(),
            created_at: DateTime::<Utc>::default(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Unique across all users
    pub email: String,

    /// Display name
    pub name: String,

    /// Opaque one-way password hash
    #[serde(with = "base64_bytes", default)]
    pub password: Vec<u8>,

    /// Entries owned by this user. Filled in by callers on read, never persisted.
    #[serde(skip)]
    pub entries: Vec<GuestbookEntry>,

    #[serde(rename = "isadmin", default)]
    pub is_admin: bool,

    #[serde(rename = "isverified", default)]
    pub is_verified: bool,

    #[serde(rename = "verificationcode", default)]
    pub verification_code: String,

    /// When `verification_code` stops being accepted
    #[serde(rename = "expirationtime", default)]
    pub code_expires_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>, password: Vec<u8>) -> Self {
        Self {
            id: Uuid::nil(),
            email: email.into(),
            name: name.into(),
            password,
            entries: Vec::new(),
            is_admin: false,
            is_verified: false,
            verification_code: String::new(),
            code_expires_at: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }

    /// Attach the user's entries for display.
    pub fn with_entries(mut self, entries: Vec<GuestbookEntry>) -> Self {
        self.entries = entries;
        self
    }
}

/// Serde adapter storing password hashes as standard base64 strings.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let owner = Uuid::new_v4();
        let entry = GuestbookEntry::new("John Doe", "hello").with_user(owner);

        assert!(entry.id.is_nil());
        assert_eq!(entry.name, "John Doe");
        assert_eq!(entry.user_id, Some(owner));
    }

    #[test]
    fn test_user_password_serialized_as_base64() {
        let user = User::new("peter@example.com", "Peter Mueller", b"hash".to_vec());
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["password"], "aGFzaA==");
        assert_eq!(json["isverified"], false);
        assert!(json.get("entries").is_none());

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back.password, b"hash".to_vec());
    }

    #[test]
    fn test_user_entries_not_persisted() {
        let user = User::new("a@example.com", "A", Vec::new())
            .with_entries(vec![GuestbookEntry::new("A", "hi")]);
        let text = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&text).unwrap();
        assert!(back.entries.is_empty());
    }

    #[test]
    fn test_anonymous_entry_decodes_without_userid() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "name": "anon",
            "message": "hi",
            "created_at": "2024-05-01T10:00:00Z",
        });
        let entry: GuestbookEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.user_id, None);
    }
}
