//! Cookie descriptor handed back to the HTTP layer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// `SameSite` cookie attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        };
        f.write_str(value)
    }
}

/// A session cookie. `Display` renders it as a `Set-Cookie` header value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub expires: DateTime<Utc>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}

impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if !self.domain.is_empty() {
            write!(f, "; Domain={}", self.domain)?;
        }
        write!(
            f,
            "; Path={}; Expires={}",
            self.path,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT")
        )?;
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        if self.secure {
            f.write_str("; Secure")?;
        }
        write!(f, "; SameSite={}", self.same_site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie() -> SessionCookie {
        SessionCookie {
            name: "session".to_string(),
            value: "abc.def.ghi".to_string(),
            domain: "127.0.0.1".to_string(),
            path: "/".to_string(),
            expires: DateTime::parse_from_rfc3339("2024-03-05T07:08:09Z")
                .unwrap()
                .with_timezone(&Utc),
            http_only: true,
            secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[test]
    fn test_set_cookie_header() {
        assert_eq!(
            cookie().to_string(),
            "session=abc.def.ghi; Domain=127.0.0.1; Path=/; \
             Expires=Tue, 05 Mar 2024 07:08:09 GMT; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_set_cookie_header_secure_without_domain() {
        let mut c = cookie();
        c.domain.clear();
        c.secure = true;
        let header = c.to_string();
        assert!(!header.contains("Domain="));
        assert!(header.contains("; Secure"));
    }
}
