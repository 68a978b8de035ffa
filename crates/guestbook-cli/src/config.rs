use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const ENTRIES_FILE: &str = "entries.json";
pub const USERS_FILE: &str = "users.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct GuestbookConfig {
    pub storage: StorageSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_dir: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSection {
    pub secret: Option<String>,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default)]
    pub secure: bool,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            secret: None,
            cookie_name: default_cookie_name(),
            domain: default_domain(),
            secure: false,
        }
    }
}

fn default_cookie_name() -> String {
    guestbook_core::session::DEFAULT_COOKIE_NAME.to_string()
}

fn default_domain() -> String {
    "127.0.0.1".to_string()
}

impl GuestbookConfig {
    pub fn new(data_dir: PathBuf, secret: String, domain: Option<String>) -> Self {
        Self {
            storage: StorageSection {
                data_dir: data_dir.to_string_lossy().to_string(),
            },
            session: SessionSection {
                secret: Some(secret),
                domain: domain.unwrap_or_else(default_domain),
                ..SessionSection::default()
            },
        }
    }

    pub fn entries_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join(ENTRIES_FILE)
    }

    pub fn users_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join(USERS_FILE)
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

pub fn read_config(path: &Path) -> anyhow::Result<GuestbookConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &GuestbookConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("guestbook"));
        }
    }
    Ok(home_dir()?.join(".config").join("guestbook"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("guestbook"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("guestbook"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = GuestbookConfig::new(
            dir.path().join("data"),
            "s3cret".to_string(),
            Some("example.com".to_string()),
        );

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.storage.data_dir, config.storage.data_dir);
        assert_eq!(loaded.session.secret.as_deref(), Some("s3cret"));
        assert_eq!(loaded.session.domain, "example.com");
        assert_eq!(loaded.session.cookie_name, "session");
        assert_eq!(loaded.entries_path(), dir.path().join("data").join(ENTRIES_FILE));
    }

    #[test]
    fn test_session_section_defaults() {
        let config: GuestbookConfig = toml::from_str("[storage]\ndata_dir = \"/tmp/gb\"\n").unwrap();
        assert!(config.session.secret.is_none());
        assert_eq!(config.session.domain, "127.0.0.1");
        assert!(!config.session.secure);
    }
}
