//! Application context for the guestbook CLI.
//!
//! Combines CLI arguments with the lazily-loaded config file and opens the
//! stores the commands operate on.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use secrecy::SecretString;

use guestbook_core::clock;
use guestbook_core::{JsonEntryStore, JsonUserStore, TokenService};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, GuestbookConfig, StorageSection};

/// Environment variable overriding the configured token secret.
pub const TOKEN_SECRET_ENV: &str = "GUESTBOOK_TOKEN_SECRET";

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<GuestbookConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn json(&self) -> bool {
        self.cli.json
    }

    /// Path of the config file, from `--config` or the XDG default.
    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        match self.cli.config.as_deref() {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_config_path(),
        }
    }

    /// Load the config, applying `--data-dir` on top.
    ///
    /// A missing config file is tolerated when `--data-dir` is given.
    pub fn config(&self) -> anyhow::Result<&GuestbookConfig> {
        self.config.get_or_try_init(|| {
            let path = self.config_path()?;
            let mut config = if path.exists() {
                read_config(&path)?
            } else if let Some(dir) = self.cli.data_dir.as_deref() {
                GuestbookConfig {
                    storage: StorageSection {
                        data_dir: dir.to_string(),
                    },
                    session: Default::default(),
                }
            } else {
                return Err(anyhow::anyhow!(
                    "No config at {}. Run `guestbook init` or pass --data-dir.",
                    path.display()
                ));
            };
            if let Some(dir) = self.cli.data_dir.as_deref() {
                config.storage.data_dir = dir.to_string();
            }
            tracing::debug!(data_dir = %config.storage.data_dir, "loaded config");
            Ok(config)
        })
    }

    pub fn open_entries(&self) -> anyhow::Result<JsonEntryStore> {
        let path = self.config()?.entries_path();
        JsonEntryStore::open(&path, clock::system())
            .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))
    }

    pub fn open_users(&self) -> anyhow::Result<JsonUserStore> {
        let path = self.config()?.users_path();
        JsonUserStore::open(&path, clock::system())
            .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))
    }

    /// Build the token service from the configured or env-provided secret.
    pub fn token_service(&self) -> anyhow::Result<TokenService> {
        let config = self.config()?;
        let secret = std::env::var(TOKEN_SECRET_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| config.session.secret.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No session secret configured. Set [session] secret or {}.",
                    TOKEN_SECRET_ENV
                )
            })?;
        Ok(TokenService::new(SecretString::from(secret), clock::system())
            .with_secure_cookies(config.session.secure))
    }
}
