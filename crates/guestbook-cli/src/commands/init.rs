use guestbook_core::clock;
use guestbook_core::random::random_string;
use guestbook_core::{GuestbookError, JsonEntryStore, JsonUserStore};

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{default_data_dir, write_config, GuestbookConfig};

const GENERATED_SECRET_LEN: usize = 48;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = ctx.config_path()?;
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    }

    let data_dir = match ctx.cli().data_dir.as_deref() {
        Some(dir) => dir.into(),
        None => default_data_dir()?,
    };
    let config = GuestbookConfig::new(
        data_dir,
        random_string(GENERATED_SECRET_LEN),
        args.domain.clone(),
    );

    match JsonEntryStore::create(config.entries_path(), clock::system()) {
        Ok(_) => {}
        Err(GuestbookError::Conflict(_)) => {
            tracing::info!(path = %config.entries_path().display(), "keeping existing entry store");
        }
        Err(e) => return Err(e.into()),
    }
    JsonUserStore::open(config.users_path(), clock::system())?;
    write_config(&config_path, &config)?;

    if !ctx.json() {
        println!("Wrote config to {}", config_path.display());
        println!("Data directory: {}", config.storage.data_dir);
    } else {
        println!(
            "{}",
            serde_json::json!({
                "config": config_path,
                "data_dir": config.storage.data_dir,
            })
        );
    }
    Ok(())
}
