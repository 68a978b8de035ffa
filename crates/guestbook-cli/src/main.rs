//! Guestbook CLI - operator tool for the guestbook stores
//!
//! Lists, searches, and edits guestbook entries and user accounts in the
//! JSON store files, and issues or inspects session tokens with the
//! configured secret.

mod app;
mod cli;
mod commands;
mod config;
mod output;
mod password;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::AppContext;
use cli::{Cli, Commands};
use commands::entries::handle_entries;
use commands::init::handle_init;
use commands::session::handle_session;
use commands::users::handle_users;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "GUESTBOOK_LOG";

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = AppContext::new(&cli);
    match &cli.command {
        Commands::Init(args) => handle_init(&ctx, args),
        Commands::Entries(command) => handle_entries(&ctx, command),
        Commands::Users(command) => handle_users(&ctx, command),
        Commands::Session(command) => handle_session(&ctx, command),
    }
}
