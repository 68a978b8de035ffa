use clap::{Args, Parser, Subcommand};

use guestbook_core::VERSION;

/// Guestbook - operator tool for the guestbook entry and user stores
#[derive(Parser)]
#[command(name = "guestbook")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, env = "GUESTBOOK_CONFIG")]
    pub config: Option<String>,

    /// Directory holding entries.json and users.json (overrides config)
    #[arg(short, long, global = true, env = "GUESTBOOK_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (overridden by GUESTBOOK_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and empty stores
    Init(InitArgs),

    /// Manage guestbook entries
    #[command(subcommand)]
    Entries(EntriesCommand),

    /// Manage user accounts
    #[command(subcommand)]
    Users(UsersCommand),

    /// Issue and inspect session tokens
    #[command(subcommand)]
    Session(SessionCommand),
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Cookie domain written to the config
    #[arg(long)]
    pub domain: Option<String>,
}

#[derive(Subcommand)]
pub enum EntriesCommand {
    /// List all entries, newest first
    List,

    /// Entries whose author name contains SNIPPET
    Search {
        #[arg(value_name = "SNIPPET")]
        snippet: String,
    },

    /// Entries by exact author name
    ByName {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Entries owned by a user
    ByUser {
        #[arg(value_name = "USER_ID")]
        user_id: String,
    },

    /// Add an entry
    Add {
        /// Author name
        #[arg(long)]
        name: String,

        /// Message text
        #[arg(long)]
        message: String,

        /// Owning user id
        #[arg(long)]
        user: Option<String>,
    },

    /// Delete an entry
    Delete {
        #[arg(value_name = "ENTRY_ID")]
        id: String,
    },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List all users by display name
    List,

    /// Show one user by id or email, with their entries
    Show {
        #[arg(value_name = "ID_OR_EMAIL")]
        key: String,
    },

    /// Register a user
    Add(AddUserArgs),

    /// Delete a user
    Delete {
        #[arg(value_name = "USER_ID")]
        id: String,
    },

    /// Issue a fresh verification code and print it
    ResendCode {
        #[arg(value_name = "USER_ID")]
        id: String,
    },

    /// Submit a verification code for a user
    Verify {
        #[arg(value_name = "USER_ID")]
        id: String,

        #[arg(value_name = "CODE")]
        code: String,
    },
}

/// Arguments for `users add`
#[derive(Args)]
pub struct AddUserArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Grant admin rights
    #[arg(long)]
    pub admin: bool,

    /// Mark the account as already verified
    #[arg(long)]
    pub verified: bool,

    /// Read the password from the first line of stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Sign a session token for a user and print the Set-Cookie header
    Issue {
        #[arg(value_name = "USER_ID")]
        user_id: String,

        /// Use the long remember-me lifetime
        #[arg(long)]
        remember: bool,
    },

    /// Verify a token and print the user id it carries
    Inspect {
        #[arg(value_name = "TOKEN")]
        token: String,
    },
}
