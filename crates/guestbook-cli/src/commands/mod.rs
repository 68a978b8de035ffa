pub mod entries;
pub mod init;
pub mod session;
pub mod users;

use uuid::Uuid;

/// Parse a user or entry id given on the command line.
pub fn parse_id(value: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|e| anyhow::anyhow!("Invalid id {}: {}", value, e))
}
