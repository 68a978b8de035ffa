use guestbook_core::{EntryStore, GuestbookEntry};

use super::parse_id;
use crate::app::AppContext;
use crate::cli::EntriesCommand;
use crate::output::print_entries;

pub fn handle_entries(ctx: &AppContext, command: &EntriesCommand) -> anyhow::Result<()> {
    let store = ctx.open_entries()?;

    match command {
        EntriesCommand::List => print_entries(&store.list_entries()?, ctx.json()),
        EntriesCommand::Search { snippet } => {
            print_entries(&store.get_entry_by_snippet(snippet)?, ctx.json())
        }
        EntriesCommand::ByName { name } => {
            print_entries(&store.get_entry_by_name(name)?, ctx.json())
        }
        EntriesCommand::ByUser { user_id } => {
            let owner = parse_id(user_id)?;
            print_entries(&store.get_entry_by_id(&owner)?, ctx.json())
        }
        EntriesCommand::Add {
            name,
            message,
            user,
        } => {
            let mut entry = GuestbookEntry::new(name.as_str(), message.as_str());
            if let Some(user) = user {
                entry = entry.with_user(parse_id(user)?);
            }
            let id = store.create_entry(entry)?;
            if ctx.json() {
                println!("{}", serde_json::json!({ "id": id }));
            } else {
                println!("Added entry {}", id);
            }
            Ok(())
        }
        EntriesCommand::Delete { id } => {
            let id = parse_id(id)?;
            store.delete_entry(&id)?;
            if !ctx.json() {
                println!("Deleted entry {}", id);
            }
            Ok(())
        }
    }
}
