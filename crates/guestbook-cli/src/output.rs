//! Table and JSON output for entries and users.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use guestbook_core::{GuestbookEntry, User};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn entry_row(entry: &GuestbookEntry) -> Vec<String> {
    vec![
        entry.id.to_string(),
        entry.created_at.format(TIMESTAMP_FORMAT).to_string(),
        entry.name.clone(),
        entry.message.clone(),
        entry.user_id.map(|id| id.to_string()).unwrap_or_default(),
    ]
}

pub fn print_entries(entries: &[GuestbookEntry], json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(entries);
    }
    if entries.is_empty() {
        println!("No entries.");
        return Ok(());
    }
    let rows = entries.iter().map(entry_row).collect();
    println!(
        "{}",
        table(&["ID", "Created", "Name", "Message", "User"], rows)
    );
    Ok(())
}

/// JSON view of a user. The password hash is never printed.
fn user_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "email": user.email,
        "name": user.name,
        "is_admin": user.is_admin,
        "is_verified": user.is_verified,
        "code_expires_at": user.code_expires_at,
        "entries": user.entries,
    })
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

pub fn print_users(users: &[User], json: bool) -> anyhow::Result<()> {
    if json {
        let values: Vec<serde_json::Value> = users.iter().map(user_json).collect();
        return print_json(&values);
    }
    if users.is_empty() {
        println!("No users.");
        return Ok(());
    }
    let rows = users
        .iter()
        .map(|user| {
            vec![
                user.id.to_string(),
                user.name.clone(),
                user.email.clone(),
                yes_no(user.is_admin),
                yes_no(user.is_verified),
            ]
        })
        .collect();
    println!(
        "{}",
        table(&["ID", "Name", "Email", "Admin", "Verified"], rows)
    );
    Ok(())
}

pub fn print_user(user: &User, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&user_json(user));
    }
    println!("ID:        {}", user.id);
    println!("Name:      {}", user.name);
    println!("Email:     {}", user.email);
    println!("Admin:     {}", yes_no(user.is_admin));
    println!("Verified:  {}", yes_no(user.is_verified));
    if let Some(expires_at) = user.code_expires_at.filter(|_| !user.is_verified) {
        println!("Code expires: {}", expires_at.format(TIMESTAMP_FORMAT));
    }
    println!();
    print_entries(&user.entries, false)
}
