use guestbook_core::SessionStore;

use super::parse_id;
use crate::app::AppContext;
use crate::cli::SessionCommand;

pub fn handle_session(ctx: &AppContext, command: &SessionCommand) -> anyhow::Result<()> {
    let tokens = ctx.token_service()?;

    match command {
        SessionCommand::Issue { user_id, remember } => {
            let user_id = parse_id(user_id)?;
            let session = &ctx.config()?.session;
            let cookie = tokens.create_token(&session.cookie_name, &session.domain, &user_id, *remember)?;
            if ctx.json() {
                println!("{}", serde_json::to_string_pretty(&cookie)?);
            } else {
                println!("Set-Cookie: {}", cookie);
            }
        }
        SessionCommand::Inspect { token } => {
            let user_id = tokens.get_token_value(token)?;
            if ctx.json() {
                println!("{}", serde_json::json!({ "user_id": user_id }));
            } else {
                println!("{}", user_id);
            }
        }
    }
    Ok(())
}
