use guestbook_core::storage::{validate_registration, Registration};
use guestbook_core::{EntryStore, GuestbookError, User, UserStore};

use super::parse_id;
use crate::app::AppContext;
use crate::cli::{AddUserArgs, UsersCommand};
use crate::output::{print_user, print_users};
use crate::password::{hash_password, read_password};

pub fn handle_users(ctx: &AppContext, command: &UsersCommand) -> anyhow::Result<()> {
    let store = ctx.open_users()?;

    match command {
        UsersCommand::List => print_users(&store.list_users()?, ctx.json()),
        UsersCommand::Show { key } => {
            let user = match parse_id(key) {
                Ok(id) => store.get_user_by_id(&id)?,
                Err(_) => store.get_user_by_email(key)?,
            }
            .ok_or_else(|| anyhow::anyhow!("User {} not found", key))?;
            let entries = ctx.open_entries()?.get_entry_by_id(&user.id)?;
            print_user(&user.with_entries(entries), ctx.json())
        }
        UsersCommand::Add(args) => handle_add(ctx, &store, args),
        UsersCommand::Delete { id } => {
            let id = parse_id(id)?;
            store.delete_user(&id)?;
            if !ctx.json() {
                println!("Deleted user {}", id);
            }
            Ok(())
        }
        UsersCommand::ResendCode { id } => {
            let id = parse_id(id)?;
            let code = store.create_verification_code(&id)?;
            if ctx.json() {
                println!("{}", serde_json::json!({ "id": id, "code": code }));
            } else {
                println!("{}", code);
            }
            Ok(())
        }
        UsersCommand::Verify { id, code } => {
            let id = parse_id(id)?;
            match store.code_validation(&id, code) {
                Ok(()) => {
                    if !ctx.json() {
                        println!("User {} verified", id);
                    }
                    Ok(())
                }
                Err(GuestbookError::Expired(_)) => Err(anyhow::anyhow!(
                    "Verification code expired; user {} was removed",
                    id
                )),
                Err(e) => Err(e.into()),
            }
        }
    }
}

fn handle_add(
    ctx: &AppContext,
    store: &impl UserStore,
    args: &AddUserArgs,
) -> anyhow::Result<()> {
    let password = read_password(args.password_stdin)?;
    let form = Registration {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.trim().to_string(),
        password: password.clone(),
        password_confirmation: password,
    };
    validate_registration(&form)?;

    let mut user = User::new(
        form.email.as_str(),
        form.display_name(),
        hash_password(&form.password)?,
    );
    if args.admin {
        user = user.admin();
    }
    if args.verified {
        user = user.verified();
    }

    let id = store.create_user(user)?;
    tracing::info!(user_id = %id, "created user");

    let created = store
        .get_user_by_id(&id)?
        .ok_or_else(|| anyhow::anyhow!("User {} vanished after create", id))?;
    if ctx.json() {
        println!(
            "{}",
            serde_json::json!({
                "id": id,
                "verification_code": (!created.is_verified).then_some(&created.verification_code),
            })
        );
    } else {
        println!("Created user {}", id);
        if !created.is_verified {
            println!("Verification code: {}", created.verification_code);
        }
    }
    Ok(())
}
