//! Account and session command handlers.

use anyhow::{Result, bail};
use shelf_core::session::mask_token;
use shelf_core::{SessionStore, messages};

use super::{Context, value_or_prompt};

pub async fn login(
    ctx: &mut Context,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let username = value_or_prompt(username, "Username: ", "Username")?;
    let password = value_or_prompt(password, "Password: ", "Password")?;

    let token = match ctx.anonymous().login(&username, &password).await {
        Ok(token) => token,
        Err(err) => {
            // The backend's reason is deliberately not shown.
            tracing::warn!(error = %err, "login failed");
            bail!(messages::LOGIN_FAILED);
        }
    };

    let masked = mask_token(&token.access_token);
    ctx.session.sign_in(token.access_token)?;
    println!("✓ Logged in as {username} (token: {masked})");
    println!(
        "  Session saved to: {}",
        SessionStore::default_location().path().display()
    );
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    if !ctx.session.is_authenticated() {
        println!("Not logged in (no session found).");
        return Ok(());
    }
    ctx.session.sign_out()?;
    println!("✓ Logged out");
    Ok(())
}

pub async fn register(
    ctx: &Context,
    username: Option<String>,
    password: Option<String>,
    confirm: Option<String>,
) -> Result<()> {
    let username = value_or_prompt(username, "Username: ", "Username")?;
    let password = value_or_prompt(password, "Password: ", "Password")?;
    let confirm = value_or_prompt(confirm, "Confirm password: ", "Password confirmation")?;

    if password != confirm {
        bail!(messages::PASSWORDS_DO_NOT_MATCH);
    }

    match ctx.anonymous().register(&username, &password).await {
        Ok(()) => {
            println!("✓ {}", messages::REGISTER_SUCCESS);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(error = %err, "registration failed");
            bail!("{}", messages::register_failed(err.detail.as_deref()))
        }
    }
}

pub fn status(ctx: &Context) {
    match ctx.session.token() {
        Some(token) => println!("Logged in (token: {})", mask_token(token)),
        None => println!("Not logged in"),
    }
    println!("Backend: {}", ctx.base_url());
    println!(
        "Session file: {}",
        SessionStore::default_location().path().display()
    );
}
