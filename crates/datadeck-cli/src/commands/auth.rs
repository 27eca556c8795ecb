//! Account and session subcommands.

use crate::commands::prompt;
use crate::context::AppContext;
use anyhow::Result;
use datadeck_core::identity::DEFAULT_ROLE;

pub async fn signup(ctx: &AppContext, role: Option<String>) -> Result<()> {
    let email = prompt("Email")?;
    let password = prompt("Password")?;
    let role = role.unwrap_or_else(|| DEFAULT_ROLE.to_string());

    let identity = ctx.session.signup(&email, &password, &role).await?;
    println!(
        "Account created. Logged in as {} ({})",
        identity.email, identity.role
    );
    Ok(())
}

pub async fn login(ctx: &AppContext) -> Result<()> {
    let email = prompt("Email")?;
    let password = prompt("Password")?;

    let identity = ctx.session.login(&email, &password).await?;
    println!("Logged in as {} ({})", identity.email, identity.role);
    Ok(())
}

pub async fn logout(ctx: &AppContext) {
    ctx.session.logout().await;
    println!("Logged out.");
}

pub async fn whoami(ctx: &AppContext) {
    match ctx.session.identity().await {
        Some(identity) => println!("{} ({})", identity.email, identity.role),
        None => println!("Not logged in."),
    }
}
