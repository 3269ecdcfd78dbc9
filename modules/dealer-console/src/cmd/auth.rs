use anyhow::{bail, Result};
use dealer_core::RoleState;

use super::{password_or_prompt, App};

pub async fn login(app: &App, username: &str, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password, "Password")?;
    if username.trim().is_empty() || password.is_empty() {
        bail!("Username and password are required");
    }

    app.gate.authenticate(username.trim(), &password).await?;

    let role = match app.gate.role_state() {
        RoleState::Manager => "manager",
        RoleState::Staff => "staff",
        RoleState::Unknown => "unknown (profile unavailable)",
    };
    println!("Signed in as {} ({role})", username.trim());
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.gate.end_session()?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    let nav = app.shell().await?;

    println!("API:      {}", app.config.api_url);
    println!("User:     {}", nav.username.as_deref().unwrap_or("?"));
    println!(
        "Role:     {}",
        if nav.is_manager { "Manager" } else { "Staff" }
    );
    println!();

    for (section, routes) in nav.sections() {
        if let Some(heading) = section.heading() {
            println!("{heading}");
        }
        for route in routes {
            println!("  {:<18} {}", route.label(), route.path());
        }
    }
    Ok(())
}
