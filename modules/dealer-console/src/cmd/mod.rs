//! Subcommand implementations and the shared console context.

pub mod auth;
pub mod calendar;
pub mod customers;
pub mod desk;
pub mod inventory;
pub mod leads;
pub mod reports;
pub mod service;
pub mod team;

use std::path::Path;

use anyhow::{bail, Context, Result};
use dealer_client::DealerClient;
use dialoguer::{Confirm, Password};
use dealer_core::{Config, NavShell, Route, RouteAccess, Screen, SessionGate};

pub struct App {
    pub config: Config,
    pub client: DealerClient,
    pub gate: SessionGate<DealerClient>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let client = config.client()?;
        let gate = SessionGate::new(client.clone()).context("Failed to read stored token")?;
        tracing::debug!(api_url = %config.api_url, "Console context ready");
        Ok(Self {
            config,
            client,
            gate,
        })
    }

    /// Restore the stored session and return the navigation shell.
    pub async fn shell(&self) -> Result<NavShell> {
        self.gate.restore_session().await?;
        match Screen::resolve(&self.gate.snapshot()) {
            Screen::Shell(nav) => Ok(nav),
            Screen::Login => bail!("Not signed in. Run `dealer login <username>` first."),
            Screen::Loading => bail!("Session is still loading"),
        }
    }

    /// Open a section, refusing manager-only ones for staff.
    pub async fn open(&self, route: Route) -> Result<NavShell> {
        let nav = self.shell().await?;
        match nav.open(route) {
            RouteAccess::Granted(_) => Ok(nav),
            RouteAccess::Denied(route) => {
                bail!("Access denied: {} requires manager privileges", route)
            }
        }
    }
}

/// Ask before a destructive action. `assume_yes` skips the prompt.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Use the given password, or read one without echo.
pub fn password_or_prompt(given: Option<String>, prompt: &str) -> Result<String> {
    match given {
        Some(p) => Ok(p),
        None => Ok(Password::new().with_prompt(prompt).interact()?),
    }
}

/// Write a rendered document and tell the user where it went.
pub fn write_document(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Truncate for table columns.
pub fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_is_skipped_with_yes() {
        assert!(confirm("Delete this appointment?", true).unwrap());
    }

    #[test]
    fn given_password_is_used_without_prompting() {
        let p = password_or_prompt(Some("hunter2".into()), "Password").unwrap();
        assert_eq!(p, "hunter2");
    }

    #[test]
    fn clip_keeps_short_text() {
        assert_eq!(clip("Civic", 10), "Civic");
    }

    #[test]
    fn clip_truncates_on_char_boundaries() {
        assert_eq!(clip("Señor Automóvil", 6), "Señor…");
        assert_eq!(clip("Señor Automóvil", 6).chars().count(), 6);
    }
}
