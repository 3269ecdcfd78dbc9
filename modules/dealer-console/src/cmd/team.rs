use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use dealer_client::NewMemberRole;
use dealer_core::team::{self, MemberDraft};
use dealer_core::Route;

use super::{confirm, password_or_prompt, App};

const DELETE_PROMPT: &str = "Are you sure you want to delete this user? This cannot be undone.";

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum RoleArg {
    Manager,
    #[default]
    Sales,
    Service,
}

impl From<RoleArg> for NewMemberRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Manager => NewMemberRole::Manager,
            RoleArg::Sales => NewMemberRole::Sales,
            RoleArg::Service => NewMemberRole::Service,
        }
    }
}

#[derive(Subcommand)]
pub enum TeamCommand {
    /// List staff accounts
    List,

    /// Create an account
    Add {
        username: String,
        /// Read from DEALER_NEW_PASSWORD, or prompted for when omitted
        #[arg(long, env = "DEALER_NEW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[arg(long, value_enum, default_value_t = RoleArg::Sales)]
        role: RoleArg,
    },

    /// Remove an account
    Remove {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn run(app: &App, cmd: TeamCommand) -> Result<()> {
    let nav = app.open(Route::Team).await?;

    match cmd {
        TeamCommand::List => {
            let members = team::list(&app.client, nav.is_manager).await?;
            println!("{:<5} {:<20} {:<28} {:<14} {:<10}", "ID", "USERNAME", "EMAIL", "ROLE", "JOINED");
            for m in &members {
                println!(
                    "{:<5} {:<20} {:<28} {:<14} {:<10}",
                    m.id,
                    m.username,
                    m.email,
                    m.role.label(),
                    m.date_joined.format("%Y-%m-%d")
                );
            }
        }

        TeamCommand::Add {
            username,
            password,
            role,
        } => {
            let password = password_or_prompt(password, "Password for the new user")?;
            let draft = MemberDraft {
                username,
                password,
                role: role.into(),
            };
            team::create(&app.client, nav.is_manager, &draft).await?;
            println!("Created {}", draft.username.trim());
        }

        TeamCommand::Remove { id, yes } => {
            if !confirm(DELETE_PROMPT, yes)? {
                return Ok(());
            }
            team::remove(&app.client, nav.is_manager, id).await?;
            println!("Removed team member #{id}");
        }
    }
    Ok(())
}
