use anyhow::{anyhow, Result};
use clap::{Subcommand, ValueEnum};
use dealer_client::{Lead, LeadStatus};
use dealer_core::filter::StatusFilter;
use dealer_core::leads::{self, LeadFilter};
use dealer_core::Route;

use super::{clip, confirm, App};

const DELETE_PROMPT: &str =
    "Are you sure? If this lead is in negotiation, the vehicle will be released.";

#[derive(Clone, Copy, ValueEnum)]
pub enum LeadStatusArg {
    New,
    Contacted,
    TestDrive,
    Negotiation,
    Sold,
    Lost,
}

impl From<LeadStatusArg> for LeadStatus {
    fn from(arg: LeadStatusArg) -> Self {
        match arg {
            LeadStatusArg::New => LeadStatus::New,
            LeadStatusArg::Contacted => LeadStatus::Contacted,
            LeadStatusArg::TestDrive => LeadStatus::TestDrive,
            LeadStatusArg::Negotiation => LeadStatus::Negotiation,
            LeadStatusArg::Sold => LeadStatus::Sold,
            LeadStatusArg::Lost => LeadStatus::Lost,
        }
    }
}

#[derive(Subcommand)]
pub enum LeadsCommand {
    /// List leads
    List {
        #[arg(short, long)]
        status: Option<LeadStatusArg>,

        /// Match name, phone or vehicle model
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Move a lead; LOST frees its vehicle, SOLD marks it sold
    Status { id: i64, status: LeadStatusArg },

    /// Delete a lead, releasing a reserved vehicle
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

async fn find_lead(app: &App, id: i64) -> Result<Lead> {
    app.client
        .list_leads()
        .await?
        .into_iter()
        .find(|l| l.id == id)
        .ok_or_else(|| anyhow!("Lead #{id} not found"))
}

pub async fn run(app: &App, cmd: LeadsCommand) -> Result<()> {
    app.open(Route::Leads).await?;

    match cmd {
        LeadsCommand::List { status, search } => {
            let all = app.client.list_leads().await?;
            let filter = LeadFilter {
                status: StatusFilter(status.map(LeadStatus::from)),
                search: search.unwrap_or_default(),
            };

            println!(
                "{:<5} {:<24} {:<14} {:<20} {:<12} {:<10}",
                "ID", "NAME", "PHONE", "VEHICLE", "STATUS", "SOURCE"
            );
            for lead in filter.apply(&all) {
                let vehicle = lead
                    .vehicle_details
                    .as_ref()
                    .map(|v| v.title())
                    .unwrap_or_default();
                println!(
                    "{:<5} {:<24} {:<14} {:<20} {:<12} {:<10}",
                    lead.id,
                    clip(&lead.full_name(), 24),
                    clip(&lead.phone, 14),
                    clip(&vehicle, 20),
                    lead.status.as_str(),
                    lead.source.as_str()
                );
            }
            println!();
            println!("Active: {}", leads::active_count(&all));
        }

        LeadsCommand::Status { id, status } => {
            let lead = find_lead(app, id).await?;
            let status = LeadStatus::from(status);
            leads::change_status(&app.client, &lead, status).await?;
            println!("Lead #{id} is now {status}");
        }

        LeadsCommand::Delete { id, yes } => {
            let lead = find_lead(app, id).await?;
            if !confirm(DELETE_PROMPT, yes)? {
                return Ok(());
            }
            leads::delete_lead(&app.client, &lead).await?;
            println!("Deleted lead #{id}");
        }
    }
    Ok(())
}
