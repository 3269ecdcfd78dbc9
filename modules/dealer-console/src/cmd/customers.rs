use anyhow::{bail, Result};
use chrono::Local;
use clap::Subcommand;
use dealer_client::{CustomerProfile, HistoryKind};
use dealer_core::customers;
use dealer_core::print::dollars;
use dealer_core::Route;

use super::{clip, App};

#[derive(Subcommand)]
pub enum CustomersCommand {
    /// Every known customer with lifetime value
    List {
        /// Name (any case) or phone fragment
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Sales and service timeline for one customer
    Show { query: String },
}

fn print_profile(profile: &CustomerProfile) {
    println!("{}  {}", profile.name, profile.phone);
    println!("Lifetime value: {}", dollars(profile.lifetime_value));
    println!();

    for entry in customers::timeline(profile) {
        let kind = match entry.kind {
            HistoryKind::Sale => "SALE",
            HistoryKind::Service => "SERVICE",
        };
        println!(
            "{}  {:<8} {:<36} {:>12}  {}",
            entry.date.with_timezone(&Local).format("%Y-%m-%d"),
            kind,
            clip(&entry.description, 36),
            dollars(entry.amount),
            entry.status
        );
    }
}

pub async fn run(app: &App, cmd: CustomersCommand) -> Result<()> {
    app.open(Route::Customers).await?;
    let profiles = customers::load_directory(&app.client).await?;

    match cmd {
        CustomersCommand::List { search } => {
            let found = customers::search(&profiles, search.as_deref().unwrap_or_default());
            println!("{:<28} {:<16} {:>14} {:>8}", "NAME", "PHONE", "LIFETIME", "VISITS");
            for c in &found {
                println!(
                    "{:<28} {:<16} {:>14} {:>8}",
                    clip(&c.name, 28),
                    clip(&c.phone, 16),
                    dollars(c.lifetime_value),
                    c.history.len()
                );
            }
        }

        CustomersCommand::Show { query } => {
            let found = customers::search(&profiles, &query);
            match found.as_slice() {
                [] => bail!("No customer matches '{query}'"),
                [profile] => print_profile(profile),
                many => {
                    println!("{} customers match '{query}':", many.len());
                    for c in many {
                        println!("  {}  {}", c.name, c.phone);
                    }
                }
            }
        }
    }
    Ok(())
}
