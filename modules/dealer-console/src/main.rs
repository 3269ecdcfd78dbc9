//! `dealer`: terminal console for the dealership management system.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dealer_client::DealerError;
use dealer_core::{Config, DeskError};

mod cmd;

use cmd::App;

#[derive(Parser)]
#[command(name = "dealer")]
#[command(about = "Dealership sales, service and inventory console")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the token
    Login {
        username: String,

        /// Read from DEALER_PASSWORD, or prompted for when omitted
        #[arg(long, env = "DEALER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show the signed-in user and the sections they can open
    Whoami,

    /// Stock, lead, service and revenue snapshot
    Dashboard,

    /// Combined feed of leads, service jobs and appointments
    Activity(cmd::reports::ActivityArgs),

    /// Vehicle inventory
    #[command(subcommand)]
    Inventory(cmd::inventory::InventoryCommand),

    /// Sales desking: quotes and deals
    #[command(subcommand)]
    Desk(cmd::desk::DeskCommand),

    /// Sales leads
    #[command(subcommand)]
    Leads(cmd::leads::LeadsCommand),

    /// Service lane
    #[command(subcommand)]
    Service(cmd::service::ServiceCommand),

    /// Service appointment schedule
    #[command(subcommand)]
    Calendar(cmd::calendar::CalendarCommand),

    /// Customer 360 directory
    #[command(subcommand)]
    Customers(cmd::customers::CustomersCommand),

    /// Profit and loss overview (managers)
    Financials,

    /// Staff accounts (managers)
    #[command(subcommand)]
    Team(cmd::team::TeamCommand),
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        if is_unauthorized(&e) {
            eprintln!("Your session may have expired. Run `dealer login <username>` to sign in again.");
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

/// True when the backend refused the stored token (401/403).
fn is_unauthorized(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| match cause.downcast_ref::<DeskError>() {
        Some(DeskError::Api(api)) => api.is_unauthorized(),
        Some(_) => false,
        None => cause
            .downcast_ref::<DealerError>()
            .is_some_and(DealerError::is_unauthorized),
    })
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dealer=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app = App::new(Config::from_env()?)?;

    match cli.command {
        Commands::Login { username, password } => {
            cmd::auth::login(&app, &username, password).await
        }
        Commands::Logout => cmd::auth::logout(&app),
        Commands::Whoami => cmd::auth::whoami(&app).await,
        Commands::Dashboard => cmd::reports::dashboard(&app).await,
        Commands::Activity(args) => cmd::reports::activity(&app, args).await,
        Commands::Inventory(cmd) => cmd::inventory::run(&app, cmd).await,
        Commands::Desk(cmd) => cmd::desk::run(&app, cmd).await,
        Commands::Leads(cmd) => cmd::leads::run(&app, cmd).await,
        Commands::Service(cmd) => cmd::service::run(&app, cmd).await,
        Commands::Calendar(cmd) => cmd::calendar::run(&app, cmd).await,
        Commands::Customers(cmd) => cmd::customers::run(&app, cmd).await,
        Commands::Financials => cmd::reports::financials(&app).await,
        Commands::Team(cmd) => cmd::team::run(&app, cmd).await,
    }
}
