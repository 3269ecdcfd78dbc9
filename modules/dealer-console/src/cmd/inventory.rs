use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use dealer_client::{VehiclePatch, VehicleStatus};
use dealer_core::filter::StatusFilter;
use dealer_core::inventory::{self, InventoryFilter, VehicleDraft};
use dealer_core::print::dollars;
use dealer_core::Route;

use super::{clip, confirm, App};

const DELETE_PROMPT: &str = "Are you sure you want to delete this vehicle? This cannot be undone.";

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Available,
    Reserved,
    Sold,
    Service,
}

impl From<StatusArg> for VehicleStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Available => VehicleStatus::Available,
            StatusArg::Reserved => VehicleStatus::Reserved,
            StatusArg::Sold => VehicleStatus::Sold,
            StatusArg::Service => VehicleStatus::Service,
        }
    }
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// List vehicles
    List {
        /// Only this status
        #[arg(short, long)]
        status: Option<StatusArg>,

        /// Match year, make, model, VIN or stock number
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Decode a VIN without saving
    Decode { vin: String },

    /// Stock in a new vehicle
    Add(AddArgs),

    /// Update fields on a vehicle
    Edit(EditArgs),

    /// Remove a vehicle (managers)
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    stock: String,

    /// Selling price
    #[arg(long)]
    price: f64,

    /// Prefill make, model, year, trim and body style from this VIN
    #[arg(long)]
    vin: Option<String>,

    #[arg(long)]
    cost: Option<f64>,
    #[arg(long)]
    make: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    trim: Option<String>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    mileage: Option<i64>,
}

#[derive(Args)]
pub struct EditArgs {
    id: i64,
    #[arg(long)]
    make: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    trim: Option<String>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    mileage: Option<i64>,
    #[arg(long)]
    cost: Option<f64>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    status: Option<StatusArg>,
}

pub async fn run(app: &App, cmd: InventoryCommand) -> Result<()> {
    let nav = app.open(Route::Inventory).await?;

    match cmd {
        InventoryCommand::List { status, search } => {
            let vehicles = app.client.list_vehicles().await?;
            let filter = InventoryFilter {
                status: StatusFilter(status.map(VehicleStatus::from)),
                search: search.unwrap_or_default(),
            };

            println!(
                "{:<5} {:<10} {:<28} {:<18} {:>12} {:<10}",
                "ID", "STOCK", "VEHICLE", "VIN", "PRICE", "STATUS"
            );
            for v in filter.apply(&vehicles) {
                println!(
                    "{:<5} {:<10} {:<28} {:<18} {:>12} {:<10}",
                    v.id,
                    clip(&v.stock_number, 10),
                    clip(&v.title(), 28),
                    clip(&v.vin, 18),
                    dollars(v.selling_price),
                    v.status
                );
                if let Some(url) = inventory::photo_url(v.photo.as_deref(), app.client.base_url()) {
                    println!("      photo: {url}");
                }
            }
            println!();
            println!("In stock: {}", inventory::stock_count(&vehicles));
        }

        InventoryCommand::Decode { vin } => {
            let draft = inventory::decode_into_draft(&app.client, &vin).await?;
            println!("VIN:        {}", draft.vin);
            println!("Make:       {}", draft.make);
            println!("Model:      {}", draft.model);
            println!(
                "Year:       {}",
                draft.year.map(|y| y.to_string()).unwrap_or_default()
            );
            println!("Trim:       {}", draft.trim);
            println!("Body style: {}", draft.body_style);
        }

        InventoryCommand::Add(args) => {
            let mut draft = match args.vin.as_deref() {
                Some(vin) => inventory::decode_into_draft(&app.client, vin).await?,
                None => VehicleDraft::default(),
            };
            draft.stock_number = args.stock;
            draft.selling_price = args.price;
            if let Some(cost) = args.cost {
                draft.cost_price = cost;
            }
            if let Some(make) = args.make {
                draft.make = make;
            }
            if let Some(model) = args.model {
                draft.model = model;
            }
            if args.year.is_some() {
                draft.year = args.year;
            }
            if let Some(trim) = args.trim {
                draft.trim = trim;
            }
            if let Some(color) = args.color {
                draft.color = color;
            }
            if let Some(mileage) = args.mileage {
                draft.mileage = mileage;
            }

            let vehicle = inventory::stock_in(&app.client, &draft).await?;
            println!("Stocked in #{} {} ({})", vehicle.id, vehicle.title(), vehicle.stock_number);
        }

        InventoryCommand::Edit(args) => {
            let patch = VehiclePatch {
                make: args.make,
                model: args.model,
                year: args.year,
                trim: args.trim,
                color: args.color,
                mileage: args.mileage,
                cost_price: args.cost,
                selling_price: args.price,
                status: args.status.map(VehicleStatus::from),
            };
            let vehicle = inventory::edit_vehicle(&app.client, args.id, &patch).await?;
            println!("Updated #{} {} [{}]", vehicle.id, vehicle.title(), vehicle.status);
        }

        InventoryCommand::Delete { id, yes } => {
            // Staff are refused before being asked to confirm.
            if nav.is_manager && !confirm(DELETE_PROMPT, yes)? {
                return Ok(());
            }
            inventory::delete_vehicle(&app.client, nav.is_manager, id).await?;
            println!("Deleted vehicle #{id}");
        }
    }
    Ok(())
}
