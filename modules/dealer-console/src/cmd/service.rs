use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Subcommand, ValueEnum};
use dealer_client::{ServiceRecord, ServiceStatus};
use dealer_core::print::{dollars, render_invoice, render_job_card, Letterhead};
use dealer_core::service_lane::{self, Registration, ScanOutcome};
use dealer_core::Route;

use super::{clip, write_document, App};

#[derive(Clone, Copy, ValueEnum)]
pub enum ServiceStatusArg {
    Pending,
    InProgress,
    Completed,
}

impl From<ServiceStatusArg> for ServiceStatus {
    fn from(arg: ServiceStatusArg) -> Self {
        match arg {
            ServiceStatusArg::Pending => ServiceStatus::Pending,
            ServiceStatusArg::InProgress => ServiceStatus::InProgress,
            ServiceStatusArg::Completed => ServiceStatus::Completed,
        }
    }
}

#[derive(Subcommand)]
pub enum ServiceCommand {
    /// Jobs dated today (or --date), newest first
    Queue {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Read a plate from a photo
    Scan { image: PathBuf },

    /// Look a typed plate up among known vehicles
    Lookup { plate: String },

    /// Register a new customer and their vehicle
    Register {
        plate: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Open a job on a vehicle
    Job { vehicle: i64, description: String },

    /// Change a job's status
    Status { id: i64, status: ServiceStatusArg },

    /// Bill parts and labor and close the job
    Bill {
        id: i64,
        #[arg(long, default_value_t = 0.0)]
        parts: f64,
        #[arg(long, default_value_t = 0.0)]
        labor: f64,
        /// Write the invoice to this HTML file
        #[arg(long)]
        invoice: Option<PathBuf>,
    },

    /// Print a job card for the mechanic
    Ticket {
        id: i64,
        #[arg(long)]
        out: PathBuf,
    },
}

fn print_outcome(outcome: &ScanOutcome) {
    match outcome {
        ScanOutcome::Existing(v) => {
            println!(
                "Known vehicle #{}: {} {} {} (owner #{})",
                v.id,
                v.license_plate,
                v.make,
                v.model,
                v.owner
            );
            println!("Open a job with: dealer service job {} \"<description>\"", v.id);
        }
        ScanOutcome::NewCustomer(reg) => {
            println!("Plate {} is not on file.", reg.plate);
            println!(
                "Register with: dealer service register {} --name \"<name>\" --phone \"<phone>\"",
                reg.plate
            );
        }
    }
}

async fn find_record(app: &App, id: i64) -> Result<ServiceRecord> {
    app.client
        .list_service_records()
        .await?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| anyhow!("Service record #{id} not found"))
}

pub async fn run(app: &App, cmd: ServiceCommand) -> Result<()> {
    app.open(Route::Service).await?;

    match cmd {
        ServiceCommand::Queue { date } => {
            let records = app.client.list_service_records().await?;
            let day = date.unwrap_or_else(|| Local::now().date_naive());
            let queue = service_lane::todays_queue(&records, day, &Local);

            println!("Service queue for {day}");
            println!(
                "{:<5} {:<10} {:<20} {:<28} {:<12}",
                "ID", "PLATE", "CUSTOMER", "JOB", "STATUS"
            );
            for r in &queue {
                let plate = r
                    .vehicle_details
                    .as_ref()
                    .map(|v| v.license_plate.as_str())
                    .unwrap_or("N/A");
                println!(
                    "{:<5} {:<10} {:<20} {:<28} {:<12}",
                    r.id,
                    plate,
                    clip(r.customer_name.as_deref().unwrap_or(""), 20),
                    clip(&r.description, 28),
                    r.status.as_str()
                );
            }
            println!();
            println!("{} job(s)", queue.len());
        }

        ServiceCommand::Scan { image } => {
            let bytes = std::fs::read(&image)
                .with_context(|| format!("Failed to read {}", image.display()))?;
            let file_name = image
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "plate.jpg".to_string());
            let outcome = service_lane::scan_plate(&app.client, bytes, &file_name).await?;
            print_outcome(&outcome);
        }

        ServiceCommand::Lookup { plate } => {
            let outcome = service_lane::lookup_plate(&app.client, &plate).await?;
            print_outcome(&outcome);
        }

        ServiceCommand::Register {
            plate,
            name,
            phone,
            make,
            model,
            year,
        } => {
            let mut reg = Registration::for_plate(&plate);
            reg.name = name;
            reg.phone = phone;
            if let Some(make) = make {
                reg.make = make;
            }
            if let Some(model) = model {
                reg.model = model;
            }
            if let Some(year) = year {
                reg.year = year;
            }

            let vehicle = service_lane::register(&app.client, &reg).await?;
            println!(
                "Registered vehicle #{} ({}) for customer #{}",
                vehicle.id, vehicle.license_plate, vehicle.owner
            );
        }

        ServiceCommand::Job {
            vehicle,
            description,
        } => {
            let record = service_lane::create_job(&app.client, vehicle, &description).await?;
            println!("Opened job #{} [{}]", record.id, record.status);
        }

        ServiceCommand::Status { id, status } => {
            let status = ServiceStatus::from(status);
            service_lane::set_job_status(&app.client, id, status).await?;
            println!("Job #{id} is now {status}");
        }

        ServiceCommand::Bill {
            id,
            parts,
            labor,
            invoice,
        } => {
            let record = service_lane::bill_job(&app.client, id, parts, labor).await?;
            println!(
                "Job #{} completed. Parts {}, labor {}, total {}",
                record.id,
                dollars(record.parts_cost),
                dollars(record.labor_cost),
                dollars(record.total_cost())
            );

            if let Some(path) = invoice {
                let html = render_invoice(&Letterhead::default(), &record, Local::now().date_naive());
                write_document(&path, &html)?;
            }
        }

        ServiceCommand::Ticket { id, out } => {
            let record = find_record(app, id).await?;
            write_document(&out, &render_job_card(&Letterhead::default(), &record))?;
        }
    }
    Ok(())
}
