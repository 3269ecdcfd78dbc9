use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand, ValueEnum};
use dealer_client::{LeadSource, Vehicle};
use dealer_core::desking::{self, Buyer, DealTerms};
use dealer_core::print::{dollars, render_bill_of_sale, Letterhead};
use dealer_core::Route;

use super::{clip, write_document, App};

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum SourceArg {
    #[default]
    WalkIn,
    Facebook,
    Google,
    Referral,
    Website,
}

impl From<SourceArg> for LeadSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::WalkIn => LeadSource::WalkIn,
            SourceArg::Facebook => LeadSource::Facebook,
            SourceArg::Google => LeadSource::Google,
            SourceArg::Referral => LeadSource::Referral,
            SourceArg::Website => LeadSource::Website,
        }
    }
}

#[derive(Subcommand)]
pub enum DeskCommand {
    /// Vehicles that can be desked (AVAILABLE only)
    Candidates {
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Work out a payment; optionally print a bill of sale
    Quote(QuoteArgs),

    /// Save the deal as a lead and reserve the vehicle
    Save {
        #[command(flatten)]
        quote: QuoteArgs,

        #[arg(long, value_enum, default_value_t = SourceArg::WalkIn)]
        source: SourceArg,
    },
}

#[derive(Args)]
pub struct QuoteArgs {
    /// Inventory id of the vehicle
    vehicle: i64,

    /// Defaults to the vehicle's selling price
    #[arg(long)]
    price: Option<f64>,

    #[arg(long, default_value_t = desking::DEFAULT_DOWN_PAYMENT)]
    down: f64,

    #[arg(long, default_value_t = desking::DEFAULT_APR)]
    apr: f64,

    #[arg(long, default_value_t = desking::DEFAULT_TERM_MONTHS)]
    term: u32,

    /// Customer name
    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    phone: String,

    /// Write a bill of sale to this HTML file
    #[arg(long)]
    out: Option<PathBuf>,
}

impl QuoteArgs {
    fn terms(&self, vehicle: &Vehicle) -> DealTerms {
        DealTerms {
            price: self.price.unwrap_or(vehicle.selling_price),
            down_payment: self.down,
            apr: self.apr,
            term_months: self.term,
        }
    }

    fn buyer(&self, source: SourceArg) -> Buyer {
        Buyer {
            name: self.name.clone(),
            phone: self.phone.clone(),
            source: source.into(),
        }
    }
}

fn print_quote(vehicle: &Vehicle, terms: &DealTerms) {
    println!("Vehicle:          {} ({})", vehicle.title(), vehicle.stock_number);
    println!("Price:            {}", dollars(terms.price));
    println!("Down payment:     {}", dollars(terms.down_payment));
    println!("Amount financed:  {}", dollars(terms.amount_financed()));
    println!("APR:              {}%", terms.apr);
    println!("Term:             {} months", terms.term_months);
    println!("Monthly payment:  {}", dollars(terms.monthly_payment()));
}

pub async fn run(app: &App, cmd: DeskCommand) -> Result<()> {
    app.open(Route::Sales).await?;

    match cmd {
        DeskCommand::Candidates { search } => {
            let vehicles = app.client.list_vehicles().await?;
            for v in desking::desk_candidates(&vehicles, search.as_deref().unwrap_or_default()) {
                println!(
                    "{:<5} {:<10} {:<30} {:>12}",
                    v.id,
                    clip(&v.stock_number, 10),
                    clip(&v.title(), 30),
                    dollars(v.selling_price)
                );
            }
        }

        DeskCommand::Quote(quote) => {
            let vehicle = app.client.get_vehicle(quote.vehicle).await?;
            let terms = quote.terms(&vehicle);
            print_quote(&vehicle, &terms);

            if let Some(path) = &quote.out {
                let buyer = quote.buyer(SourceArg::default());
                let today = Local::now().date_naive();
                if let Some(html) =
                    render_bill_of_sale(&Letterhead::default(), Some(&vehicle), &buyer, &terms, today)
                {
                    write_document(path, &html)?;
                }
            }
        }

        DeskCommand::Save { quote, source } => {
            let vehicle = app.client.get_vehicle(quote.vehicle).await?;
            let terms = quote.terms(&vehicle);
            let buyer = quote.buyer(source);

            let saved = desking::save_deal(&app.client, Some(&vehicle), &buyer, &terms).await?;
            print_quote(&vehicle, &terms);
            println!();
            println!(
                "Deal saved as lead #{} for {}; vehicle #{} reserved",
                saved.lead.id,
                saved.lead.full_name(),
                saved.vehicle_id
            );

            if let Some(path) = &quote.out {
                let today = Local::now().date_naive();
                if let Some(html) =
                    render_bill_of_sale(&Letterhead::default(), Some(&vehicle), &buyer, &terms, today)
                {
                    write_document(path, &html)?;
                }
            }
        }
    }
    Ok(())
}
