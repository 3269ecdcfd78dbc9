//! Dashboard, activity log and financials.

use anyhow::Result;
use chrono::Local;
use clap::{Args, ValueEnum};
use dealer_core::activity::{self, ActivityFilter, ActivityItem, ActivityKind};
use dealer_core::filter::StatusFilter;
use dealer_core::print::dollars;
use dealer_core::{dashboard, financials, Route};

use super::{clip, App};

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Lead,
    Service,
    Appointment,
}

impl From<KindArg> for ActivityKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Lead => ActivityKind::Lead,
            KindArg::Service => ActivityKind::Service,
            KindArg::Appointment => ActivityKind::Appointment,
        }
    }
}

#[derive(Args)]
pub struct ActivityArgs {
    #[arg(short, long)]
    kind: Option<KindArg>,

    #[arg(short = 'q', long)]
    search: Option<String>,

    /// Show at most this many entries
    #[arg(short = 'n', long, default_value_t = 50)]
    limit: usize,
}

fn print_item(item: &ActivityItem) {
    println!(
        "{}  {:<12} {:<34} {:<28} {}",
        item.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        item.kind.as_str(),
        clip(&item.title, 34),
        clip(&item.subtitle, 28),
        item.status
    );
}

pub async fn dashboard(app: &App) -> Result<()> {
    let nav = app.open(Route::Dashboard).await?;
    let summary = dashboard::load(&app.client).await?;

    if let Some(user) = &nav.username {
        println!("Welcome back, {user}");
        println!();
    }
    println!("Vehicles in stock:  {}", summary.stock_count);
    println!("Active leads:       {}", summary.active_leads);
    println!("Service jobs:       {}", summary.service_jobs);
    println!("Inventory value:    {}", dollars(summary.inventory_value));

    if !summary.analytics.lead_sources.is_empty() {
        println!();
        println!("Lead sources");
        for s in &summary.analytics.lead_sources {
            println!("  {:<14} {:>6}", s.source, s.value);
        }
    }

    if !summary.analytics.revenue_chart.is_empty() {
        println!();
        println!("Revenue");
        for point in &summary.analytics.revenue_chart {
            println!("  {:<14} {:>14}", point.name, dollars(point.total));
        }
    }

    println!();
    println!("Recent activity");
    for item in &summary.recent {
        print_item(item);
    }
    Ok(())
}

pub async fn activity(app: &App, args: ActivityArgs) -> Result<()> {
    app.open(Route::Activity).await?;

    let items = activity::load_feed(&app.client).await?;
    let filter = ActivityFilter {
        kind: StatusFilter(args.kind.map(ActivityKind::from)),
        search: args.search.unwrap_or_default(),
    };
    let shown = filter.apply(&items);

    for item in shown.iter().take(args.limit) {
        print_item(item);
    }
    println!();
    println!("{} of {} entries", shown.len().min(args.limit), items.len());
    Ok(())
}

pub async fn financials(app: &App) -> Result<()> {
    let nav = app.open(Route::Financials).await?;
    let summary = financials::load(&app.client, nav.is_manager).await?;

    let kpi = &summary.kpi;
    println!("Inventory value:  {}", dollars(kpi.inventory_value));
    println!("Total revenue:    {}", dollars(kpi.total_revenue));
    println!("Sales profit:     {}", dollars(kpi.sales_profit));
    println!("Service revenue:  {}", dollars(kpi.service_revenue));

    println!();
    println!("{:<10} {:>14} {:>14} {:>14}", "MONTH", "REVENUE", "COST", "PROFIT");
    for m in &summary.chart_data {
        println!(
            "{:<10} {:>14} {:>14} {:>14}",
            m.name,
            dollars(m.revenue),
            dollars(m.cost),
            dollars(m.profit)
        );
    }

    println!();
    println!("{:<30} {:>12} {:>12} {:>12} {:>8}", "RECENT SALE", "SOLD FOR", "COST", "PROFIT", "MARGIN");
    for sale in &summary.recent_sales {
        println!(
            "{:<30} {:>12} {:>12} {:>12} {:>7.1}%",
            clip(&sale.vehicle, 30),
            dollars(sale.sold_for),
            dollars(sale.cost),
            dollars(sale.profit),
            sale.margin
        );
    }
    Ok(())
}
