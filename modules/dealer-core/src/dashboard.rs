//! Dashboard snapshot.

use dealer_client::{
    Analytics, Appointment, DashboardStats, DealerClient, Lead, ServiceRecord, Vehicle,
};

use crate::activity::{self, ActivityItem};
use crate::error::Result;
use crate::inventory;
use crate::leads;

/// Number of feed items on the dashboard.
pub const RECENT_ACTIVITY: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub stock_count: usize,
    pub active_leads: usize,
    pub service_jobs: usize,
    pub inventory_value: f64,
    pub analytics: Analytics,
    pub recent: Vec<ActivityItem>,
}

impl DashboardSummary {
    pub fn build(
        vehicles: &[Vehicle],
        leads: &[Lead],
        records: &[ServiceRecord],
        appointments: &[Appointment],
        analytics: Analytics,
        stats: &DashboardStats,
    ) -> Self {
        let mut recent = activity::merge(leads, records, appointments);
        recent.truncate(RECENT_ACTIVITY);

        Self {
            stock_count: inventory::stock_count(vehicles),
            active_leads: leads::active_count(leads),
            service_jobs: records.len(),
            inventory_value: stats.stats.inventory_value,
            analytics,
            recent,
        }
    }
}

/// Fetch every source the dashboard needs in one concurrent round.
pub async fn load(client: &DealerClient) -> Result<DashboardSummary> {
    let (vehicles, leads, records, appointments, analytics, stats) = tokio::try_join!(
        client.list_vehicles(),
        client.list_leads(),
        client.list_service_records(),
        client.list_appointments(),
        client.analytics(),
        client.dashboard_stats(),
    )?;

    let summary =
        DashboardSummary::build(&vehicles, &leads, &records, &appointments, analytics, &stats);
    tracing::info!(
        stock = summary.stock_count,
        active_leads = summary.active_leads,
        service_jobs = summary.service_jobs,
        "Dashboard loaded"
    );
    Ok(summary)
}
