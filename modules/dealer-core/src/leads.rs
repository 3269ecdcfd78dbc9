//! Lead pipeline: filtering and status changes that move vehicles.

use dealer_client::{DealerClient, Lead, LeadStatus, VehicleStatus};

use crate::error::Result;
use crate::filter::{self, StatusFilter};

fn search_text(lead: &Lead) -> String {
    let model = lead
        .vehicle_details
        .as_ref()
        .map(|v| v.model.as_str())
        .unwrap_or_default();
    format!(
        "{} {} {} {}",
        lead.first_name, lead.last_name, lead.phone, model
    )
}

#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub status: StatusFilter<LeadStatus>,
    pub search: String,
}

impl LeadFilter {
    pub fn accepts(&self, lead: &Lead) -> bool {
        self.status.accepts(lead.status) && filter::matches(&search_text(lead), &self.search)
    }

    pub fn apply<'a>(&self, leads: &'a [Lead]) -> Vec<&'a Lead> {
        leads.iter().filter(|l| self.accepts(l)).collect()
    }
}

/// Leads still being worked (not SOLD, not LOST).
pub fn active_count(leads: &[Lead]) -> usize {
    leads.iter().filter(|l| l.status.is_open()).count()
}

/// Vehicle status that follows a lead moving to `status`, if any.
pub fn vehicle_follow_up(status: LeadStatus) -> Option<VehicleStatus> {
    match status {
        LeadStatus::Lost => Some(VehicleStatus::Available),
        LeadStatus::Sold => Some(VehicleStatus::Sold),
        _ => None,
    }
}

/// Move a lead and carry the change over to its vehicle.
pub async fn change_status(client: &DealerClient, lead: &Lead, status: LeadStatus) -> Result<()> {
    client.set_lead_status(lead.id, status).await?;

    if let (Some(vehicle_id), Some(vehicle_status)) = (lead.vehicle, vehicle_follow_up(status)) {
        client.set_vehicle_status(vehicle_id, vehicle_status).await?;
        tracing::info!(
            lead_id = lead.id,
            vehicle_id,
            vehicle_status = %vehicle_status,
            "Vehicle status follows lead"
        );
    }

    tracing::info!(lead_id = lead.id, status = %status, "Lead status changed");
    Ok(())
}

/// Delete a lead, releasing a vehicle held by a deal in negotiation first.
pub async fn delete_lead(client: &DealerClient, lead: &Lead) -> Result<()> {
    if lead.status == LeadStatus::Negotiation {
        if let Some(vehicle_id) = lead.vehicle {
            client
                .set_vehicle_status(vehicle_id, VehicleStatus::Available)
                .await?;
            tracing::info!(lead_id = lead.id, vehicle_id, "Released reserved vehicle");
        }
    }

    client.delete_lead(lead.id).await?;
    tracing::info!(lead_id = lead.id, "Lead deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dealer_client::LeadSource;

    fn lead(id: i64, first: &str, phone: &str, status: LeadStatus) -> Lead {
        Lead {
            id,
            first_name: first.into(),
            last_name: "Doe".into(),
            phone: phone.into(),
            email: None,
            source: LeadSource::WalkIn,
            vehicle: None,
            vehicle_details: None,
            status,
            quoted_price: None,
            down_payment: None,
            monthly_payment: None,
            term_months: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn active_excludes_closed() {
        let leads = vec![
            lead(1, "A", "1", LeadStatus::New),
            lead(2, "B", "2", LeadStatus::Negotiation),
            lead(3, "C", "3", LeadStatus::Sold),
            lead(4, "D", "4", LeadStatus::Lost),
        ];
        assert_eq!(active_count(&leads), 2);
    }

    #[test]
    fn filter_by_phone_and_status() {
        let leads = vec![
            lead(1, "Ann", "555-0100", LeadStatus::New),
            lead(2, "Bob", "555-0199", LeadStatus::Contacted),
        ];
        let f = LeadFilter {
            search: "0199".into(),
            ..Default::default()
        };
        assert_eq!(f.apply(&leads)[0].id, 2);

        let f = LeadFilter {
            status: StatusFilter::only(LeadStatus::New),
            search: "doe".into(),
        };
        assert_eq!(f.apply(&leads).len(), 1);
    }

    #[test]
    fn follow_ups() {
        assert_eq!(vehicle_follow_up(LeadStatus::Lost), Some(VehicleStatus::Available));
        assert_eq!(vehicle_follow_up(LeadStatus::Sold), Some(VehicleStatus::Sold));
        assert_eq!(vehicle_follow_up(LeadStatus::Contacted), None);
    }
}
