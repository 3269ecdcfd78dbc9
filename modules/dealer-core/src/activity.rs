//! Unified activity feed over leads, service jobs and appointments.

use std::fmt;

use chrono::{DateTime, Utc};
use dealer_client::{Appointment, DealerClient, Lead, ServiceRecord};

use crate::error::Result;
use crate::filter::{self, StatusFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Lead,
    Service,
    Appointment,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Lead => "LEAD",
            ActivityKind::Service => "SERVICE",
            ActivityKind::Appointment => "APPOINTMENT",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityItem {
    /// `lead-{id}`, `svc-{id}` or `appt-{id}`.
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub subtitle: String,
    pub date: DateTime<Utc>,
    pub status: String,
}

impl From<&Lead> for ActivityItem {
    fn from(lead: &Lead) -> Self {
        let model = lead
            .vehicle_details
            .as_ref()
            .map(|v| v.model.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or("Unknown");
        Self {
            id: format!("lead-{}", lead.id),
            kind: ActivityKind::Lead,
            title: format!("New Lead: {} {}", lead.first_name, lead.last_name),
            subtitle: format!("Vehicle Interest: {model}"),
            date: lead.created_at,
            status: lead.status.to_string(),
        }
    }
}

impl From<&ServiceRecord> for ActivityItem {
    fn from(record: &ServiceRecord) -> Self {
        let plate = record
            .vehicle_details
            .as_ref()
            .map(|v| v.license_plate.as_str())
            .filter(|p| !p.is_empty())
            .unwrap_or("N/A");
        Self {
            id: format!("svc-{}", record.id),
            kind: ActivityKind::Service,
            title: format!("Service Job: {}", record.description),
            subtitle: format!("Plate: {plate}"),
            date: record.date,
            status: record.status.to_string(),
        }
    }
}

impl From<&Appointment> for ActivityItem {
    fn from(appt: &Appointment) -> Self {
        Self {
            id: format!("appt-{}", appt.id),
            kind: ActivityKind::Appointment,
            title: format!("Appointment: {}", appt.title),
            subtitle: format!("Scheduled for Customer #{}", appt.customer),
            date: appt.start_time,
            status: appt.status.to_string(),
        }
    }
}

/// Merge everything into one feed, newest first.
pub fn merge(
    leads: &[Lead],
    records: &[ServiceRecord],
    appointments: &[Appointment],
) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = leads
        .iter()
        .map(ActivityItem::from)
        .chain(records.iter().map(ActivityItem::from))
        .chain(appointments.iter().map(ActivityItem::from))
        .collect();
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items
}

#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub kind: StatusFilter<ActivityKind>,
    pub search: String,
}

impl ActivityFilter {
    pub fn accepts(&self, item: &ActivityItem) -> bool {
        self.kind.accepts(item.kind)
            && (filter::matches(&item.title, &self.search)
                || filter::matches(&item.subtitle, &self.search)
                || filter::matches(&item.status, &self.search))
    }

    pub fn apply<'a>(&self, items: &'a [ActivityItem]) -> Vec<&'a ActivityItem> {
        items.iter().filter(|i| self.accepts(i)).collect()
    }
}

/// Fetch the three sources concurrently and merge them.
pub async fn load_feed(client: &DealerClient) -> Result<Vec<ActivityItem>> {
    let (leads, records, appointments) = tokio::try_join!(
        client.list_leads(),
        client.list_service_records(),
        client.list_appointments(),
    )?;
    let items = merge(&leads, &records, &appointments);
    tracing::debug!(count = items.len(), "Activity feed loaded");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealer_client::{AppointmentStatus, LeadSource, LeadStatus, ServiceStatus};

    fn lead(id: i64, at: &str) -> Lead {
        Lead {
            id,
            first_name: "Dana".into(),
            last_name: "Reyes".into(),
            phone: "555".into(),
            email: None,
            source: LeadSource::WalkIn,
            vehicle: None,
            vehicle_details: None,
            status: LeadStatus::New,
            quoted_price: None,
            down_payment: None,
            monthly_payment: None,
            term_months: None,
            created_at: at.parse().unwrap(),
        }
    }

    fn record(id: i64, at: &str) -> ServiceRecord {
        ServiceRecord {
            id,
            vehicle: 1,
            vehicle_details: None,
            customer_name: None,
            customer_phone: None,
            description: "Brakes".into(),
            date: at.parse().unwrap(),
            status: ServiceStatus::InProgress,
            parts_cost: 0.0,
            labor_cost: 0.0,
        }
    }

    fn appt(id: i64, at: &str) -> Appointment {
        Appointment {
            id,
            customer: 9,
            customer_name: None,
            vehicle: None,
            title: "Tires".into(),
            start_time: at.parse().unwrap(),
            end_time: at.parse().unwrap(),
            status: AppointmentStatus::Scheduled,
        }
    }

    #[test]
    fn merged_newest_first_with_prefixed_ids() {
        let items = merge(
            &[lead(1, "2026-03-01T10:00:00Z")],
            &[record(2, "2026-03-03T10:00:00Z")],
            &[appt(3, "2026-03-02T10:00:00Z")],
        );
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["svc-2", "appt-3", "lead-1"]);

        assert_eq!(items[2].title, "New Lead: Dana Reyes");
        assert_eq!(items[2].subtitle, "Vehicle Interest: Unknown");
        assert_eq!(items[0].subtitle, "Plate: N/A");
        assert_eq!(items[1].subtitle, "Scheduled for Customer #9");
    }

    #[test]
    fn filter_by_kind_and_status_text() {
        let items = merge(
            &[lead(1, "2026-03-01T10:00:00Z")],
            &[record(2, "2026-03-03T10:00:00Z")],
            &[appt(3, "2026-03-02T10:00:00Z")],
        );

        let only_service = ActivityFilter {
            kind: StatusFilter::only(ActivityKind::Service),
            ..Default::default()
        };
        assert_eq!(only_service.apply(&items).len(), 1);

        let by_status = ActivityFilter {
            search: "in_progress".into(),
            ..Default::default()
        };
        assert_eq!(by_status.apply(&items)[0].id, "svc-2");

        let by_subtitle = ActivityFilter {
            search: "customer #9".into(),
            ..Default::default()
        };
        assert_eq!(by_subtitle.apply(&items)[0].id, "appt-3");
    }
}
