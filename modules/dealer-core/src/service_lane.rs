//! Service lane: check-in by plate, registration, jobs and billing.

use chrono::{NaiveDate, TimeZone};
use dealer_client::{
    BillingUpdate, DealerClient, NewServiceCustomer, NewServiceRecord, NewServiceVehicle,
    PlateScan, ServiceRecord, ServiceStatus, ServiceVehicle,
};

use crate::error::{DeskError, Result};

/// Model year assumed when registering a vehicle without one.
pub const DEFAULT_YEAR: i32 = 2020;

const UNKNOWN: &str = "Unknown";

/// Records dated on `day` in the given zone, newest first.
pub fn todays_queue<'a, Tz: TimeZone>(
    records: &'a [ServiceRecord],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a ServiceRecord> {
    let mut queue: Vec<_> = records
        .iter()
        .filter(|r| r.date.with_timezone(tz).date_naive() == day)
        .collect();
    queue.sort_by(|a, b| b.date.cmp(&a.date));
    queue
}

pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// New-customer form opened for an unknown plate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub plate: String,
    pub name: String,
    pub phone: String,
    pub make: String,
    pub model: String,
    pub year: i32,
}

impl Registration {
    pub fn for_plate(plate: &str) -> Self {
        Self {
            plate: normalize_plate(plate),
            name: String::new(),
            phone: String::new(),
            make: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            year: DEFAULT_YEAR,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.plate.is_empty() {
            missing.push("plate");
        }
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DeskError::missing(&missing))
        }
    }
}

/// What the lane does next with a plate.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Existing(ServiceVehicle),
    NewCustomer(Registration),
}

impl From<PlateScan> for ScanOutcome {
    fn from(scan: PlateScan) -> Self {
        match scan.existing_vehicle {
            Some(vehicle) => ScanOutcome::Existing(vehicle),
            None => ScanOutcome::NewCustomer(Registration::for_plate(&scan.plate)),
        }
    }
}

/// Send a photo to the plate reader.
pub async fn scan_plate(client: &DealerClient, image: Vec<u8>, file_name: &str) -> Result<ScanOutcome> {
    if image.is_empty() {
        return Err(DeskError::Invalid("image is empty".into()));
    }
    Ok(client.scan_plate(image, file_name).await?.into())
}

/// Typed-in plate: match against known vehicles, both sides upper-cased.
pub async fn lookup_plate(client: &DealerClient, plate: &str) -> Result<ScanOutcome> {
    let plate = normalize_plate(plate);
    if plate.is_empty() {
        return Err(DeskError::missing(&["plate"]));
    }

    let vehicles = client.list_service_vehicles().await?;
    let found = vehicles
        .into_iter()
        .find(|v| normalize_plate(&v.license_plate) == plate);

    tracing::debug!(plate = %plate, known = found.is_some(), "Plate looked up");
    Ok(match found {
        Some(vehicle) => ScanOutcome::Existing(vehicle),
        None => ScanOutcome::NewCustomer(Registration::for_plate(&plate)),
    })
}

/// Create the customer, then their vehicle.
pub async fn register(client: &DealerClient, registration: &Registration) -> Result<ServiceVehicle> {
    registration.validate()?;

    let customer = client
        .create_service_customer(&NewServiceCustomer {
            name: registration.name.trim().to_string(),
            phone: registration.phone.trim().to_string(),
        })
        .await?;

    let vehicle = client
        .create_service_vehicle(&NewServiceVehicle {
            license_plate: registration.plate.clone(),
            make: registration.make.clone(),
            model: registration.model.clone(),
            year: registration.year,
            owner: customer.id,
        })
        .await?;

    tracing::info!(
        customer_id = customer.id,
        vehicle_id = vehicle.id,
        plate = %vehicle.license_plate,
        "Service customer registered"
    );
    Ok(vehicle)
}

/// Open a PENDING job on a vehicle.
pub async fn create_job(client: &DealerClient, vehicle_id: i64, description: &str) -> Result<ServiceRecord> {
    let description = description.trim();
    if description.is_empty() {
        return Err(DeskError::missing(&["description"]));
    }

    let record = client
        .create_service_record(&NewServiceRecord {
            vehicle: vehicle_id,
            description: description.to_string(),
            status: ServiceStatus::Pending,
        })
        .await?;
    tracing::info!(record_id = record.id, vehicle_id, "Service job created");
    Ok(record)
}

pub async fn set_job_status(client: &DealerClient, id: i64, status: ServiceStatus) -> Result<()> {
    client.set_service_status(id, status).await?;
    tracing::info!(record_id = id, status = %status, "Service status changed");
    Ok(())
}

/// Bill parts and labor and close the job. The returned record is what the
/// invoice prints.
pub async fn bill_job(
    client: &DealerClient,
    id: i64,
    parts_cost: f64,
    labor_cost: f64,
) -> Result<ServiceRecord> {
    if !(parts_cost >= 0.0 && labor_cost >= 0.0) {
        return Err(DeskError::Invalid("costs must be zero or more".into()));
    }

    let record = client
        .bill_service_record(
            id,
            &BillingUpdate {
                parts_cost,
                labor_cost,
                status: ServiceStatus::Completed,
            },
        )
        .await?;
    tracing::info!(record_id = id, total = record.total_cost(), "Service job billed");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn record(id: i64, date: &str) -> ServiceRecord {
        ServiceRecord {
            id,
            vehicle: 1,
            vehicle_details: None,
            customer_name: None,
            customer_phone: None,
            description: "Oil".into(),
            date: date.parse().unwrap(),
            status: ServiceStatus::Pending,
            parts_cost: 0.0,
            labor_cost: 0.0,
        }
    }

    #[test]
    fn queue_is_today_newest_first() {
        let records = vec![
            record(1, "2026-03-02T09:00:00Z"),
            record(2, "2026-03-01T23:00:00Z"),
            record(3, "2026-03-02T14:00:00Z"),
        ];
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let ids: Vec<_> = todays_queue(&records, day, &Utc).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn queue_respects_time_zone() {
        let records = vec![record(1, "2026-03-02T03:00:00Z")];
        let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!(todays_queue(&records, day, &pacific).len(), 1);
        assert!(todays_queue(&records, day, &Utc).is_empty());
    }

    #[test]
    fn unknown_plate_prefills_registration() {
        let outcome = ScanOutcome::from(PlateScan {
            plate: "abc 123".into(),
            existing_vehicle: None,
        });
        let ScanOutcome::NewCustomer(reg) = outcome else {
            panic!("expected registration");
        };
        assert_eq!(reg.plate, "ABC 123");
        assert_eq!(reg.make, "Unknown");
        assert_eq!(reg.model, "Unknown");
        assert_eq!(reg.year, 2020);
    }

    #[test]
    fn registration_needs_name_and_phone() {
        let mut reg = Registration::for_plate("XYZ9");
        let err = reg.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in: name, phone");
        reg.name = "Sam".into();
        reg.phone = "555".into();
        assert!(reg.validate().is_ok());
    }
}
