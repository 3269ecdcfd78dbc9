//! Sales desking: payment math and turning a quote into a reserved deal.

use dealer_client::{
    DealerClient, Lead, LeadSource, LeadStatus, NewLead, Vehicle, VehicleStatus,
};

use crate::error::{DeskError, Result};
use crate::filter;
use crate::inventory::search_text;

pub const DEFAULT_DOWN_PAYMENT: f64 = 2000.0;
pub const DEFAULT_APR: f64 = 5.9;
pub const DEFAULT_TERM_MONTHS: u32 = 60;

/// Monthly payment on an amortized loan.
///
/// Returns 0 when there is nothing to finance or no term, and a flat split
/// when the rate is 0.
pub fn monthly_payment(price: f64, down_payment: f64, apr: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let principal = price - down_payment;
    if principal <= 0.0 {
        return 0.0;
    }

    let n = f64::from(months);
    let rate = apr / 100.0 / 12.0;
    if rate == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + rate).powf(n);
    let payment = principal * rate * growth / (growth - 1.0);
    if payment.is_finite() {
        payment
    } else {
        0.0
    }
}

/// Round to cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The numbers on the desk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DealTerms {
    pub price: f64,
    pub down_payment: f64,
    pub apr: f64,
    pub term_months: u32,
}

impl DealTerms {
    /// Default terms quoted at the vehicle's sticker price.
    pub fn for_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            price: vehicle.selling_price,
            down_payment: DEFAULT_DOWN_PAYMENT,
            apr: DEFAULT_APR,
            term_months: DEFAULT_TERM_MONTHS,
        }
    }

    pub fn amount_financed(&self) -> f64 {
        self.price - self.down_payment
    }

    pub fn monthly_payment(&self) -> f64 {
        monthly_payment(self.price, self.down_payment, self.apr, self.term_months)
    }

    /// Note stored on the lead so the quote can be reconstructed later.
    pub fn structure_note(&self) -> String {
        format!(
            "Deal Structure: Price ${}, Down ${}, Rate {}%, Term {}mo.",
            self.price, self.down_payment, self.apr, self.term_months
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buyer {
    pub name: String,
    pub phone: String,
    pub source: LeadSource,
}

/// Split "First Last Name" on the first space.
pub fn split_name(name: &str) -> (String, String) {
    match name.trim().split_once(' ') {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (name.trim().to_string(), String::new()),
    }
}

/// Vehicles that can be desked: AVAILABLE only, narrowed by search.
pub fn desk_candidates<'a>(vehicles: &'a [Vehicle], search: &str) -> Vec<&'a Vehicle> {
    vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Available)
        .filter(|v| filter::matches(&search_text(v), search))
        .collect()
}

/// Check a quote before anything is sent.
pub fn validate_deal<'a>(vehicle: Option<&'a Vehicle>, buyer: &Buyer) -> Result<&'a Vehicle> {
    let vehicle = vehicle.ok_or(DeskError::NoVehicleSelected)?;
    if buyer.name.trim().is_empty() || buyer.phone.trim().is_empty() {
        return Err(DeskError::MissingCustomerDetails);
    }
    if vehicle.status != VehicleStatus::Available {
        return Err(DeskError::VehicleUnavailable(vehicle.status));
    }
    Ok(vehicle)
}

/// The NEGOTIATION lead recorded for a desked deal.
pub fn build_lead(vehicle: &Vehicle, buyer: &Buyer, terms: &DealTerms) -> NewLead {
    let (first_name, last_name) = split_name(&buyer.name);
    NewLead {
        first_name,
        last_name,
        phone: buyer.phone.trim().to_string(),
        source: buyer.source,
        vehicle: Some(vehicle.id),
        status: LeadStatus::Negotiation,
        quoted_price: Some(terms.price),
        down_payment: Some(terms.down_payment),
        monthly_payment: Some(round_cents(terms.monthly_payment())),
        term_months: Some(terms.term_months),
        notes: Some(terms.structure_note()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedDeal {
    pub lead: Lead,
    pub vehicle_id: i64,
}

/// Record the deal as a lead and reserve the vehicle.
///
/// If the reservation fails the new lead is deleted again so no
/// NEGOTIATION lead is left pointing at an unreserved vehicle. The
/// reservation error is returned either way.
pub async fn save_deal(
    client: &DealerClient,
    vehicle: Option<&Vehicle>,
    buyer: &Buyer,
    terms: &DealTerms,
) -> Result<SavedDeal> {
    let vehicle = validate_deal(vehicle, buyer)?;

    let lead = client.create_lead(&build_lead(vehicle, buyer, terms)).await?;

    if let Err(e) = client
        .set_vehicle_status(vehicle.id, VehicleStatus::Reserved)
        .await
    {
        tracing::warn!(
            lead_id = lead.id,
            vehicle_id = vehicle.id,
            error = %e,
            "Reserving vehicle failed; removing lead"
        );
        if let Err(cleanup) = client.delete_lead(lead.id).await {
            tracing::warn!(lead_id = lead.id, error = %cleanup, "Failed to remove orphaned lead");
        }
        return Err(e.into());
    }

    tracing::info!(
        lead_id = lead.id,
        vehicle_id = vehicle.id,
        monthly = round_cents(terms.monthly_payment()),
        "Deal saved"
    );
    Ok(SavedDeal {
        lead,
        vehicle_id: vehicle.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: i64, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id,
            vin: "1HGCM82633A004352".into(),
            stock_number: format!("STK-{id}"),
            make: "Honda".into(),
            model: "Civic".into(),
            year: Some(2021),
            trim: String::new(),
            body_style: String::new(),
            color: "Blue".into(),
            mileage: 12000,
            license_plate: None,
            cost_price: 17000.0,
            selling_price: 21500.0,
            sold_date: None,
            status,
            photo: None,
        }
    }

    fn buyer() -> Buyer {
        Buyer {
            name: "Dana Reyes".into(),
            phone: "555-0100".into(),
            source: LeadSource::WalkIn,
        }
    }

    #[test]
    fn zero_principal_pays_nothing() {
        assert_eq!(monthly_payment(2000.0, 2000.0, 5.9, 60), 0.0);
        assert_eq!(monthly_payment(1000.0, 2000.0, 5.9, 60), 0.0);
    }

    #[test]
    fn zero_term_pays_nothing() {
        assert_eq!(monthly_payment(20000.0, 2000.0, 5.9, 0), 0.0);
    }

    #[test]
    fn zero_rate_splits_evenly() {
        assert_eq!(monthly_payment(14000.0, 2000.0, 0.0, 60), 200.0);
    }

    #[test]
    fn annuity_payment() {
        let payment = monthly_payment(20000.0, 2000.0, 6.0, 60);
        assert!((payment - 347.99).abs() < 0.01, "got {payment}");
    }

    #[test]
    fn name_splits_on_first_space() {
        assert_eq!(split_name("Dana Reyes"), ("Dana".into(), "Reyes".into()));
        assert_eq!(
            split_name("Mary Ann Smith"),
            ("Mary".into(), "Ann Smith".into())
        );
        assert_eq!(split_name("Cher"), ("Cher".into(), String::new()));
    }

    #[test]
    fn candidates_exclude_unavailable() {
        let stock = vec![
            vehicle(1, VehicleStatus::Available),
            vehicle(2, VehicleStatus::Reserved),
            vehicle(3, VehicleStatus::Sold),
        ];
        let ids: Vec<_> = desk_candidates(&stock, "civic").iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn validation_order() {
        let available = vehicle(1, VehicleStatus::Available);
        let reserved = vehicle(2, VehicleStatus::Reserved);

        assert!(matches!(
            validate_deal(None, &buyer()),
            Err(DeskError::NoVehicleSelected)
        ));
        assert!(matches!(
            validate_deal(Some(&available), &Buyer::default()),
            Err(DeskError::MissingCustomerDetails)
        ));

        let err = validate_deal(Some(&reserved), &buyer()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "This vehicle is currently RESERVED. Cannot negotiate."
        );
        assert!(validate_deal(Some(&available), &buyer()).is_ok());
    }

    #[test]
    fn lead_carries_the_quote() {
        let v = vehicle(7, VehicleStatus::Available);
        let terms = DealTerms::for_vehicle(&v);
        let lead = build_lead(&v, &buyer(), &terms);

        assert_eq!(lead.first_name, "Dana");
        assert_eq!(lead.last_name, "Reyes");
        assert_eq!(lead.status, LeadStatus::Negotiation);
        assert_eq!(lead.vehicle, Some(7));
        assert_eq!(lead.quoted_price, Some(21500.0));
        assert_eq!(lead.down_payment, Some(2000.0));
        assert_eq!(lead.term_months, Some(60));
        assert_eq!(
            lead.notes.as_deref(),
            Some("Deal Structure: Price $21500, Down $2000, Rate 5.9%, Term 60mo.")
        );
        let monthly = lead.monthly_payment.unwrap();
        assert_eq!(monthly, round_cents(monthly));
    }
}
