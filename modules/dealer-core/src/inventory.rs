//! Inventory list filters and the stock-in draft.

use dealer_client::{DealerClient, DecodedVin, NewVehicle, Vehicle, VehiclePatch, VehicleStatus};

use crate::error::{DeskError, Result};
use crate::filter::{self, StatusFilter};

/// Longest body style the backend accepts.
const BODY_STYLE_MAX: usize = 50;

/// Text the inventory search runs against.
pub fn search_text(vehicle: &Vehicle) -> String {
    let year = vehicle.year.map(|y| y.to_string()).unwrap_or_default();
    format!(
        "{} {} {} {} {}",
        year, vehicle.make, vehicle.model, vehicle.vin, vehicle.stock_number
    )
}

#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub status: StatusFilter<VehicleStatus>,
    pub search: String,
}

impl InventoryFilter {
    pub fn accepts(&self, vehicle: &Vehicle) -> bool {
        self.status.accepts(vehicle.status) && filter::matches(&search_text(vehicle), &self.search)
    }

    pub fn apply<'a>(&self, vehicles: &'a [Vehicle]) -> Vec<&'a Vehicle> {
        vehicles.iter().filter(|v| self.accepts(v)).collect()
    }
}

/// Vehicles on the lot: AVAILABLE or RESERVED.
pub fn stock_count(vehicles: &[Vehicle]) -> usize {
    vehicles.iter().filter(|v| v.status.is_in_stock()).count()
}

/// Absolute URL for a vehicle photo. Absolute paths pass through; relative
/// media paths are served from the API host.
pub fn photo_url(photo: Option<&str>, base_url: &str) -> Option<String> {
    let path = photo.filter(|p| !p.is_empty())?;
    if path.starts_with("http") {
        return Some(path.to_string());
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{base}{path}"))
    } else {
        Some(format!("{base}/{path}"))
    }
}

/// Stock-in form state.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub vin: String,
    pub stock_number: String,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub trim: String,
    pub body_style: String,
    pub color: String,
    pub mileage: i64,
    pub cost_price: f64,
    pub selling_price: f64,
    pub status: VehicleStatus,
}

impl Default for VehicleDraft {
    fn default() -> Self {
        Self {
            vin: String::new(),
            stock_number: String::new(),
            make: String::new(),
            model: String::new(),
            year: None,
            trim: String::new(),
            body_style: String::new(),
            color: "Black".to_string(),
            mileage: 0,
            cost_price: 0.0,
            selling_price: 0.0,
            status: VehicleStatus::Available,
        }
    }
}

impl VehicleDraft {
    /// Fill the decoder's fields into the draft. Fields the decoder did not
    /// return are cleared, matching a fresh decode.
    pub fn apply_decoded(&mut self, vin: &str, decoded: DecodedVin) {
        self.vin = vin.to_string();
        self.make = decoded.make.unwrap_or_default();
        self.model = decoded.model.unwrap_or_default();
        self.year = decoded.year;
        self.trim = decoded.trim.unwrap_or_default();
        self.body_style = decoded
            .body_style
            .unwrap_or_default()
            .chars()
            .take(BODY_STYLE_MAX)
            .collect();
    }

    pub fn validate(&self) -> Result<()> {
        let priced = self.selling_price.is_finite() && self.selling_price > 0.0;
        if self.stock_number.trim().is_empty() || !priced {
            return Err(DeskError::missing(&["stock number", "selling price"]));
        }
        Ok(())
    }

    pub fn to_new_vehicle(&self) -> NewVehicle {
        NewVehicle {
            vin: self.vin.clone(),
            stock_number: self.stock_number.clone(),
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            trim: self.trim.clone(),
            body_style: self.body_style.clone(),
            color: self.color.clone(),
            mileage: self.mileage,
            cost_price: self.cost_price,
            selling_price: self.selling_price,
            status: self.status,
        }
    }
}

/// Decode a VIN into a fresh draft.
pub async fn decode_into_draft(client: &DealerClient, vin: &str) -> Result<VehicleDraft> {
    let vin = vin.trim();
    if vin.is_empty() {
        return Err(DeskError::missing(&["VIN"]));
    }

    let decoded = client.decode_vin(vin).await?;
    let mut draft = VehicleDraft::default();
    draft.apply_decoded(vin, decoded);
    Ok(draft)
}

/// Validate and save a draft.
pub async fn stock_in(client: &DealerClient, draft: &VehicleDraft) -> Result<Vehicle> {
    draft.validate()?;
    Ok(client.create_vehicle(&draft.to_new_vehicle()).await?)
}

pub async fn edit_vehicle(client: &DealerClient, id: i64, patch: &VehiclePatch) -> Result<Vehicle> {
    if patch.is_empty() {
        return Err(DeskError::Invalid("nothing to update".into()));
    }
    Ok(client.update_vehicle(id, patch).await?)
}

/// Deleting stock is a manager action.
pub async fn delete_vehicle(client: &DealerClient, is_manager: bool, id: i64) -> Result<()> {
    if !is_manager {
        return Err(DeskError::AccessDenied);
    }
    client.delete_vehicle(id).await?;
    tracing::info!(id, "Vehicle deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: i64, make: &str, status: VehicleStatus) -> Vehicle {
        Vehicle {
            id,
            vin: format!("VIN{id:05}"),
            stock_number: format!("STK-{id}"),
            make: make.into(),
            model: "Model".into(),
            year: Some(2020),
            trim: String::new(),
            body_style: String::new(),
            color: String::new(),
            mileage: 0,
            license_plate: None,
            cost_price: 1000.0,
            selling_price: 1500.0,
            sold_date: None,
            status,
            photo: None,
        }
    }

    #[test]
    fn filter_combines_status_and_search() {
        let stock = vec![
            vehicle(1, "Honda", VehicleStatus::Available),
            vehicle(2, "Ford", VehicleStatus::Available),
            vehicle(3, "Honda", VehicleStatus::Sold),
        ];
        let filter = InventoryFilter {
            status: StatusFilter::only(VehicleStatus::Available),
            search: "HONDA".into(),
        };
        let ids: Vec<_> = filter.apply(&stock).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1]);

        let by_stock = InventoryFilter {
            search: "stk-3".into(),
            ..Default::default()
        };
        assert_eq!(by_stock.apply(&stock).len(), 1);
    }

    #[test]
    fn stock_count_includes_reserved() {
        let stock = vec![
            vehicle(1, "A", VehicleStatus::Available),
            vehicle(2, "B", VehicleStatus::Reserved),
            vehicle(3, "C", VehicleStatus::Sold),
            vehicle(4, "D", VehicleStatus::Service),
        ];
        assert_eq!(stock_count(&stock), 2);
    }

    #[test]
    fn photo_urls() {
        let base = "http://localhost:8000/";
        assert_eq!(photo_url(None, base), None);
        assert_eq!(photo_url(Some(""), base), None);
        assert_eq!(
            photo_url(Some("/media/vehicles/a.jpg"), base).as_deref(),
            Some("http://localhost:8000/media/vehicles/a.jpg")
        );
        assert_eq!(
            photo_url(Some("https://cdn.example.com/a.jpg"), base).as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn decoded_body_style_is_truncated() {
        let mut draft = VehicleDraft::default();
        draft.apply_decoded(
            "1HGCM82633A004352",
            DecodedVin {
                make: Some("HONDA".into()),
                model: Some("Accord".into()),
                year: Some(2003),
                trim: None,
                body_style: Some("x".repeat(80)),
            },
        );
        assert_eq!(draft.body_style.len(), 50);
        assert_eq!(draft.make, "HONDA");
        assert_eq!(draft.trim, "");
        assert_eq!(draft.color, "Black");
    }

    #[test]
    fn draft_requires_stock_number_and_price() {
        let mut draft = VehicleDraft::default();
        assert!(matches!(draft.validate(), Err(DeskError::MissingFields(_))));
        draft.stock_number = "A-1".into();
        assert!(draft.validate().is_err());
        draft.selling_price = 9999.0;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_rejects_nan_and_negative_price() {
        let mut draft = VehicleDraft {
            stock_number: "A-1".into(),
            ..VehicleDraft::default()
        };
        for price in [f64::NAN, -500.0, f64::INFINITY] {
            draft.selling_price = price;
            assert!(
                matches!(draft.validate(), Err(DeskError::MissingFields(_))),
                "price {price} should be rejected"
            );
        }
    }
}
