use serde_json::json;

use crate::error::Result;
use crate::types::{DecodedVin, NewVehicle, Vehicle, VehiclePatch, VehicleStatus};
use crate::DealerClient;

const VEHICLES: &str = "api/inventory/vehicles/";

impl DealerClient {
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.get_json(VEHICLES).await
    }

    pub async fn get_vehicle(&self, id: i64) -> Result<Vehicle> {
        self.get_json(&format!("{VEHICLES}{id}/")).await
    }

    pub async fn create_vehicle(&self, vehicle: &NewVehicle) -> Result<Vehicle> {
        let created: Vehicle = self.post_json(VEHICLES, vehicle).await?;
        tracing::info!(id = created.id, stock_number = %created.stock_number, "Vehicle stocked in");
        Ok(created)
    }

    pub async fn update_vehicle(&self, id: i64, patch: &VehiclePatch) -> Result<Vehicle> {
        self.patch_json(&format!("{VEHICLES}{id}/"), patch).await
    }

    pub async fn set_vehicle_status(&self, id: i64, status: VehicleStatus) -> Result<()> {
        self.patch_discard(&format!("{VEHICLES}{id}/"), &json!({ "status": status }))
            .await
    }

    pub async fn delete_vehicle(&self, id: i64) -> Result<()> {
        self.delete(&format!("{VEHICLES}{id}/")).await
    }

    /// Look a VIN up through the backend's decoder.
    pub async fn decode_vin(&self, vin: &str) -> Result<DecodedVin> {
        self.post_json("api/inventory/decode-vin/", &json!({ "vin": vin }))
            .await
    }
}
