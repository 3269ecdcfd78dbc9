use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::error::Result;
use crate::types::{
    Appointment, AppointmentStatus, BillingUpdate, NewAppointment, NewServiceCustomer,
    NewServiceRecord, NewServiceVehicle, PlateScan, ServiceCustomer, ServiceRecord,
    ServiceStatus, ServiceVehicle,
};
use crate::DealerClient;

const CUSTOMERS: &str = "api/service/customers/";
const VEHICLES: &str = "api/service/vehicles/";
const RECORDS: &str = "api/service/records/";
const APPOINTMENTS: &str = "api/service/appointments/";

impl DealerClient {
    // --- Service customers & vehicles ---

    pub async fn create_service_customer(
        &self,
        customer: &NewServiceCustomer,
    ) -> Result<ServiceCustomer> {
        self.post_json(CUSTOMERS, customer).await
    }

    pub async fn list_service_vehicles(&self) -> Result<Vec<ServiceVehicle>> {
        self.get_json(VEHICLES).await
    }

    pub async fn create_service_vehicle(
        &self,
        vehicle: &NewServiceVehicle,
    ) -> Result<ServiceVehicle> {
        self.post_json(VEHICLES, vehicle).await
    }

    /// Upload a photo of a plate for recognition.
    pub async fn scan_plate(&self, image: Vec<u8>, file_name: &str) -> Result<PlateScan> {
        let part = Part::bytes(image).file_name(file_name.to_string());
        let form = Form::new().part("image", part);
        let scan: PlateScan = self.post_form("api/service/scan-plate/", form).await?;
        tracing::info!(plate = %scan.plate, known = scan.existing_vehicle.is_some(), "Plate scanned");
        Ok(scan)
    }

    // --- Service records ---

    pub async fn list_service_records(&self) -> Result<Vec<ServiceRecord>> {
        self.get_json(RECORDS).await
    }

    pub async fn create_service_record(&self, record: &NewServiceRecord) -> Result<ServiceRecord> {
        self.post_json(RECORDS, record).await
    }

    pub async fn set_service_status(&self, id: i64, status: ServiceStatus) -> Result<()> {
        self.patch_discard(&format!("{RECORDS}{id}/"), &json!({ "status": status }))
            .await
    }

    /// Save parts/labor costs; returns the updated record for the invoice.
    pub async fn bill_service_record(
        &self,
        id: i64,
        billing: &BillingUpdate,
    ) -> Result<ServiceRecord> {
        self.patch_json(&format!("{RECORDS}{id}/"), billing).await
    }

    // --- Appointments ---

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.get_json(APPOINTMENTS).await
    }

    pub async fn create_appointment(&self, appointment: &NewAppointment) -> Result<Appointment> {
        self.post_json(APPOINTMENTS, appointment).await
    }

    pub async fn set_appointment_status(&self, id: i64, status: AppointmentStatus) -> Result<()> {
        self.patch_discard(&format!("{APPOINTMENTS}{id}/"), &json!({ "status": status }))
            .await
    }

    pub async fn delete_appointment(&self, id: i64) -> Result<()> {
        self.delete(&format!("{APPOINTMENTS}{id}/")).await
    }
}
