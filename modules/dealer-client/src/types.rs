use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Money ---

/// Decimal fields arrive as strings (`"18500.00"`) or bare numbers, and are
/// sent back as two-decimal strings.
pub mod money {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(crate) enum Raw {
        Num(f64),
        Str(String),
    }

    impl Raw {
        pub(crate) fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
            match self {
                Raw::Num(n) => Ok(n),
                Raw::Str(s) if s.trim().is_empty() => Ok(0.0),
                Raw::Str(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| E::custom(format!("invalid decimal: {s}"))),
            }
        }
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{value:.2}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            Some(raw) => raw.into_f64(),
            None => Ok(0.0),
        }
    }
}

/// Like [`money`], for nullable decimal fields.
pub mod money_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::money::Raw;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&format!("{v:.2}")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        match Option::<Raw>::deserialize(deserializer)? {
            Some(raw) => raw.into_f64().map(Some),
            None => Ok(None),
        }
    }
}

// --- Auth ---

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response of the "who am I" endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub is_manager: bool,
    #[serde(default)]
    pub is_sales: bool,
}

// --- Inventory ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Sold,
    Service,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "AVAILABLE",
            VehicleStatus::Reserved => "RESERVED",
            VehicleStatus::Sold => "SOLD",
            VehicleStatus::Service => "SERVICE",
        }
    }

    /// Counted as stock on hand.
    pub fn is_in_stock(&self) -> bool {
        matches!(self, VehicleStatus::Available | VehicleStatus::Reserved)
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub vin: String,
    pub stock_number: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub trim: String,
    #[serde(default)]
    pub body_style: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub mileage: i64,
    #[serde(default)]
    pub license_plate: Option<String>,
    #[serde(default, with = "money")]
    pub cost_price: f64,
    #[serde(default, with = "money")]
    pub selling_price: f64,
    #[serde(default)]
    pub sold_date: Option<DateTime<Utc>>,
    pub status: VehicleStatus,
    #[serde(default)]
    pub photo: Option<String>,
}

impl Vehicle {
    /// "2021 Honda Civic", skipping empty parts.
    pub fn title(&self) -> String {
        let year = self.year.map(|y| y.to_string()).unwrap_or_default();
        [year.as_str(), self.make.as_str(), self.model.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Body for stocking in a new vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVehicle {
    pub vin: String,
    pub stock_number: String,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub trim: String,
    pub body_style: String,
    pub color: String,
    pub mileage: i64,
    #[serde(with = "money")]
    pub cost_price: f64,
    #[serde(with = "money")]
    pub selling_price: f64,
    pub status: VehicleStatus,
}

/// Partial vehicle update. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehiclePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", with = "money_opt")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", with = "money_opt")]
    pub selling_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
}

impl VehiclePatch {
    pub fn status(status: VehicleStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fields recovered from a VIN by the backend decoder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DecodedVin {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub trim: Option<String>,
    #[serde(default)]
    pub body_style: Option<String>,
}

// --- Sales ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
    New,
    Contacted,
    TestDrive,
    Negotiation,
    Sold,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::TestDrive,
        LeadStatus::Negotiation,
        LeadStatus::Sold,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "NEW",
            LeadStatus::Contacted => "CONTACTED",
            LeadStatus::TestDrive => "TEST_DRIVE",
            LeadStatus::Negotiation => "NEGOTIATION",
            LeadStatus::Sold => "SOLD",
            LeadStatus::Lost => "LOST",
        }
    }

    /// Still being worked by sales.
    pub fn is_open(&self) -> bool {
        !matches!(self, LeadStatus::Sold | LeadStatus::Lost)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    #[default]
    #[serde(rename = "Walk-in")]
    WalkIn,
    Facebook,
    Google,
    Referral,
    Website,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::WalkIn => "Walk-in",
            LeadSource::Facebook => "Facebook",
            LeadSource::Google => "Google",
            LeadSource::Referral => "Referral",
            LeadSource::Website => "Website",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub source: LeadSource,
    #[serde(default)]
    pub vehicle: Option<i64>,
    #[serde(default)]
    pub vehicle_details: Option<Vehicle>,
    pub status: LeadStatus,
    #[serde(default, with = "money_opt")]
    pub quoted_price: Option<f64>,
    #[serde(default, with = "money_opt")]
    pub down_payment: Option<f64>,
    #[serde(default, with = "money_opt")]
    pub monthly_payment: Option<f64>,
    #[serde(default)]
    pub term_months: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLead {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub source: LeadSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<i64>,
    pub status: LeadStatus,
    #[serde(skip_serializing_if = "Option::is_none", with = "money_opt")]
    pub quoted_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", with = "money_opt")]
    pub down_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", with = "money_opt")]
    pub monthly_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term_months: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// --- Service ---

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceCustomer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewServiceCustomer {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceVehicle {
    pub id: i64,
    pub owner: i64,
    pub license_plate: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub history: Vec<ServiceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewServiceVehicle {
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub owner: i64,
}

/// Vehicle summary embedded in a service record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VehicleSummary {
    pub id: i64,
    pub license_plate: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Pending,
    InProgress,
    Completed,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Pending => "PENDING",
            ServiceStatus::InProgress => "IN_PROGRESS",
            ServiceStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceRecord {
    pub id: i64,
    pub vehicle: i64,
    #[serde(default)]
    pub vehicle_details: Option<VehicleSummary>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub description: String,
    pub date: DateTime<Utc>,
    pub status: ServiceStatus,
    #[serde(default, with = "money")]
    pub parts_cost: f64,
    #[serde(default, with = "money")]
    pub labor_cost: f64,
}

impl ServiceRecord {
    /// Parts plus labor.
    pub fn total_cost(&self) -> f64 {
        self.parts_cost + self.labor_cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewServiceRecord {
    pub vehicle: i64,
    pub description: String,
    pub status: ServiceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingUpdate {
    #[serde(with = "money")]
    pub parts_cost: f64,
    #[serde(with = "money")]
    pub labor_cost: f64,
    pub status: ServiceStatus,
}

/// Result of an automatic plate recognition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlateScan {
    pub plate: String,
    #[serde(default)]
    pub existing_vehicle: Option<ServiceVehicle>,
}

// --- Calendar ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub customer: i64,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub vehicle: Option<i64>,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub title: String,
    pub customer: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
}

// --- Customers ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryKind {
    Sale,
    Service,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub date: DateTime<Utc>,
    pub status: String,
    pub description: String,
    #[serde(default, with = "money")]
    pub amount: f64,
}

/// A customer merged across sales and service, keyed by phone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub phone: String,
    #[serde(default, with = "money")]
    pub lifetime_value: f64,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

// --- Team ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamRole {
    Manager,
    Sales,
    #[serde(rename = "Staff/Service")]
    Staff,
}

impl TeamRole {
    pub fn label(&self) -> &'static str {
        match self {
            TeamRole::Manager => "Manager",
            TeamRole::Sales => "Sales",
            TeamRole::Staff => "Staff/Service",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: TeamRole,
    pub date_joined: DateTime<Utc>,
}

/// Role requested when creating an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewMemberRole {
    Manager,
    #[default]
    Sales,
    Service,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTeamMember {
    pub username: String,
    pub password: String,
    pub role: NewMemberRole,
}

// --- Reports ---

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardStats {
    pub stats: StatsBlock,
    #[serde(default)]
    pub activity: Vec<StatsActivity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsBlock {
    #[serde(default, with = "money")]
    pub inventory_value: f64,
    #[serde(default)]
    pub active_leads: i64,
    #[serde(default)]
    pub monthly_sales: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub lead_sources: Vec<LeadSourceCount>,
    #[serde(default)]
    pub revenue_chart: Vec<RevenuePoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeadSourceCount {
    pub source: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevenuePoint {
    pub name: String,
    #[serde(with = "money")]
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinancialSummary {
    pub kpi: FinancialKpi,
    #[serde(default)]
    pub chart_data: Vec<MonthlyFinancials>,
    #[serde(default)]
    pub recent_sales: Vec<RecentSale>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinancialKpi {
    #[serde(default, with = "money")]
    pub inventory_value: f64,
    #[serde(default, with = "money")]
    pub total_revenue: f64,
    #[serde(default, with = "money")]
    pub sales_profit: f64,
    #[serde(default, with = "money")]
    pub service_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyFinancials {
    pub name: String,
    #[serde(rename = "Revenue", default, with = "money")]
    pub revenue: f64,
    #[serde(rename = "Cost", default, with = "money")]
    pub cost: f64,
    #[serde(rename = "Profit", default, with = "money")]
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecentSale {
    pub vehicle: String,
    #[serde(default, with = "money")]
    pub sold_for: f64,
    #[serde(default, with = "money")]
    pub cost: f64,
    #[serde(default, with = "money")]
    pub profit: f64,
    #[serde(default, with = "money")]
    pub margin: f64,
}
