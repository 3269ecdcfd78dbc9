use dealer_client::{DealerError, VehicleStatus};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeskError>;

/// Failures of the feature workflows. Validation problems are caught before
/// any request goes out; backend failures are wrapped as-is.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Api(#[from] DealerError),

    #[error("Please select a vehicle first.")]
    NoVehicleSelected,

    #[error("Please enter customer details.")]
    MissingCustomerDetails,

    #[error("This vehicle is currently {0}. Cannot negotiate.")]
    VehicleUnavailable(VehicleStatus),

    #[error("Please fill in: {0}")]
    MissingFields(String),

    #[error("Access denied: manager role required")]
    AccessDenied,

    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl DeskError {
    pub(crate) fn missing(fields: &[&str]) -> Self {
        DeskError::MissingFields(fields.join(", "))
    }
}
