pub mod activity;
pub mod calendar;
pub mod config;
pub mod customers;
pub mod dashboard;
pub mod desking;
pub mod error;
pub mod filter;
pub mod financials;
pub mod inventory;
pub mod leads;
pub mod navigation;
pub mod print;
pub mod service_lane;
pub mod session;
pub mod team;

pub use config::Config;
pub use error::{DeskError, Result};
pub use navigation::{NavShell, Route, RouteAccess, Screen, Section};
pub use session::{AuthBackend, RoleState, SessionError, SessionGate, SessionState};
