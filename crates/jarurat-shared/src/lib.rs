//! Shared types and utilities for Jarurat Care components.
//!
//! The daemon and the control CLI both speak in these types: submissions,
//! triage labels, automation records, and the dashboard summary.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod intake;
pub mod store;
pub mod triage;

pub use api::{ErrorBody, HealthResponse, ItemResponse, ItemsResponse, MessageResponse};
pub use dashboard::{DashboardSummary, Totals, UrgencyCounts};
pub use error::CareError;
pub use intake::{FieldError, SupportRecord, SupportRequest, Volunteer, VolunteerRecord};
pub use store::JsonStore;
pub use triage::{AutomationRecord, Department, TriageResult, Urgency, NO_PROVIDER};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "jarurat-care-api";

/// File name of the support request collection inside the data dir
pub const SUPPORT_FILE: &str = "support_requests.json";

/// File name of the volunteer collection inside the data dir
pub const VOLUNTEER_FILE: &str = "volunteers.json";
