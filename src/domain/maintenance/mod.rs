//! Maintenance aggregate

pub mod model;

pub use model::{MaintenanceLog, MaintenanceType, NewMaintenanceLog};
