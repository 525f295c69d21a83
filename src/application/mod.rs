pub mod analytics;
pub mod events;
pub mod ledger;
pub mod queries;

// Re-export key types for convenience
pub use analytics::{DriverInsight, FleetSummary, VehiclePerformance};
pub use events::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use ledger::{FleetLedger, LedgerSnapshot, DEFAULT_LICENSE_WARNING_DAYS};
pub use queries::{MaintenanceFilter, VehicleFilter};
