//! # Fleet Ledger
//!
//! In-memory ledger for a delivery fleet: vehicles, drivers, trips,
//! maintenance and fuel logs, with the trip lifecycle rules that keep them
//! consistent and the cost metrics derived from them.
//!
//! ## Architecture
//!
//! - **domain**: Entities, status enums, events and errors
//! - **application**: The [`FleetLedger`] state machine, event bus, analytics and list filters
//! - **infrastructure**: Storage trait, in-memory storage and the demo fleet
//! - **config** / **telemetry**: TOML settings and tracing setup
//!
//! ```no_run
//! use fleet_ledger::FleetLedger;
//!
//! let ledger = FleetLedger::with_demo_data();
//! let mut events = ledger.subscribe();
//! ledger.retire_vehicle("v8");
//! assert!(events.try_recv().is_some());
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::{
    EventBus, EventSubscriber, FleetLedger, FleetSummary, LedgerSnapshot, MaintenanceFilter,
    SharedEventBus, VehicleFilter, VehiclePerformance,
};
pub use config::{default_config_path, AppConfig, ConfigError};
pub use domain::{LedgerEvent, TripError, TripResult};
pub use telemetry::init_tracing;
