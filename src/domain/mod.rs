pub mod driver;
pub mod error;
pub mod events;
pub mod fuel;
pub mod maintenance;
pub mod trip;
pub mod vehicle;

// Re-export commonly used types
pub use driver::{Driver, DriverPatch, DriverStatus, LicenseStanding, NewDriver};
pub use error::{TripError, TripResult};
pub use events::{EventMessage, LedgerEvent};
pub use fuel::{FuelLog, NewFuelLog};
pub use maintenance::{MaintenanceLog, MaintenanceType, NewMaintenanceLog};
pub use trip::{NewTrip, Trip, TripStatus};
pub use vehicle::{NewVehicle, Vehicle, VehiclePatch, VehicleStatus, VehicleType};
