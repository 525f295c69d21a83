//! Storage trait definitions

use crate::domain::{Driver, FuelLog, MaintenanceLog, Trip, Vehicle};

/// Entity families that receive generated IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Vehicle,
    Driver,
    Trip,
    Maintenance,
    Fuel,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        Self::Vehicle,
        Self::Driver,
        Self::Trip,
        Self::Maintenance,
        Self::Fuel,
    ];

    /// ID prefix, e.g. `v` in `v12`
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Vehicle => "v",
            Self::Driver => "d",
            Self::Trip => "t",
            Self::Maintenance => "m",
            Self::Fuel => "f",
        }
    }

    pub(crate) fn slot(&self) -> usize {
        match self {
            Self::Vehicle => 0,
            Self::Driver => 1,
            Self::Trip => 2,
            Self::Maintenance => 3,
            Self::Fuel => 4,
        }
    }
}

/// Collection storage behind the ledger.
///
/// Implementations hold plain records; every business rule lives in
/// [`FleetLedger`](crate::application::FleetLedger). `modify_*` closures
/// must not call back into the storage. Listings are ordered by ID.
pub trait Storage: Send + Sync {
    /// Generate a fresh ID that no stored record of `kind` uses
    fn next_id(&self, kind: EntityKind) -> String;

    // Vehicle operations
    fn insert_vehicle(&self, vehicle: Vehicle);
    fn get_vehicle(&self, id: &str) -> Option<Vehicle>;
    fn list_vehicles(&self) -> Vec<Vehicle>;
    fn modify_vehicle(&self, id: &str, f: &mut dyn FnMut(&mut Vehicle)) -> bool;

    // Driver operations
    fn insert_driver(&self, driver: Driver);
    fn get_driver(&self, id: &str) -> Option<Driver>;
    fn list_drivers(&self) -> Vec<Driver>;
    fn modify_driver(&self, id: &str, f: &mut dyn FnMut(&mut Driver)) -> bool;

    // Trip operations
    fn insert_trip(&self, trip: Trip);
    fn get_trip(&self, id: &str) -> Option<Trip>;
    fn list_trips(&self) -> Vec<Trip>;
    fn modify_trip(&self, id: &str, f: &mut dyn FnMut(&mut Trip)) -> bool;

    // Maintenance operations
    fn insert_maintenance_log(&self, log: MaintenanceLog);
    fn get_maintenance_log(&self, id: &str) -> Option<MaintenanceLog>;
    fn list_maintenance_logs(&self) -> Vec<MaintenanceLog>;
    fn list_maintenance_logs_for_vehicle(&self, vehicle_id: &str) -> Vec<MaintenanceLog>;
    fn modify_maintenance_log(&self, id: &str, f: &mut dyn FnMut(&mut MaintenanceLog)) -> bool;

    // Fuel operations
    fn insert_fuel_log(&self, log: FuelLog);
    fn list_fuel_logs(&self) -> Vec<FuelLog>;
}
