//! List filters behind the vehicle, fuel and maintenance pages

use serde::{Deserialize, Serialize};

use super::ledger::{FleetLedger, LedgerSnapshot};
use crate::domain::{FuelLog, MaintenanceLog, Vehicle, VehicleStatus, VehicleType};

/// Vehicle list filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleFilter {
    /// Case-insensitive text matched against name, license plate and model
    pub search: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub status: Option<VehicleStatus>,
}

impl VehicleFilter {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if self.vehicle_type.is_some_and(|t| t != vehicle.vehicle_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != vehicle.status) {
            return false;
        }
        let Some(needle) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        let needle = needle.to_lowercase();
        [&vehicle.name, &vehicle.license_plate, &vehicle.model]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Maintenance list tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceFilter {
    #[default]
    All,
    /// Unresolved logs only
    Active,
    Resolved,
}

impl MaintenanceFilter {
    pub fn matches(self, log: &MaintenanceLog) -> bool {
        match self {
            Self::All => true,
            Self::Active => log.is_open(),
            Self::Resolved => log.resolved,
        }
    }
}

impl LedgerSnapshot {
    pub fn search_vehicles(&self, filter: &VehicleFilter) -> Vec<Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect()
    }

    pub fn fuel_logs_for_vehicle(&self, vehicle_id: &str) -> Vec<FuelLog> {
        self.fuel_logs
            .iter()
            .filter(|f| f.vehicle_id == vehicle_id)
            .cloned()
            .collect()
    }

    pub fn filter_maintenance_logs(&self, filter: MaintenanceFilter) -> Vec<MaintenanceLog> {
        self.maintenance_logs
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect()
    }
}

impl FleetLedger {
    pub fn search_vehicles(&self, filter: &VehicleFilter) -> Vec<Vehicle> {
        self.snapshot().search_vehicles(filter)
    }

    pub fn fuel_logs_for_vehicle(&self, vehicle_id: &str) -> Vec<FuelLog> {
        self.snapshot().fuel_logs_for_vehicle(vehicle_id)
    }

    pub fn filter_maintenance_logs(&self, filter: MaintenanceFilter) -> Vec<MaintenanceLog> {
        self.snapshot().filter_maintenance_logs(filter)
    }
}
