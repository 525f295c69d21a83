//! In-memory storage implementation

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::traits::{EntityKind, Storage};
use crate::domain::{Driver, FuelLog, MaintenanceLog, Trip, Vehicle};

/// In-memory storage; state lives for the lifetime of the process
pub struct InMemoryStorage {
    vehicles: DashMap<String, Vehicle>,
    drivers: DashMap<String, Driver>,
    trips: DashMap<String, Trip>,
    maintenance_logs: DashMap<String, MaintenanceLog>,
    fuel_logs: DashMap<String, FuelLog>,
    counters: [AtomicU64; 5],
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
            drivers: DashMap::new(),
            trips: DashMap::new(),
            maintenance_logs: DashMap::new(),
            fuel_logs: DashMap::new(),
            counters: std::array::from_fn(|_| AtomicU64::new(1)),
        }
    }

    /// Storage pre-filled with the demo fleet
    pub fn with_demo_data() -> Self {
        let storage = Self::new();
        super::seed::load_demo_fleet(&storage);
        storage
    }

    /// Keep the generator for `kind` ahead of an externally chosen ID.
    fn observe_id(&self, kind: EntityKind, id: &str) {
        let n = id
            .strip_prefix(kind.prefix())
            .and_then(|rest| rest.parse::<u64>().ok());
        if let Some(n) = n {
            self.counters[kind.slot()].fetch_max(n + 1, Ordering::SeqCst);
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorter IDs first, so `v2` sorts before `v10`.
fn id_order(a: &str, b: &str) -> CmpOrdering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn sorted<T: Clone>(map: &DashMap<String, T>, id: impl Fn(&T) -> &str) -> Vec<T> {
    let mut items: Vec<T> = map.iter().map(|e| e.value().clone()).collect();
    items.sort_by(|a, b| id_order(id(a), id(b)));
    items
}

fn modify<T>(map: &DashMap<String, T>, id: &str, f: &mut dyn FnMut(&mut T)) -> bool {
    match map.get_mut(id) {
        Some(mut entry) => {
            f(entry.value_mut());
            true
        }
        None => false,
    }
}

impl Storage for InMemoryStorage {
    fn next_id(&self, kind: EntityKind) -> String {
        let n = self.counters[kind.slot()].fetch_add(1, Ordering::SeqCst);
        format!("{}{}", kind.prefix(), n)
    }

    fn insert_vehicle(&self, vehicle: Vehicle) {
        self.observe_id(EntityKind::Vehicle, &vehicle.id);
        self.vehicles.insert(vehicle.id.clone(), vehicle);
    }

    fn get_vehicle(&self, id: &str) -> Option<Vehicle> {
        self.vehicles.get(id).map(|v| v.clone())
    }

    fn list_vehicles(&self) -> Vec<Vehicle> {
        sorted(&self.vehicles, |v| v.id.as_str())
    }

    fn modify_vehicle(&self, id: &str, f: &mut dyn FnMut(&mut Vehicle)) -> bool {
        modify(&self.vehicles, id, f)
    }

    fn insert_driver(&self, driver: Driver) {
        self.observe_id(EntityKind::Driver, &driver.id);
        self.drivers.insert(driver.id.clone(), driver);
    }

    fn get_driver(&self, id: &str) -> Option<Driver> {
        self.drivers.get(id).map(|d| d.clone())
    }

    fn list_drivers(&self) -> Vec<Driver> {
        sorted(&self.drivers, |d| d.id.as_str())
    }

    fn modify_driver(&self, id: &str, f: &mut dyn FnMut(&mut Driver)) -> bool {
        modify(&self.drivers, id, f)
    }

    fn insert_trip(&self, trip: Trip) {
        self.observe_id(EntityKind::Trip, &trip.id);
        self.trips.insert(trip.id.clone(), trip);
    }

    fn get_trip(&self, id: &str) -> Option<Trip> {
        self.trips.get(id).map(|t| t.clone())
    }

    fn list_trips(&self) -> Vec<Trip> {
        sorted(&self.trips, |t| t.id.as_str())
    }

    fn modify_trip(&self, id: &str, f: &mut dyn FnMut(&mut Trip)) -> bool {
        modify(&self.trips, id, f)
    }

    fn insert_maintenance_log(&self, log: MaintenanceLog) {
        self.observe_id(EntityKind::Maintenance, &log.id);
        self.maintenance_logs.insert(log.id.clone(), log);
    }

    fn get_maintenance_log(&self, id: &str) -> Option<MaintenanceLog> {
        self.maintenance_logs.get(id).map(|m| m.clone())
    }

    fn list_maintenance_logs(&self) -> Vec<MaintenanceLog> {
        sorted(&self.maintenance_logs, |m| m.id.as_str())
    }

    fn list_maintenance_logs_for_vehicle(&self, vehicle_id: &str) -> Vec<MaintenanceLog> {
        let mut logs: Vec<MaintenanceLog> = self
            .maintenance_logs
            .iter()
            .filter(|m| m.vehicle_id == vehicle_id)
            .map(|m| m.clone())
            .collect();
        logs.sort_by(|a, b| id_order(&a.id, &b.id));
        logs
    }

    fn modify_maintenance_log(&self, id: &str, f: &mut dyn FnMut(&mut MaintenanceLog)) -> bool {
        modify(&self.maintenance_logs, id, f)
    }

    fn insert_fuel_log(&self, log: FuelLog) {
        self.observe_id(EntityKind::Fuel, &log.id);
        self.fuel_logs.insert(log.id.clone(), log);
    }

    fn list_fuel_logs(&self) -> Vec<FuelLog> {
        sorted(&self.fuel_logs, |f| f.id.as_str())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewVehicle, VehicleStatus, VehicleType};

    fn vehicle(id: &str) -> Vehicle {
        Vehicle::new(
            id,
            NewVehicle {
                name: format!("Van {id}"),
                model: "Ford Transit".into(),
                license_plate: format!("VAN-{id}"),
                vehicle_type: VehicleType::Van,
                max_capacity_kg: 1500.0,
                odometer_km: 0.0,
                region: "East".into(),
                acquisition_cost: 45000.0,
                year: 2022,
            },
        )
    }

    #[test]
    fn ids_are_sequential_per_kind() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.next_id(EntityKind::Vehicle), "v1");
        assert_eq!(storage.next_id(EntityKind::Vehicle), "v2");
        assert_eq!(storage.next_id(EntityKind::Trip), "t1");
    }

    #[test]
    fn generated_ids_skip_inserted_ones() {
        let storage = InMemoryStorage::new();
        storage.insert_vehicle(vehicle("v9"));
        assert_eq!(storage.next_id(EntityKind::Vehicle), "v10");

        // Non-numeric IDs don't disturb the counter
        storage.insert_vehicle(vehicle("fleet-spare"));
        assert_eq!(storage.next_id(EntityKind::Vehicle), "v11");
    }

    #[test]
    fn listing_is_in_natural_id_order() {
        let storage = InMemoryStorage::new();
        for id in ["v10", "v2", "v1"] {
            storage.insert_vehicle(vehicle(id));
        }
        let ids: Vec<String> = storage.list_vehicles().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["v1", "v2", "v10"]);
    }

    #[test]
    fn modify_reports_missing_records() {
        let storage = InMemoryStorage::new();
        storage.insert_vehicle(vehicle("v1"));

        let mut retire = |v: &mut Vehicle| v.status = VehicleStatus::Retired;
        assert!(storage.modify_vehicle("v1", &mut retire));
        assert_eq!(
            storage.get_vehicle("v1").map(|v| v.status),
            Some(VehicleStatus::Retired)
        );
        assert!(!storage.modify_vehicle("v404", &mut retire));
    }

    #[test]
    fn demo_data_is_loaded() {
        let storage = InMemoryStorage::with_demo_data();
        assert_eq!(storage.list_vehicles().len(), 9);
        assert_eq!(storage.list_drivers().len(), 6);
        assert_eq!(storage.list_trips().len(), 6);
        assert_eq!(storage.list_maintenance_logs().len(), 5);
        assert_eq!(storage.list_fuel_logs().len(), 7);
        assert_eq!(storage.next_id(EntityKind::Vehicle), "v10");
        assert_eq!(storage.next_id(EntityKind::Fuel), "f8");
    }
}
