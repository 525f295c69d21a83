//! Fleet ledger: the single source of truth for vehicles, drivers, trips,
//! maintenance and fuel logs.
//!
//! Every mutation runs under one write gate, so multi-record transitions
//! (e.g. dispatching a trip flips the trip, its vehicle and its driver) are
//! applied as a unit, and publishes one [`LedgerEvent`] before releasing it,
//! so subscribers see events in the order the changes were applied.
//! Transitions requested from the wrong state are ignored: they return
//! `false`, log at debug level and publish nothing. Only trip planning
//! reports why it failed.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::application::events::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
use crate::config::LedgerConfig;
use crate::domain::{
    Driver, DriverPatch, DriverStatus, FuelLog, LedgerEvent, MaintenanceLog, NewDriver,
    NewFuelLog, NewMaintenanceLog, NewTrip, NewVehicle, Trip, TripError, TripResult, TripStatus,
    Vehicle, VehiclePatch, VehicleStatus,
};
use crate::infrastructure::{EntityKind, InMemoryStorage, Storage};

/// Default look-ahead for "license expiring soon"
pub const DEFAULT_LICENSE_WARNING_DAYS: i64 = 60;

/// Point-in-time copy of all five collections, each ordered by ID
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub trips: Vec<Trip>,
    pub maintenance_logs: Vec<MaintenanceLog>,
    pub fuel_logs: Vec<FuelLog>,
}

pub struct FleetLedger {
    storage: Arc<dyn Storage>,
    event_bus: SharedEventBus,
    gate: RwLock<()>,
    license_warning_days: i64,
}

impl FleetLedger {
    pub fn new(storage: Arc<dyn Storage>, event_bus: SharedEventBus) -> Self {
        Self {
            storage,
            event_bus,
            gate: RwLock::new(()),
            license_warning_days: DEFAULT_LICENSE_WARNING_DAYS,
        }
    }

    /// Empty ledger backed by in-memory storage
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStorage::new()), Arc::new(EventBus::new()))
    }

    /// In-memory ledger pre-filled with the demo fleet
    pub fn with_demo_data() -> Self {
        Self::new(
            Arc::new(InMemoryStorage::with_demo_data()),
            Arc::new(EventBus::new()),
        )
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        let storage = if config.seed_demo_data {
            InMemoryStorage::with_demo_data()
        } else {
            InMemoryStorage::new()
        };
        Self::new(Arc::new(storage), create_event_bus(config.event_capacity))
            .with_license_warning_days(config.license_warning_days)
    }

    pub fn with_license_warning_days(mut self, days: i64) -> Self {
        self.license_warning_days = days;
        self
    }

    pub fn license_warning_days(&self) -> i64 {
        self.license_warning_days
    }

    // ── Observers ──────────────────────────────────────────────

    /// Subscribe to change notifications. Drop the subscriber to unsubscribe.
    pub fn subscribe(&self) -> EventSubscriber {
        self.event_bus.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    pub fn event_bus(&self) -> SharedEventBus {
        self.event_bus.clone()
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn snapshot(&self) -> LedgerSnapshot {
        let _gate = self.gate.read();
        LedgerSnapshot {
            vehicles: self.storage.list_vehicles(),
            drivers: self.storage.list_drivers(),
            trips: self.storage.list_trips(),
            maintenance_logs: self.storage.list_maintenance_logs(),
            fuel_logs: self.storage.list_fuel_logs(),
        }
    }

    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.storage.list_vehicles()
    }

    pub fn drivers(&self) -> Vec<Driver> {
        self.storage.list_drivers()
    }

    pub fn trips(&self) -> Vec<Trip> {
        self.storage.list_trips()
    }

    pub fn maintenance_logs(&self) -> Vec<MaintenanceLog> {
        self.storage.list_maintenance_logs()
    }

    pub fn fuel_logs(&self) -> Vec<FuelLog> {
        self.storage.list_fuel_logs()
    }

    pub fn vehicle(&self, id: &str) -> Option<Vehicle> {
        self.storage.get_vehicle(id)
    }

    pub fn driver(&self, id: &str) -> Option<Driver> {
        self.storage.get_driver(id)
    }

    pub fn trip(&self, id: &str) -> Option<Trip> {
        self.storage.get_trip(id)
    }

    pub fn maintenance_log(&self, id: &str) -> Option<MaintenanceLog> {
        self.storage.get_maintenance_log(id)
    }

    /// Vehicles a new trip may be planned on
    pub fn available_vehicles(&self) -> Vec<Vehicle> {
        let mut vehicles = self.vehicles();
        vehicles.retain(Vehicle::is_available);
        vehicles
    }

    /// Drivers a new trip may be assigned to
    pub fn available_drivers(&self) -> Vec<Driver> {
        let mut drivers = self.drivers();
        drivers.retain(Driver::is_available);
        drivers
    }

    // ── Vehicles ───────────────────────────────────────────────

    pub fn add_vehicle(&self, input: NewVehicle) -> Vehicle {
        let _gate = self.gate.write();
        let vehicle = Vehicle::new(self.storage.next_id(EntityKind::Vehicle), input);
        self.storage.insert_vehicle(vehicle.clone());

        info!(vehicle_id = %vehicle.id, name = %vehicle.name, "Vehicle added");
        self.event_bus.publish(LedgerEvent::VehicleAdded {
            vehicle_id: vehicle.id.clone(),
        });
        vehicle
    }

    /// Apply a manual edit. Status may be set directly here. An empty patch
    /// changes nothing and publishes nothing.
    pub fn update_vehicle(&self, id: &str, patch: VehiclePatch) -> bool {
        if patch.is_empty() {
            debug!(vehicle_id = id, "Vehicle update ignored: empty patch");
            return false;
        }

        let _gate = self.gate.write();
        let mut patch = Some(patch);
        let applied = self.storage.modify_vehicle(id, &mut |v| {
            if let Some(p) = patch.take() {
                p.apply(v);
            }
        });
        if !applied {
            debug!(vehicle_id = id, "Vehicle update ignored: unknown vehicle");
            return false;
        }

        info!(vehicle_id = id, "Vehicle updated");
        self.event_bus.publish(LedgerEvent::VehicleUpdated {
            vehicle_id: id.to_string(),
        });
        true
    }

    pub fn retire_vehicle(&self, id: &str) -> bool {
        let _gate = self.gate.write();
        let mut retired = false;
        self.storage.modify_vehicle(id, &mut |v| {
            if !v.is_retired() {
                v.status = VehicleStatus::Retired;
                retired = true;
            }
        });
        if !retired {
            debug!(vehicle_id = id, "Retire ignored: unknown or retired");
            return false;
        }

        info!(vehicle_id = id, "Vehicle retired");
        self.event_bus.publish(LedgerEvent::VehicleRetired {
            vehicle_id: id.to_string(),
        });
        true
    }

    // ── Drivers ────────────────────────────────────────────────

    pub fn add_driver(&self, input: NewDriver) -> Driver {
        let _gate = self.gate.write();
        let driver = Driver::new(self.storage.next_id(EntityKind::Driver), input);
        self.storage.insert_driver(driver.clone());

        info!(driver_id = %driver.id, name = %driver.name, "Driver added");
        self.event_bus.publish(LedgerEvent::DriverAdded {
            driver_id: driver.id.clone(),
        });
        driver
    }

    /// An empty patch changes nothing and publishes nothing.
    pub fn update_driver(&self, id: &str, patch: DriverPatch) -> bool {
        if patch.is_empty() {
            debug!(driver_id = id, "Driver update ignored: empty patch");
            return false;
        }

        let _gate = self.gate.write();
        let mut patch = Some(patch);
        let applied = self.storage.modify_driver(id, &mut |d| {
            if let Some(p) = patch.take() {
                p.apply(d);
            }
        });
        if !applied {
            debug!(driver_id = id, "Driver update ignored: unknown driver");
            return false;
        }

        info!(driver_id = id, "Driver updated");
        self.event_bus.publish(LedgerEvent::DriverUpdated {
            driver_id: id.to_string(),
        });
        true
    }

    /// `false` for unknown drivers
    pub fn is_driver_license_valid(&self, driver_id: &str) -> bool {
        self.storage
            .get_driver(driver_id)
            .is_some_and(|d| d.is_license_valid(today()))
    }

    // ── Trips ──────────────────────────────────────────────────

    /// Plan a trip in `Draft`. Nothing else changes until it is dispatched.
    pub fn create_trip(&self, input: NewTrip) -> TripResult<Trip> {
        let _gate = self.gate.write();

        let vehicle = self
            .storage
            .get_vehicle(&input.vehicle_id)
            .ok_or_else(|| TripError::VehicleNotFound(input.vehicle_id.clone()))?;
        let driver = self
            .storage
            .get_driver(&input.driver_id)
            .ok_or_else(|| TripError::DriverNotFound(input.driver_id.clone()))?;

        let cargo = Some(input.cargo_weight_kg);
        if let Err(e) = check_assignment(&vehicle, &driver, cargo, today()) {
            debug!(
                vehicle_id = %vehicle.id,
                driver_id = %driver.id,
                reason = %e,
                "Trip rejected"
            );
            return Err(e);
        }

        let trip = Trip::draft(self.storage.next_id(EntityKind::Trip), input);
        self.storage.insert_trip(trip.clone());

        info!(
            trip_id = %trip.id,
            vehicle_id = %trip.vehicle_id,
            driver_id = %trip.driver_id,
            cargo_kg = trip.cargo_weight_kg,
            "Trip created"
        );
        self.event_bus.publish(LedgerEvent::TripCreated {
            trip_id: trip.id.clone(),
            vehicle_id: trip.vehicle_id.clone(),
            driver_id: trip.driver_id.clone(),
        });
        Ok(trip)
    }

    /// `Draft -> Dispatched`. The vehicle and driver go `On Trip` and the
    /// driver's trip counter increments.
    ///
    /// The vehicle and driver must still be assignable (they may have been
    /// taken by another trip since this one was planned); cargo weight is
    /// not checked again.
    pub fn dispatch_trip(&self, trip_id: &str) -> bool {
        let _gate = self.gate.write();

        let Some(trip) = self.storage.get_trip(trip_id) else {
            debug!(trip_id, "Dispatch ignored: unknown trip");
            return false;
        };
        if trip.status != TripStatus::Draft {
            debug!(trip_id, status = %trip.status, "Dispatch ignored: trip is not a draft");
            return false;
        }

        let vehicle = self.storage.get_vehicle(&trip.vehicle_id);
        let driver = self.storage.get_driver(&trip.driver_id);
        let (Some(vehicle), Some(driver)) = (vehicle, driver) else {
            debug!(trip_id, "Dispatch ignored: vehicle or driver is gone");
            return false;
        };
        if let Err(e) = check_assignment(&vehicle, &driver, None, today()) {
            debug!(trip_id, reason = %e, "Dispatch ignored");
            return false;
        }

        self.storage.modify_trip(trip_id, &mut |t| {
            t.dispatch();
        });
        self.storage.modify_vehicle(&trip.vehicle_id, &mut |v| {
            v.status = VehicleStatus::OnTrip;
        });
        self.storage.modify_driver(&trip.driver_id, &mut |d| {
            d.status = DriverStatus::OnTrip;
            d.total_trips += 1;
        });

        info!(
            trip_id,
            vehicle_id = %trip.vehicle_id,
            driver_id = %trip.driver_id,
            "Trip dispatched"
        );
        self.event_bus.publish(LedgerEvent::TripDispatched {
            trip_id: trip.id,
            vehicle_id: trip.vehicle_id,
            driver_id: trip.driver_id,
        });
        true
    }

    /// `Dispatched -> Completed`. Distance is measured against the vehicle
    /// odometer before it advances to `final_odometer_km`. The vehicle is
    /// released, the driver goes `Off Duty` and their completed counter
    /// increments.
    pub fn complete_trip(&self, trip_id: &str, final_odometer_km: f64) -> bool {
        let _gate = self.gate.write();

        let Some(trip) = self.storage.get_trip(trip_id) else {
            debug!(trip_id, "Complete ignored: unknown trip");
            return false;
        };
        if trip.status != TripStatus::Dispatched {
            debug!(trip_id, status = %trip.status, "Complete ignored: trip is not dispatched");
            return false;
        }

        let start_odometer = self
            .storage
            .get_vehicle(&trip.vehicle_id)
            .map(|v| v.odometer_km);
        let mut distance_km = None;
        self.storage.modify_trip(trip_id, &mut |t| {
            t.complete(final_odometer_km, start_odometer);
            distance_km = t.distance_km;
        });
        self.storage.modify_vehicle(&trip.vehicle_id, &mut |v| {
            v.status = VehicleStatus::Available;
            v.odometer_km = final_odometer_km;
        });
        self.storage.modify_driver(&trip.driver_id, &mut |d| {
            d.status = DriverStatus::OffDuty;
            d.completed_trips += 1;
        });

        info!(
            trip_id,
            vehicle_id = %trip.vehicle_id,
            driver_id = %trip.driver_id,
            ?distance_km,
            "Trip completed"
        );
        self.event_bus.publish(LedgerEvent::TripCompleted {
            trip_id: trip.id,
            vehicle_id: trip.vehicle_id,
            driver_id: trip.driver_id,
            distance_km,
        });
        true
    }

    /// Cancel an active trip. Cancelling a dispatched trip releases its
    /// vehicle and driver; a draft never held them.
    pub fn cancel_trip(&self, trip_id: &str) -> bool {
        let _gate = self.gate.write();

        let mut previous = None;
        let mut assignment = None;
        self.storage.modify_trip(trip_id, &mut |t| {
            previous = t.cancel();
            assignment = Some((t.vehicle_id.clone(), t.driver_id.clone()));
        });
        let (Some(previous_status), Some((vehicle_id, driver_id))) = (previous, assignment) else {
            debug!(trip_id, "Cancel ignored: unknown or finished trip");
            return false;
        };

        if previous_status == TripStatus::Dispatched {
            self.storage.modify_vehicle(&vehicle_id, &mut |v| {
                v.status = VehicleStatus::Available;
            });
            self.storage.modify_driver(&driver_id, &mut |d| {
                d.status = DriverStatus::OffDuty;
            });
        }

        info!(trip_id, from = %previous_status, "Trip cancelled");
        self.event_bus.publish(LedgerEvent::TripCancelled {
            trip_id: trip_id.to_string(),
            vehicle_id,
            driver_id,
            previous_status,
        });
        true
    }

    // ── Maintenance ────────────────────────────────────────────

    /// File an unresolved log. The vehicle goes `In Shop` whatever its
    /// current status.
    pub fn add_maintenance_log(&self, input: NewMaintenanceLog) -> MaintenanceLog {
        let _gate = self.gate.write();
        let log = MaintenanceLog::open(self.storage.next_id(EntityKind::Maintenance), input);
        self.storage.insert_maintenance_log(log.clone());
        let in_shop = self.storage.modify_vehicle(&log.vehicle_id, &mut |v| {
            v.status = VehicleStatus::InShop;
        });

        info!(
            log_id = %log.id,
            vehicle_id = %log.vehicle_id,
            kind = %log.maintenance_type,
            in_shop,
            "Maintenance logged"
        );
        self.event_bus.publish(LedgerEvent::MaintenanceLogged {
            log_id: log.id.clone(),
            vehicle_id: log.vehicle_id.clone(),
        });
        log
    }

    /// Resolve an open log. When it was the vehicle's last open log the
    /// vehicle returns to `Available`.
    pub fn resolve_maintenance_log(&self, log_id: &str) -> bool {
        let _gate = self.gate.write();

        let mut resolved = false;
        let mut vehicle_id = String::new();
        self.storage.modify_maintenance_log(log_id, &mut |m| {
            resolved = m.resolve();
            vehicle_id = m.vehicle_id.clone();
        });
        if !resolved {
            debug!(log_id, "Resolve ignored: unknown or already resolved log");
            return false;
        }

        let still_open = self
            .storage
            .list_maintenance_logs_for_vehicle(&vehicle_id)
            .iter()
            .any(MaintenanceLog::is_open);
        if !still_open {
            self.storage.modify_vehicle(&vehicle_id, &mut |v| {
                v.status = VehicleStatus::Available;
            });
        }

        info!(log_id, vehicle_id = %vehicle_id, released = !still_open, "Maintenance resolved");
        self.event_bus.publish(LedgerEvent::MaintenanceResolved {
            log_id: log_id.to_string(),
            vehicle_id,
            vehicle_released: !still_open,
        });
        true
    }

    // ── Fuel ───────────────────────────────────────────────────

    pub fn add_fuel_log(&self, input: NewFuelLog) -> FuelLog {
        let _gate = self.gate.write();
        let log = FuelLog::record(self.storage.next_id(EntityKind::Fuel), input);
        self.storage.insert_fuel_log(log.clone());

        info!(
            log_id = %log.id,
            vehicle_id = %log.vehicle_id,
            liters = log.liters,
            total_cost = log.total_cost,
            "Fuel logged"
        );
        self.event_bus.publish(LedgerEvent::FuelLogged {
            log_id: log.id.clone(),
            vehicle_id: log.vehicle_id.clone(),
        });
        log
    }
}

impl Default for FleetLedger {
    fn default() -> Self {
        Self::in_memory()
    }
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Assignment rules shared by planning and dispatch, in reporting order.
/// `cargo_weight_kg` is only checked when given.
fn check_assignment(
    vehicle: &Vehicle,
    driver: &Driver,
    cargo_weight_kg: Option<f64>,
    today: NaiveDate,
) -> Result<(), TripError> {
    if !vehicle.is_available() {
        return Err(TripError::VehicleUnavailable(vehicle.id.clone()));
    }
    if !driver.is_available() {
        return Err(TripError::DriverUnavailable(driver.id.clone()));
    }
    if let Some(weight) = cargo_weight_kg {
        if !vehicle.can_carry(weight) {
            return Err(TripError::OverCapacity {
                cargo_weight_kg: weight,
                max_capacity_kg: vehicle.max_capacity_kg,
            });
        }
    }
    if !driver.is_license_valid(today) {
        return Err(TripError::LicenseExpired(driver.id.clone()));
    }
    if !driver.is_licensed_for(vehicle.vehicle_type) {
        return Err(TripError::NotLicensedFor(vehicle.vehicle_type));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────
