//! Demo fleet used for development and dashboards

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::traits::Storage;

use crate::domain::{
    Driver, DriverStatus, FuelLog, MaintenanceLog, MaintenanceType, Trip, TripStatus, Vehicle,
    VehicleStatus, VehicleType,
};

use crate::domain::DriverStatus::{OffDuty, OnTrip as DriverOnTrip, Suspended};
use crate::domain::MaintenanceType::{
    BrakeService, EngineRepair, GeneralInspection, OilChange, TireReplacement,
};
use crate::domain::VehicleStatus::{Available, InShop, OnTrip, Retired};
use crate::domain::VehicleType::{Bike, Truck, Van};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn vehicle(
    id: &str,
    name: &str,
    model: &str,
    plate: &str,
    vehicle_type: VehicleType,
    max_capacity_kg: f64,
    odometer_km: f64,
    status: VehicleStatus,
    region: &str,
    acquisition_cost: f64,
    year: i32,
) -> Vehicle {
    Vehicle {
        id: id.into(),
        name: name.into(),
        model: model.into(),
        license_plate: plate.into(),
        vehicle_type,
        max_capacity_kg,
        odometer_km,
        status,
        region: region.into(),
        acquisition_cost,
        year,
    }
}

#[allow(clippy::too_many_arguments)]
fn driver(
    id: &str,
    name: &str,
    license_number: &str,
    license_expiry: NaiveDate,
    categories: &[VehicleType],
    status: DriverStatus,
    safety_score: u8,
    (total_trips, completed_trips): (u32, u32),
    hire_date: NaiveDate,
) -> Driver {
    let first = name
        .split_whitespace()
        .next()
        .unwrap_or(name)
        .to_lowercase();
    Driver {
        id: id.into(),
        name: name.into(),
        email: format!("{first}@fleet.io"),
        phone: format!("+1-555-01{:0>2}", id.trim_start_matches('d')),
        license_number: license_number.into(),
        license_expiry,
        license_categories: categories.iter().copied().collect::<BTreeSet<_>>(),
        status,
        safety_score,
        total_trips,
        completed_trips,
        hire_date,
    }
}

struct TripRow<'a> {
    id: &'a str,
    vehicle_id: &'a str,
    driver_id: &'a str,
    route: (&'a str, &'a str),
    cargo: (f64, &'a str),
    status: TripStatus,
    created_at: DateTime<Utc>,
    dispatched_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    /// (final odometer, distance)
    odometer: Option<(f64, f64)>,
    revenue: f64,
    notes: &'a str,
}

impl From<TripRow<'_>> for Trip {
    fn from(row: TripRow<'_>) -> Self {
        Trip {
            id: row.id.into(),
            vehicle_id: row.vehicle_id.into(),
            driver_id: row.driver_id.into(),
            origin: row.route.0.into(),
            destination: row.route.1.into(),
            cargo_weight_kg: row.cargo.0,
            cargo_description: row.cargo.1.into(),
            status: row.status,
            created_at: row.created_at,
            dispatched_at: row.dispatched_at,
            completed_at: row.completed_at,
            final_odometer_km: row.odometer.map(|(end, _)| end),
            distance_km: row.odometer.map(|(_, km)| km),
            revenue: row.revenue,
            notes: row.notes.into(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn maintenance(
    id: &str,
    vehicle_id: &str,
    maintenance_type: MaintenanceType,
    description: &str,
    cost: f64,
    date: NaiveDate,
    mechanic: &str,
    resolved: bool,
) -> MaintenanceLog {
    MaintenanceLog {
        id: id.into(),
        vehicle_id: vehicle_id.into(),
        maintenance_type,
        description: description.into(),
        cost,
        date,
        mechanic: mechanic.into(),
        resolved,
    }
}

/// Fuel rows carry their recorded total rather than recomputing it.
#[allow(clippy::too_many_arguments)]
fn fuel(
    id: &str,
    vehicle_id: &str,
    trip_id: Option<&str>,
    liters: f64,
    cost_per_liter: f64,
    total_cost: f64,
    date: NaiveDate,
    odometer_km: f64,
    station: &str,
) -> FuelLog {
    FuelLog {
        id: id.into(),
        vehicle_id: vehicle_id.into(),
        trip_id: trip_id.map(String::from),
        liters,
        cost_per_liter,
        total_cost,
        date,
        odometer_km,
        station: station.into(),
    }
}

/// Insert the demo fleet: 9 vehicles, 6 drivers, 6 trips, 5 maintenance
/// logs and 7 fuel logs.
#[rustfmt::skip]
pub(crate) fn load_demo_fleet(storage: &dyn Storage) {
    let vehicles = [
        vehicle("v1", "Truck-01", "Volvo FH", "TRK-001", Truck, 20000.0, 145200.0, Available, "North", 120000.0, 2021),
        vehicle("v2", "Truck-02", "Mercedes Actros", "TRK-002", Truck, 18000.0, 98400.0, OnTrip, "South", 115000.0, 2022),
        vehicle("v3", "Van-01", "Ford Transit", "VAN-001", Van, 1500.0, 67300.0, Available, "East", 45000.0, 2022),
        vehicle("v4", "Van-02", "Mercedes Sprinter", "VAN-002", Van, 1200.0, 34100.0, InShop, "West", 48000.0, 2023),
        vehicle("v5", "Van-03", "VW Crafter", "VAN-003", Van, 1400.0, 52700.0, OnTrip, "North", 46000.0, 2022),
        vehicle("v6", "Van-04", "Renault Master", "VAN-004", Van, 1100.0, 22800.0, Available, "South", 42000.0, 2023),
        vehicle("v7", "Bike-01", "Honda CB500", "BIK-001", Bike, 30.0, 18900.0, Available, "East", 8000.0, 2023),
        vehicle("v8", "Bike-02", "Yamaha MT-07", "BIK-002", Bike, 25.0, 9400.0, Available, "West", 9500.0, 2024),
        vehicle("v9", "Truck-03", "Scania R450", "TRK-003", Truck, 22000.0, 210500.0, Retired, "North", 130000.0, 2018),
    ];

    let drivers = [
        driver("d1", "Alex Johnson", "DL-A001", day(2027, 6, 15), &[Truck, Van], DriverOnTrip, 92, (148, 145), day(2020, 3, 1)),
        driver("d2", "Maria Garcia", "DL-A002", day(2025, 12, 31), &[Van, Bike], OffDuty, 88, (203, 198), day(2019, 7, 15)),
        driver("d3", "James Brown", "DL-A003", day(2026, 9, 20), &[Truck], DriverOnTrip, 76, (312, 298), day(2018, 1, 10)),
        driver("d4", "Sarah Lee", "DL-A004", day(2026, 4, 1), &[Van, Bike], OffDuty, 95, (87, 86), day(2022, 5, 20)),
        driver("d5", "Carlos Ruiz", "DL-A005", day(2024, 11, 30), &[Bike], Suspended, 52, (64, 55), day(2021, 8, 14)),
        driver("d6", "Emily Chen", "DL-A006", day(2028, 2, 28), &[Truck, Van, Bike], OffDuty, 99, (421, 420), day(2017, 11, 3)),
    ];

    let trips = [
        TripRow {
            id: "t1",
            vehicle_id: "v2",
            driver_id: "d3",
            route: ("Chicago Warehouse", "Detroit Hub"),
            cargo: (15000.0, "Auto parts"),
            status: TripStatus::Dispatched,
            created_at: at(2026, 2, 20, 8, 0),
            dispatched_at: Some(at(2026, 2, 20, 9, 0)),
            completed_at: None,
            odometer: None,
            revenue: 2400.0,
            notes: "",
        },
        TripRow {
            id: "t2",
            vehicle_id: "v5",
            driver_id: "d1",
            route: ("LA Port", "Phoenix DC"),
            cargo: (1100.0, "Electronics"),
            status: TripStatus::Dispatched,
            created_at: at(2026, 2, 20, 10, 0),
            dispatched_at: Some(at(2026, 2, 20, 11, 0)),
            completed_at: None,
            odometer: None,
            revenue: 850.0,
            notes: "",
        },
        TripRow {
            id: "t3",
            vehicle_id: "v1",
            driver_id: "d6",
            route: ("NYC Distribution", "Boston Depot"),
            cargo: (18000.0, "Retail goods"),
            status: TripStatus::Completed,
            created_at: at(2026, 2, 18, 6, 0),
            dispatched_at: Some(at(2026, 2, 18, 7, 0)),
            completed_at: Some(at(2026, 2, 18, 18, 0)),
            odometer: Some((145580.0, 380.0)),
            revenue: 3200.0,
            notes: "On time delivery",
        },
        TripRow {
            id: "t4",
            vehicle_id: "v3",
            driver_id: "d4",
            route: ("Miami Port", "Orlando Center"),
            cargo: (900.0, "Food products"),
            status: TripStatus::Completed,
            created_at: at(2026, 2, 17, 7, 0),
            dispatched_at: Some(at(2026, 2, 17, 8, 0)),
            completed_at: Some(at(2026, 2, 17, 14, 0)),
            odometer: Some((67545.0, 245.0)),
            revenue: 680.0,
            notes: "",
        },
        TripRow {
            id: "t5",
            vehicle_id: "v7",
            driver_id: "d2",
            route: ("Downtown Store", "Suburb Client"),
            cargo: (20.0, "Documents"),
            status: TripStatus::Completed,
            created_at: at(2026, 2, 19, 9, 0),
            dispatched_at: Some(at(2026, 2, 19, 9, 30)),
            completed_at: Some(at(2026, 2, 19, 11, 0)),
            odometer: Some((18960.0, 60.0)),
            revenue: 120.0,
            notes: "",
        },
        TripRow {
            id: "t6",
            vehicle_id: "v4",
            driver_id: "d5",
            route: ("Dallas Hub", "Houston Depot"),
            cargo: (800.0, "Machinery parts"),
            status: TripStatus::Cancelled,
            created_at: at(2026, 2, 16, 10, 0),
            dispatched_at: None,
            completed_at: None,
            odometer: None,
            revenue: 0.0,
            notes: "Driver suspended",
        },
    ];

    let maintenance_logs = [
        maintenance("m1", "v4", EngineRepair, "Engine overhaul after warning light", 3200.0, day(2026, 2, 19), "Tony's Auto Shop", false),
        maintenance("m2", "v9", GeneralInspection, "Pre-retirement final inspection", 450.0, day(2026, 1, 15), "Fleet Garage", true),
        maintenance("m3", "v1", OilChange, "Routine 20k km oil change", 180.0, day(2026, 2, 10), "Fleet Garage", true),
        maintenance("m4", "v3", TireReplacement, "Replaced 2 front tires", 620.0, day(2026, 2, 5), "Tire Pro", true),
        maintenance("m5", "v2", BrakeService, "Brake pad replacement", 380.0, day(2026, 1, 28), "Fleet Garage", true),
    ];

    let fuel_logs = [
        fuel("f1", "v1", Some("t3"), 120.0, 1.45, 174.0, day(2026, 2, 18), 145300.0, "Shell Highway 9"),
        fuel("f2", "v2", None, 200.0, 1.42, 284.0, day(2026, 2, 20), 98200.0, "BP Station 4"),
        fuel("f3", "v3", Some("t4"), 45.0, 1.50, 67.5, day(2026, 2, 17), 67400.0, "Exxon I-95"),
        fuel("f4", "v5", None, 55.0, 1.48, 81.4, day(2026, 2, 20), 52500.0, "Chevron 101"),
        fuel("f5", "v7", Some("t5"), 3.0, 1.60, 4.8, day(2026, 2, 19), 18920.0, "Local Pump"),
        fuel("f6", "v1", None, 130.0, 1.44, 187.2, day(2026, 1, 30), 144900.0, "Shell Highway 9"),
        fuel("f7", "v6", None, 40.0, 1.50, 60.0, day(2026, 2, 15), 22600.0, "Total Station"),
    ];

    for v in vehicles {
        storage.insert_vehicle(v);
    }
    for d in drivers {
        storage.insert_driver(d);
    }
    for t in trips {
        storage.insert_trip(t.into());
    }
    for m in maintenance_logs {
        storage.insert_maintenance_log(m);
    }
    for f in fuel_logs {
        storage.insert_fuel_log(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    #[test]
    fn seeded_records_match_reference_rows() {
        let storage = InMemoryStorage::new();
        load_demo_fleet(&storage);

        let v1 = storage.get_vehicle("v1").unwrap();
        assert_eq!(v1.odometer_km, 145200.0);
        assert_eq!(v1.max_capacity_kg, 20000.0);

        let d6 = storage.get_driver("d6").unwrap();
        assert_eq!(d6.email, "emily@fleet.io");
        assert_eq!(d6.phone, "+1-555-0106");
        assert_eq!(d6.license_categories.len(), 3);

        let t3 = storage.get_trip("t3").unwrap();
        assert_eq!(t3.distance_km, Some(380.0));
        assert_eq!(t3.status, TripStatus::Completed);

        let open: Vec<_> = storage
            .list_maintenance_logs()
            .into_iter()
            .filter(|m| m.is_open())
            .map(|m| m.id)
            .collect();
        assert_eq!(open, vec!["m1"]);
    }
}
