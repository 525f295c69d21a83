//! Derived fleet metrics.
//!
//! Everything here is a pure function of a [`LedgerSnapshot`]; nothing is
//! cached. Money is summed as recorded, percentages are plain `f64` except
//! where dashboards show whole numbers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ledger::{today, FleetLedger, LedgerSnapshot};
use crate::domain::{DriverStatus, LicenseStanding, TripStatus, VehicleStatus, VehicleType};

/// Per-vehicle figures shown on the analytics page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePerformance {
    pub vehicle_id: String,
    pub name: String,
    pub revenue: f64,
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
    /// Percent of acquisition cost
    pub roi: f64,
    /// km per liter
    pub fuel_efficiency: f64,
    pub cost_per_km: f64,
    pub total_distance_km: f64,
    pub total_liters: f64,
    pub completed_trips: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub vehicles_by_status: BTreeMap<String, usize>,
    /// Vehicles currently on a trip
    pub active_fleet: usize,
    pub operational_vehicles: usize,
    /// Rounded percent of non-retired vehicles on a trip
    pub utilization_rate: u32,
    /// Trips still in draft
    pub pending_cargo: usize,
    pub trips_by_status: BTreeMap<String, usize>,
    pub drivers_by_status: BTreeMap<String, usize>,
    pub expired_licenses: usize,
    /// Non-retired vehicles per type
    pub composition: BTreeMap<String, usize>,
    pub total_fuel_cost: f64,
    pub total_liters: f64,
    pub total_maintenance_cost: f64,
    pub total_revenue: f64,
    pub open_maintenance: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverInsight {
    pub driver_id: String,
    pub name: String,
    pub status: DriverStatus,
    pub safety_score: u8,
    pub completion_rate: u32,
    pub license_standing: LicenseStanding,
}

impl LedgerSnapshot {
    pub fn total_fuel_cost(&self, vehicle_id: &str) -> f64 {
        self.fuel_logs
            .iter()
            .filter(|f| f.vehicle_id == vehicle_id)
            .map(|f| f.total_cost)
            .sum()
    }

    pub fn total_liters(&self, vehicle_id: &str) -> f64 {
        self.fuel_logs
            .iter()
            .filter(|f| f.vehicle_id == vehicle_id)
            .map(|f| f.liters)
            .sum()
    }

    /// Resolved and open logs alike
    pub fn total_maintenance_cost(&self, vehicle_id: &str) -> f64 {
        self.maintenance_logs
            .iter()
            .filter(|m| m.vehicle_id == vehicle_id)
            .map(|m| m.cost)
            .sum()
    }

    /// Revenue of completed trips only
    pub fn total_revenue(&self, vehicle_id: &str) -> f64 {
        self.trips
            .iter()
            .filter(|t| t.vehicle_id == vehicle_id && t.is_completed())
            .map(|t| t.revenue)
            .sum()
    }

    /// Completed trips with a known, non-zero distance
    pub fn total_distance_km(&self, vehicle_id: &str) -> f64 {
        self.trips
            .iter()
            .filter(|t| t.vehicle_id == vehicle_id)
            .filter_map(|t| t.counted_distance_km())
            .sum()
    }

    /// `(revenue - (fuel + maintenance)) / acquisition * 100`; 0 for unknown
    /// vehicles or a zero acquisition cost.
    pub fn roi(&self, vehicle_id: &str) -> f64 {
        let Some(vehicle) = self.vehicles.iter().find(|v| v.id == vehicle_id) else {
            return 0.0;
        };
        if vehicle.acquisition_cost == 0.0 {
            return 0.0;
        }
        let costs = self.total_fuel_cost(vehicle_id) + self.total_maintenance_cost(vehicle_id);
        (self.total_revenue(vehicle_id) - costs) / vehicle.acquisition_cost * 100.0
    }

    /// km per liter; 0 without fuel logs
    pub fn fuel_efficiency(&self, vehicle_id: &str) -> f64 {
        let liters = self.total_liters(vehicle_id);
        if liters == 0.0 {
            return 0.0;
        }
        self.total_distance_km(vehicle_id) / liters
    }

    /// Operating cost per km; 0 without counted distance
    pub fn cost_per_km(&self, vehicle_id: &str) -> f64 {
        let km = self.total_distance_km(vehicle_id);
        if km == 0.0 {
            return 0.0;
        }
        (self.total_fuel_cost(vehicle_id) + self.total_maintenance_cost(vehicle_id)) / km
    }

    pub fn vehicle_performance(&self, vehicle_id: &str) -> Option<VehiclePerformance> {
        let vehicle = self.vehicles.iter().find(|v| v.id == vehicle_id)?;
        Some(VehiclePerformance {
            vehicle_id: vehicle.id.clone(),
            name: vehicle.name.clone(),
            revenue: self.total_revenue(vehicle_id),
            fuel_cost: self.total_fuel_cost(vehicle_id),
            maintenance_cost: self.total_maintenance_cost(vehicle_id),
            roi: self.roi(vehicle_id),
            fuel_efficiency: self.fuel_efficiency(vehicle_id),
            cost_per_km: self.cost_per_km(vehicle_id),
            total_distance_km: self.total_distance_km(vehicle_id),
            total_liters: self.total_liters(vehicle_id),
            completed_trips: self
                .trips
                .iter()
                .filter(|t| t.vehicle_id == vehicle_id && t.is_completed())
                .count(),
        })
    }

    pub fn fleet_performance(&self) -> Vec<VehiclePerformance> {
        self.vehicles
            .iter()
            .filter_map(|v| self.vehicle_performance(&v.id))
            .collect()
    }

    pub fn fleet_summary(&self, today: NaiveDate) -> FleetSummary {
        let vehicles_by_status = VehicleStatus::ALL
            .iter()
            .map(|s| {
                let n = self.vehicles.iter().filter(|v| v.status == *s).count();
                (s.as_str().to_string(), n)
            })
            .collect();
        let trips_by_status = TripStatus::ALL
            .iter()
            .map(|s| {
                let n = self.trips.iter().filter(|t| t.status == *s).count();
                (s.as_str().to_string(), n)
            })
            .collect();
        let drivers_by_status = DriverStatus::ALL
            .iter()
            .map(|s| {
                let n = self.drivers.iter().filter(|d| d.status == *s).count();
                (s.as_str().to_string(), n)
            })
            .collect();
        let composition = VehicleType::ALL
            .iter()
            .map(|ty| {
                let n = self
                    .vehicles
                    .iter()
                    .filter(|v| v.vehicle_type == *ty && !v.is_retired())
                    .count();
                (ty.as_str().to_string(), n)
            })
            .collect();

        let active_fleet = self
            .vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::OnTrip)
            .count();
        let operational_vehicles = self.vehicles.iter().filter(|v| !v.is_retired()).count();
        let utilization_rate = if operational_vehicles == 0 {
            0
        } else {
            (active_fleet as f64 / operational_vehicles as f64 * 100.0).round() as u32
        };

        FleetSummary {
            vehicles_by_status,
            active_fleet,
            operational_vehicles,
            utilization_rate,
            pending_cargo: self
                .trips
                .iter()
                .filter(|t| t.status == TripStatus::Draft)
                .count(),
            trips_by_status,
            drivers_by_status,
            expired_licenses: self
                .drivers
                .iter()
                .filter(|d| !d.is_license_valid(today))
                .count(),
            composition,
            total_fuel_cost: self.fuel_logs.iter().map(|f| f.total_cost).sum(),
            total_liters: self.fuel_logs.iter().map(|f| f.liters).sum(),
            total_maintenance_cost: self.maintenance_logs.iter().map(|m| m.cost).sum(),
            total_revenue: self
                .trips
                .iter()
                .filter(|t| t.is_completed())
                .map(|t| t.revenue)
                .sum(),
            open_maintenance: self.maintenance_logs.iter().filter(|m| m.is_open()).count(),
        }
    }

    pub fn driver_insights(&self, today: NaiveDate, warning_days: i64) -> Vec<DriverInsight> {
        self.drivers
            .iter()
            .map(|d| DriverInsight {
                driver_id: d.id.clone(),
                name: d.name.clone(),
                status: d.status,
                safety_score: d.safety_score,
                completion_rate: d.completion_rate(),
                license_standing: d.license_standing(today, warning_days),
            })
            .collect()
    }

    /// Cargo weight as a rounded percent of the assigned vehicle's capacity
    pub fn trip_load_percent(&self, trip_id: &str) -> Option<u32> {
        let trip = self.trips.iter().find(|t| t.id == trip_id)?;
        let vehicle = self.vehicles.iter().find(|v| v.id == trip.vehicle_id)?;
        if vehicle.max_capacity_kg <= 0.0 {
            return None;
        }
        let percent = trip.cargo_weight_kg / vehicle.max_capacity_kg * 100.0;
        Some(percent.round() as u32)
    }
}

/// Convenience wrappers over a fresh snapshot
impl FleetLedger {
    pub fn total_fuel_cost(&self, vehicle_id: &str) -> f64 {
        self.snapshot().total_fuel_cost(vehicle_id)
    }

    pub fn total_maintenance_cost(&self, vehicle_id: &str) -> f64 {
        self.snapshot().total_maintenance_cost(vehicle_id)
    }

    pub fn total_revenue(&self, vehicle_id: &str) -> f64 {
        self.snapshot().total_revenue(vehicle_id)
    }

    pub fn vehicle_roi(&self, vehicle_id: &str) -> f64 {
        self.snapshot().roi(vehicle_id)
    }

    pub fn fuel_efficiency(&self, vehicle_id: &str) -> f64 {
        self.snapshot().fuel_efficiency(vehicle_id)
    }

    pub fn cost_per_km(&self, vehicle_id: &str) -> f64 {
        self.snapshot().cost_per_km(vehicle_id)
    }

    pub fn vehicle_performance(&self, vehicle_id: &str) -> Option<VehiclePerformance> {
        self.snapshot().vehicle_performance(vehicle_id)
    }

    pub fn fleet_summary(&self) -> FleetSummary {
        self.snapshot().fleet_summary(today())
    }

    pub fn driver_insights(&self) -> Vec<DriverInsight> {
        self.snapshot()
            .driver_insights(today(), self.license_warning_days())
    }

    pub fn trip_load_percent(&self, trip_id: &str) -> Option<u32> {
        self.snapshot().trip_load_percent(trip_id)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewFuelLog, NewVehicle};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn demo() -> LedgerSnapshot {
        FleetLedger::with_demo_data().snapshot()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn per_vehicle_totals() {
        let s = demo();
        assert!(close(s.total_fuel_cost("v1"), 361.2));
        assert!(close(s.total_liters("v1"), 250.0));
        assert!(close(s.total_maintenance_cost("v1"), 180.0));
        assert!(close(s.total_revenue("v1"), 3200.0));
        assert!(close(s.total_distance_km("v1"), 380.0));

        // Dispatched trip revenue is not counted
        assert_eq!(s.total_revenue("v2"), 0.0);
        // Open maintenance cost is counted
        assert!(close(s.total_maintenance_cost("v4"), 3200.0));
    }

    #[test]
    fn roi_efficiency_and_cost_per_km() {
        let s = demo();
        assert!(close(s.roi("v1"), (3200.0 - 541.2) / 120000.0 * 100.0));
        assert!(close(s.fuel_efficiency("v1"), 380.0 / 250.0));
        assert!(close(s.cost_per_km("v1"), 541.2 / 380.0));

        // Costs above revenue give a negative ROI
        assert!(s.roi("v3") < 0.0);
        assert!(close(s.fuel_efficiency("v3"), 245.0 / 45.0));
    }

    #[test]
    fn zero_denominators_give_zero() {
        let s = demo();
        assert_eq!(s.roi("v404"), 0.0);
        // v8 has no fuel logs and no trips
        assert_eq!(s.fuel_efficiency("v8"), 0.0);
        assert_eq!(s.cost_per_km("v8"), 0.0);
        // v6 has fuel but no counted distance
        assert!(s.total_fuel_cost("v6") > 0.0);
        assert_eq!(s.fuel_efficiency("v6"), 0.0);
        assert_eq!(s.cost_per_km("v6"), 0.0);
    }

    #[test]
    fn zero_acquisition_cost_gives_zero_roi() {
        let ledger = FleetLedger::in_memory();
        let v = ledger.add_vehicle(NewVehicle {
            name: "Donated Van".into(),
            model: "Ford Transit".into(),
            license_plate: "GFT-001".into(),
            vehicle_type: VehicleType::Van,
            max_capacity_kg: 1000.0,
            odometer_km: 0.0,
            region: "East".into(),
            acquisition_cost: 0.0,
            year: 2020,
        });
        ledger.add_fuel_log(NewFuelLog {
            vehicle_id: v.id.clone(),
            trip_id: None,
            liters: 10.0,
            cost_per_liter: 2.0,
            date: day(2026, 1, 1),
            odometer_km: 10.0,
            station: "Local Pump".into(),
        });
        assert_eq!(ledger.vehicle_roi(&v.id), 0.0);
        assert_eq!(ledger.total_fuel_cost(&v.id), 20.0);
    }

    #[test]
    fn performance_bundle() {
        let s = demo();
        let p = s.vehicle_performance("v1").unwrap();
        assert_eq!(p.name, "Truck-01");
        assert_eq!(p.completed_trips, 1);
        assert!(close(p.total_distance_km, 380.0));
        assert!(close(p.roi, s.roi("v1")));
        assert!(s.vehicle_performance("v404").is_none());
        assert_eq!(s.fleet_performance().len(), 9);
    }

    #[test]
    fn fleet_summary_counts() {
        let summary = demo().fleet_summary(day(2026, 2, 21));

        assert_eq!(summary.vehicles_by_status["Available"], 5);
        assert_eq!(summary.vehicles_by_status["On Trip"], 2);
        assert_eq!(summary.vehicles_by_status["In Shop"], 1);
        assert_eq!(summary.vehicles_by_status["Retired"], 1);
        assert_eq!(summary.active_fleet, 2);
        assert_eq!(summary.operational_vehicles, 8);
        assert_eq!(summary.utilization_rate, 25);
        assert_eq!(summary.pending_cargo, 0);

        assert_eq!(summary.trips_by_status["Dispatched"], 2);
        assert_eq!(summary.trips_by_status["Completed"], 3);
        assert_eq!(summary.trips_by_status["Cancelled"], 1);
        assert_eq!(summary.drivers_by_status["On Trip"], 2);
        assert_eq!(summary.drivers_by_status["Off Duty"], 3);
        assert_eq!(summary.drivers_by_status["Suspended"], 1);

        // d5 (2024-11-30) and d2 (2025-12-31)
        assert_eq!(summary.expired_licenses, 2);

        assert_eq!(summary.composition["Truck"], 2);
        assert_eq!(summary.composition["Van"], 4);
        assert_eq!(summary.composition["Bike"], 2);

        assert!(close(summary.total_fuel_cost, 858.9));
        assert!(close(summary.total_liters, 593.0));
        assert!(close(summary.total_maintenance_cost, 4830.0));
        assert!(close(summary.total_revenue, 4000.0));
        assert_eq!(summary.open_maintenance, 1);
    }

    #[test]
    fn empty_fleet_summary() {
        let summary = LedgerSnapshot::default().fleet_summary(day(2026, 1, 1));
        assert_eq!(summary.utilization_rate, 0);
        assert_eq!(summary.operational_vehicles, 0);
        assert_eq!(summary.total_revenue, 0.0);
    }

    #[test]
    fn driver_insights_standing_and_rates() {
        let insights = demo().driver_insights(day(2026, 2, 21), 60);
        let by_id = |id: &str| insights.iter().find(|i| i.driver_id == id).unwrap().clone();

        assert_eq!(insights.len(), 6);
        assert_eq!(by_id("d1").completion_rate, 98); // 145 / 148
        assert_eq!(by_id("d1").license_standing, LicenseStanding::Valid);
        assert_eq!(by_id("d4").license_standing, LicenseStanding::ExpiringSoon);
        assert_eq!(by_id("d5").license_standing, LicenseStanding::Expired);
        assert_eq!(by_id("d5").completion_rate, 86); // 55 / 64
    }

    #[test]
    fn trip_load() {
        let s = demo();
        assert_eq!(s.trip_load_percent("t3"), Some(90));
        assert_eq!(s.trip_load_percent("t5"), Some(67));
        assert_eq!(s.trip_load_percent("t404"), None);
    }
}
