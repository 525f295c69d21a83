//! Vehicle domain entity

use serde::{Deserialize, Serialize};

/// Vehicle class, also used as a driver license category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Truck,
    Van,
    Bike,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [Self::Truck, Self::Van, Self::Bike];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Truck => "Truck",
            Self::Van => "Van",
            Self::Bike => "Bike",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleStatus {
    /// Ready to take a trip
    Available,
    /// Assigned to a dispatched trip
    #[serde(rename = "On Trip")]
    OnTrip,
    /// Has at least one open maintenance log
    #[serde(rename = "In Shop")]
    InShop,
    /// Permanently out of service
    Retired,
}

impl Default for VehicleStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        Self::Available,
        Self::OnTrip,
        Self::InShop,
        Self::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OnTrip => "On Trip",
            Self::InShop => "In Shop",
            Self::Retired => "Retired",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique vehicle ID (e.g. `v1`)
    pub id: String,
    /// Display name
    pub name: String,
    pub model: String,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    /// Maximum cargo load in kg
    pub max_capacity_kg: f64,
    /// Odometer reading in km
    pub odometer_km: f64,
    pub status: VehicleStatus,
    pub region: String,
    /// Purchase price, used as the ROI denominator
    pub acquisition_cost: f64,
    pub year: i32,
}

impl Vehicle {
    /// Build a vehicle from creation input. New vehicles start `Available`.
    pub fn new(id: impl Into<String>, input: NewVehicle) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            model: input.model,
            license_plate: input.license_plate,
            vehicle_type: input.vehicle_type,
            max_capacity_kg: input.max_capacity_kg,
            odometer_km: input.odometer_km,
            status: VehicleStatus::Available,
            region: input.region,
            acquisition_cost: input.acquisition_cost,
            year: input.year,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }

    pub fn is_retired(&self) -> bool {
        self.status == VehicleStatus::Retired
    }

    pub fn can_carry(&self, cargo_weight_kg: f64) -> bool {
        cargo_weight_kg <= self.max_capacity_kg
    }
}

/// Input for registering a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub name: String,
    pub model: String,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    pub max_capacity_kg: f64,
    pub odometer_km: f64,
    pub region: String,
    pub acquisition_cost: f64,
    pub year: i32,
}

/// Partial update for a vehicle. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehiclePatch {
    pub name: Option<String>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub max_capacity_kg: Option<f64>,
    pub odometer_km: Option<f64>,
    pub status: Option<VehicleStatus>,
    pub region: Option<String>,
    pub acquisition_cost: Option<f64>,
    pub year: Option<i32>,
}

impl VehiclePatch {
    pub fn apply(self, vehicle: &mut Vehicle) {
        if let Some(name) = self.name {
            vehicle.name = name;
        }
        if let Some(model) = self.model {
            vehicle.model = model;
        }
        if let Some(plate) = self.license_plate {
            vehicle.license_plate = plate;
        }
        if let Some(vehicle_type) = self.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(capacity) = self.max_capacity_kg {
            vehicle.max_capacity_kg = capacity;
        }
        if let Some(odometer) = self.odometer_km {
            vehicle.odometer_km = odometer;
        }
        if let Some(status) = self.status {
            vehicle.status = status;
        }
        if let Some(region) = self.region {
            vehicle.region = region;
        }
        if let Some(cost) = self.acquisition_cost {
            vehicle.acquisition_cost = cost;
        }
        if let Some(year) = self.year {
            vehicle.year = year;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> NewVehicle {
        NewVehicle {
            name: "Van-05".into(),
            model: "Iveco Daily".into(),
            license_plate: "VAN-005".into(),
            vehicle_type: VehicleType::Van,
            max_capacity_kg: 1300.0,
            odometer_km: 1200.0,
            region: "East".into(),
            acquisition_cost: 44000.0,
            year: 2024,
        }
    }

    #[test]
    fn new_vehicle_is_available() {
        let v = Vehicle::new("v10", sample_input());
        assert_eq!(v.id, "v10");
        assert_eq!(v.status, VehicleStatus::Available);
        assert!(v.is_available());
        assert!(!v.is_retired());
    }

    #[test]
    fn capacity_boundary_is_inclusive() {
        let v = Vehicle::new("v10", sample_input());
        assert!(v.can_carry(1300.0));
        assert!(!v.can_carry(1300.5));
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut v = Vehicle::new("v10", sample_input());
        VehiclePatch {
            region: Some("West".into()),
            odometer_km: Some(1500.0),
            ..Default::default()
        }
        .apply(&mut v);

        assert_eq!(v.region, "West");
        assert_eq!(v.odometer_km, 1500.0);
        assert_eq!(v.name, "Van-05");
        assert_eq!(v.status, VehicleStatus::Available);
    }

    #[test]
    fn empty_patch() {
        assert!(VehiclePatch::default().is_empty());
        let patch = VehiclePatch {
            year: Some(2020),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn status_uses_display_names_on_the_wire() {
        let json = serde_json::to_string(&VehicleStatus::OnTrip).unwrap();
        assert_eq!(json, "\"On Trip\"");
        let parsed: VehicleStatus = serde_json::from_str("\"In Shop\"").unwrap();
        assert_eq!(parsed, VehicleStatus::InShop);
        assert_eq!(VehicleStatus::InShop.to_string(), "In Shop");
    }
}
