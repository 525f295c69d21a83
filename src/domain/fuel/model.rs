//! Fuel log domain entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A refuelling stop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelLog {
    /// Unique log ID (e.g. `f1`)
    pub id: String,
    pub vehicle_id: String,
    /// Trip the fuel was bought for, if any
    pub trip_id: Option<String>,
    pub liters: f64,
    pub cost_per_liter: f64,
    /// `liters * cost_per_liter`, fixed when the log is recorded
    pub total_cost: f64,
    pub date: NaiveDate,
    /// Odometer at the pump (km)
    pub odometer_km: f64,
    pub station: String,
}

impl FuelLog {
    pub fn record(id: impl Into<String>, input: NewFuelLog) -> Self {
        Self {
            id: id.into(),
            total_cost: input.liters * input.cost_per_liter,
            vehicle_id: input.vehicle_id,
            trip_id: input.trip_id,
            liters: input.liters,
            cost_per_liter: input.cost_per_liter,
            date: input.date,
            odometer_km: input.odometer_km,
            station: input.station,
        }
    }
}

/// Input for recording a fuel purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFuelLog {
    pub vehicle_id: String,
    pub trip_id: Option<String>,
    pub liters: f64,
    pub cost_per_liter: f64,
    pub date: NaiveDate,
    pub odometer_km: f64,
    pub station: String,
}
