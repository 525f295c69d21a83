//! Maintenance log domain entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Service category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceType {
    #[serde(rename = "Oil Change")]
    OilChange,
    #[serde(rename = "Tire Replacement")]
    TireReplacement,
    #[serde(rename = "Brake Service")]
    BrakeService,
    #[serde(rename = "Engine Repair")]
    EngineRepair,
    #[serde(rename = "General Inspection")]
    GeneralInspection,
    Other,
}

impl MaintenanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OilChange => "Oil Change",
            Self::TireReplacement => "Tire Replacement",
            Self::BrakeService => "Brake Service",
            Self::EngineRepair => "Engine Repair",
            Self::GeneralInspection => "General Inspection",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Service record for a vehicle. An unresolved log keeps the vehicle in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLog {
    /// Unique log ID (e.g. `m1`)
    pub id: String,
    pub vehicle_id: String,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub cost: f64,
    pub date: NaiveDate,
    pub mechanic: String,
    pub resolved: bool,
}

impl MaintenanceLog {
    /// Open a new, unresolved log
    pub fn open(id: impl Into<String>, input: NewMaintenanceLog) -> Self {
        Self {
            id: id.into(),
            vehicle_id: input.vehicle_id,
            maintenance_type: input.maintenance_type,
            description: input.description,
            cost: input.cost,
            date: input.date,
            mechanic: input.mechanic,
            resolved: false,
        }
    }

    /// Mark the log resolved. Returns `false` if it already was.
    pub fn resolve(&mut self) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        true
    }

    pub fn is_open(&self) -> bool {
        !self.resolved
    }
}

/// Input for filing a maintenance log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaintenanceLog {
    pub vehicle_id: String,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub cost: f64,
    pub date: NaiveDate,
    pub mechanic: String,
}

// ── Tests ──────────────────────────────────────────────────────
