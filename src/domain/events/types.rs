//! Ledger change events
//!
//! One event is published after every mutation that changed state. Events
//! name what happened and which records were touched; subscribers re-read
//! the ledger for the current values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::TripStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum LedgerEvent {
    VehicleAdded {
        vehicle_id: String,
    },
    VehicleUpdated {
        vehicle_id: String,
    },
    VehicleRetired {
        vehicle_id: String,
    },
    DriverAdded {
        driver_id: String,
    },
    DriverUpdated {
        driver_id: String,
    },
    TripCreated {
        trip_id: String,
        vehicle_id: String,
        driver_id: String,
    },
    TripDispatched {
        trip_id: String,
        vehicle_id: String,
        driver_id: String,
    },
    TripCompleted {
        trip_id: String,
        vehicle_id: String,
        driver_id: String,
        distance_km: Option<f64>,
    },
    TripCancelled {
        trip_id: String,
        vehicle_id: String,
        driver_id: String,
        /// State the trip was cancelled from
        previous_status: TripStatus,
    },
    MaintenanceLogged {
        log_id: String,
        vehicle_id: String,
    },
    MaintenanceResolved {
        log_id: String,
        vehicle_id: String,
        /// Whether this was the vehicle's last open log
        vehicle_released: bool,
    },
    FuelLogged {
        log_id: String,
        vehicle_id: String,
    },
}

impl LedgerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::VehicleAdded { .. } => "vehicle_added",
            LedgerEvent::VehicleUpdated { .. } => "vehicle_updated",
            LedgerEvent::VehicleRetired { .. } => "vehicle_retired",
            LedgerEvent::DriverAdded { .. } => "driver_added",
            LedgerEvent::DriverUpdated { .. } => "driver_updated",
            LedgerEvent::TripCreated { .. } => "trip_created",
            LedgerEvent::TripDispatched { .. } => "trip_dispatched",
            LedgerEvent::TripCompleted { .. } => "trip_completed",
            LedgerEvent::TripCancelled { .. } => "trip_cancelled",
            LedgerEvent::MaintenanceLogged { .. } => "maintenance_logged",
            LedgerEvent::MaintenanceResolved { .. } => "maintenance_resolved",
            LedgerEvent::FuelLogged { .. } => "fuel_logged",
        }
    }

    /// Vehicle touched by the event, if any
    pub fn vehicle_id(&self) -> Option<&str> {
        match self {
            LedgerEvent::VehicleAdded { vehicle_id }
            | LedgerEvent::VehicleUpdated { vehicle_id }
            | LedgerEvent::VehicleRetired { vehicle_id }
            | LedgerEvent::TripCreated { vehicle_id, .. }
            | LedgerEvent::TripDispatched { vehicle_id, .. }
            | LedgerEvent::TripCompleted { vehicle_id, .. }
            | LedgerEvent::TripCancelled { vehicle_id, .. }
            | LedgerEvent::MaintenanceLogged { vehicle_id, .. }
            | LedgerEvent::MaintenanceResolved { vehicle_id, .. }
            | LedgerEvent::FuelLogged { vehicle_id, .. } => Some(vehicle_id),
            LedgerEvent::DriverAdded { .. } | LedgerEvent::DriverUpdated { .. } => None,
        }
    }

    /// Driver touched by the event, if any
    pub fn driver_id(&self) -> Option<&str> {
        match self {
            LedgerEvent::DriverAdded { driver_id }
            | LedgerEvent::DriverUpdated { driver_id }
            | LedgerEvent::TripCreated { driver_id, .. }
            | LedgerEvent::TripDispatched { driver_id, .. }
            | LedgerEvent::TripCompleted { driver_id, .. }
            | LedgerEvent::TripCancelled { driver_id, .. } => Some(driver_id),
            _ => None,
        }
    }
}

/// Wrapper for sending events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: LedgerEvent,
}

impl EventMessage {
    pub fn new(event: LedgerEvent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let msg = EventMessage::new(LedgerEvent::TripDispatched {
            trip_id: "t7".into(),
            vehicle_id: "v1".into(),
            driver_id: "d6".into(),
        });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "TripDispatched");
        assert_eq!(json["data"]["trip_id"], "t7");
        assert!(json["id"].is_string());
    }

    #[test]
    fn touched_ids() {
        let event = LedgerEvent::MaintenanceLogged {
            log_id: "m6".into(),
            vehicle_id: "v3".into(),
        };
        assert_eq!(event.event_type(), "maintenance_logged");
        assert_eq!(event.vehicle_id(), Some("v3"));
        assert_eq!(event.driver_id(), None);

        let event = LedgerEvent::DriverUpdated {
            driver_id: "d2".into(),
        };
        assert_eq!(event.vehicle_id(), None);
        assert_eq!(event.driver_id(), Some("d2"));
    }
}
