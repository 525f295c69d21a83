//! Trip domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trip lifecycle status. Transitions only move forward:
/// `Draft -> Dispatched -> Completed`, with `Cancelled` reachable from
/// either active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    Draft,
    Dispatched,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const ALL: [TripStatus; 4] = [
        Self::Draft,
        Self::Dispatched,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Dispatched => "Dispatched",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cargo run from an origin to a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Unique trip ID (e.g. `t1`)
    pub id: String,
    pub vehicle_id: String,
    pub driver_id: String,
    pub origin: String,
    pub destination: String,
    /// Cargo weight in kg
    pub cargo_weight_kg: f64,
    pub cargo_description: String,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub dispatched_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Vehicle odometer reported at completion (km)
    pub final_odometer_km: Option<f64>,
    /// Distance driven, derived at completion (km)
    pub distance_km: Option<f64>,
    pub revenue: f64,
    pub notes: String,
}

impl Trip {
    /// Create a trip in `Draft`
    pub fn draft(id: impl Into<String>, input: NewTrip) -> Self {
        Self {
            id: id.into(),
            vehicle_id: input.vehicle_id,
            driver_id: input.driver_id,
            origin: input.origin,
            destination: input.destination,
            cargo_weight_kg: input.cargo_weight_kg,
            cargo_description: input.cargo_description,
            status: TripStatus::Draft,
            created_at: Utc::now(),
            dispatched_at: None,
            completed_at: None,
            final_odometer_km: None,
            distance_km: None,
            revenue: input.revenue,
            notes: input.notes,
        }
    }

    /// Move `Draft -> Dispatched`. Returns `false` and leaves the trip
    /// untouched from any other state.
    pub fn dispatch(&mut self) -> bool {
        if self.status != TripStatus::Draft {
            return false;
        }
        self.status = TripStatus::Dispatched;
        self.dispatched_at = Some(Utc::now());
        true
    }

    /// Move `Dispatched -> Completed`.
    ///
    /// `start_odometer_km` is the vehicle odometer before it is advanced to
    /// `final_odometer_km`; distance stays unknown when it is `None`.
    pub fn complete(&mut self, final_odometer_km: f64, start_odometer_km: Option<f64>) -> bool {
        if self.status != TripStatus::Dispatched {
            return false;
        }
        self.status = TripStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.final_odometer_km = Some(final_odometer_km);
        self.distance_km = start_odometer_km.map(|start| final_odometer_km - start);
        true
    }

    /// Move an active trip to `Cancelled`, returning the status it was
    /// cancelled from. Terminal trips yield `None`.
    pub fn cancel(&mut self) -> Option<TripStatus> {
        if self.status.is_terminal() {
            return None;
        }
        let previous = self.status;
        self.status = TripStatus::Cancelled;
        Some(previous)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TripStatus::Completed
    }

    /// Distance counted by the analytics: completed trips with a known,
    /// non-zero distance.
    pub fn counted_distance_km(&self) -> Option<f64> {
        match self.distance_km {
            Some(km) if self.is_completed() && km != 0.0 => Some(km),
            _ => None,
        }
    }
}

/// Input for planning a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrip {
    pub vehicle_id: String,
    pub driver_id: String,
    pub origin: String,
    pub destination: String,
    pub cargo_weight_kg: f64,
    pub cargo_description: String,
    pub revenue: f64,
    pub notes: String,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trip() -> Trip {
        Trip::draft(
            "t7",
            NewTrip {
                vehicle_id: "v1".into(),
                driver_id: "d6".into(),
                origin: "NYC Distribution".into(),
                destination: "Boston Depot".into(),
                cargo_weight_kg: 18000.0,
                cargo_description: "Retail goods".into(),
                revenue: 3200.0,
                notes: String::new(),
            },
        )
    }

    #[test]
    fn new_trip_is_draft() {
        let t = sample_trip();
        assert_eq!(t.status, TripStatus::Draft);
        assert!(t.dispatched_at.is_none());
        assert!(t.completed_at.is_none());
        assert!(t.distance_km.is_none());
    }

    #[test]
    fn dispatch_only_from_draft() {
        let mut t = sample_trip();
        assert!(t.dispatch());
        assert_eq!(t.status, TripStatus::Dispatched);
        assert!(t.dispatched_at.is_some());

        let stamp = t.dispatched_at;
        assert!(!t.dispatch());
        assert_eq!(t.dispatched_at, stamp);
    }

    #[test]
    fn complete_derives_distance() {
        let mut t = sample_trip();
        t.dispatch();
        assert!(t.complete(145580.0, Some(145200.0)));
        assert_eq!(t.status, TripStatus::Completed);
        assert_eq!(t.final_odometer_km, Some(145580.0));
        assert_eq!(t.distance_km, Some(380.0));
        assert!(t.completed_at.is_some());
    }

    #[test]
    fn complete_requires_dispatched() {
        let mut t = sample_trip();
        assert!(!t.complete(145580.0, Some(145200.0)));
        assert_eq!(t.status, TripStatus::Draft);
        assert!(t.final_odometer_km.is_none());
    }

    #[test]
    fn complete_without_start_odometer_leaves_distance_unknown() {
        let mut t = sample_trip();
        t.dispatch();
        t.complete(500.0, None);
        assert_eq!(t.final_odometer_km, Some(500.0));
        assert!(t.distance_km.is_none());
        assert!(t.counted_distance_km().is_none());
    }

    #[test]
    fn cancel_reports_previous_state() {
        let mut draft = sample_trip();
        assert_eq!(draft.cancel(), Some(TripStatus::Draft));
        assert_eq!(draft.status, TripStatus::Cancelled);

        let mut dispatched = sample_trip();
        dispatched.dispatch();
        assert_eq!(dispatched.cancel(), Some(TripStatus::Dispatched));
    }

    #[test]
    fn terminal_states_reject_everything() {
        let mut t = sample_trip();
        t.cancel();
        assert!(!t.dispatch());
        assert!(!t.complete(1.0, Some(0.0)));
        assert_eq!(t.cancel(), None);
        assert_eq!(t.status, TripStatus::Cancelled);

        let mut done = sample_trip();
        done.dispatch();
        done.complete(145580.0, Some(145200.0));
        assert_eq!(done.cancel(), None);
        assert_eq!(done.status, TripStatus::Completed);
    }

    #[test]
    fn counted_distance_ignores_unfinished_and_zero() {
        let mut t = sample_trip();
        t.distance_km = Some(50.0);
        assert!(t.counted_distance_km().is_none());

        t.status = TripStatus::Completed;
        assert_eq!(t.counted_distance_km(), Some(50.0));

        t.distance_km = Some(0.0);
        assert!(t.counted_distance_km().is_none());
    }
}
