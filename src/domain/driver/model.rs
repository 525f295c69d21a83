//! Driver domain entity

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::VehicleType;

/// Safety score ceiling
pub const MAX_SAFETY_SCORE: u8 = 100;

/// Driver duty status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverStatus {
    #[serde(rename = "On Duty")]
    OnDuty,
    /// Free to be assigned a trip
    #[serde(rename = "Off Duty")]
    OffDuty,
    Suspended,
    /// Driving a dispatched trip
    #[serde(rename = "On Trip")]
    OnTrip,
}

impl Default for DriverStatus {
    fn default() -> Self {
        Self::OffDuty
    }
}

impl DriverStatus {
    pub const ALL: [DriverStatus; 4] = [
        Self::OnDuty,
        Self::OffDuty,
        Self::Suspended,
        Self::OnTrip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnDuty => "On Duty",
            Self::OffDuty => "Off Duty",
            Self::Suspended => "Suspended",
            Self::OnTrip => "On Trip",
        }
    }
}

impl std::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a driver's license stands relative to a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseStanding {
    Valid,
    /// Still valid but expires inside the warning window
    ExpiringSoon,
    Expired,
}

/// Fleet driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// Unique driver ID (e.g. `d1`)
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    /// Last day the license is printed as valid; the license counts as
    /// expired from this day on.
    pub license_expiry: NaiveDate,
    /// Vehicle types the driver may operate
    pub license_categories: BTreeSet<VehicleType>,
    pub status: DriverStatus,
    /// 0..=100
    pub safety_score: u8,
    /// Trips ever dispatched to this driver
    pub total_trips: u32,
    /// Trips this driver brought to completion
    pub completed_trips: u32,
    pub hire_date: NaiveDate,
}

impl Driver {
    /// Build a driver from creation input. New drivers start `Off Duty`
    /// with a perfect safety score and no trips.
    pub fn new(id: impl Into<String>, input: NewDriver) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            license_number: input.license_number,
            license_expiry: input.license_expiry,
            license_categories: input.license_categories,
            status: DriverStatus::OffDuty,
            safety_score: MAX_SAFETY_SCORE,
            total_trips: 0,
            completed_trips: 0,
            hire_date: input.hire_date,
        }
    }

    /// A license is valid only while its expiry date is strictly after `today`.
    pub fn is_license_valid(&self, today: NaiveDate) -> bool {
        self.license_expiry > today
    }

    pub fn license_standing(&self, today: NaiveDate, warning_days: i64) -> LicenseStanding {
        if !self.is_license_valid(today) {
            LicenseStanding::Expired
        } else if self.license_expiry < today + Duration::days(warning_days) {
            LicenseStanding::ExpiringSoon
        } else {
            LicenseStanding::Valid
        }
    }

    pub fn is_licensed_for(&self, vehicle_type: VehicleType) -> bool {
        self.license_categories.contains(&vehicle_type)
    }

    pub fn is_available(&self) -> bool {
        self.status == DriverStatus::OffDuty
    }

    /// Completed share of all dispatched trips, as a rounded percentage.
    /// A driver with no trips has a 100% rate.
    pub fn completion_rate(&self) -> u32 {
        if self.total_trips == 0 {
            return 100;
        }
        (f64::from(self.completed_trips) / f64::from(self.total_trips) * 100.0).round() as u32
    }
}

/// Input for hiring a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDriver {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub license_categories: BTreeSet<VehicleType>,
    pub hire_date: NaiveDate,
}

/// Partial update for a driver. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub license_categories: Option<BTreeSet<VehicleType>>,
    pub status: Option<DriverStatus>,
    pub safety_score: Option<u8>,
    pub hire_date: Option<NaiveDate>,
}

impl DriverPatch {
    pub fn apply(self, driver: &mut Driver) {
        if let Some(name) = self.name {
            driver.name = name;
        }
        if let Some(email) = self.email {
            driver.email = email;
        }
        if let Some(phone) = self.phone {
            driver.phone = phone;
        }
        if let Some(number) = self.license_number {
            driver.license_number = number;
        }
        if let Some(expiry) = self.license_expiry {
            driver.license_expiry = expiry;
        }
        if let Some(categories) = self.license_categories {
            driver.license_categories = categories;
        }
        if let Some(status) = self.status {
            driver.status = status;
        }
        if let Some(score) = self.safety_score {
            driver.safety_score = score.min(MAX_SAFETY_SCORE);
        }
        if let Some(hired) = self.hire_date {
            driver.hire_date = hired;
        }
    }

    /// True when applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_driver() -> Driver {
        Driver::new(
            "d7",
            NewDriver {
                name: "Nina Park".into(),
                email: "nina@fleet.io".into(),
                phone: "+1-555-0107".into(),
                license_number: "DL-A007".into(),
                license_expiry: day(2027, 3, 1),
                license_categories: BTreeSet::from([VehicleType::Van, VehicleType::Bike]),
                hire_date: day(2024, 1, 8),
            },
        )
    }

    #[test]
    fn new_driver_defaults() {
        let d = sample_driver();
        assert_eq!(d.status, DriverStatus::OffDuty);
        assert_eq!(d.safety_score, 100);
        assert_eq!(d.total_trips, 0);
        assert_eq!(d.completed_trips, 0);
        assert!(d.is_available());
    }

    #[test]
    fn license_expires_on_its_expiry_date() {
        let d = sample_driver();
        assert!(d.is_license_valid(day(2027, 2, 28)));
        assert!(!d.is_license_valid(day(2027, 3, 1)));
        assert!(!d.is_license_valid(day(2027, 6, 1)));
    }

    #[test]
    fn license_standing_windows() {
        let d = sample_driver();
        assert_eq!(
            d.license_standing(day(2026, 1, 1), 60),
            LicenseStanding::Valid
        );
        assert_eq!(
            d.license_standing(day(2027, 2, 1), 60),
            LicenseStanding::ExpiringSoon
        );
        assert_eq!(
            d.license_standing(day(2027, 3, 1), 60),
            LicenseStanding::Expired
        );
    }

    #[test]
    fn license_categories() {
        let d = sample_driver();
        assert!(d.is_licensed_for(VehicleType::Van));
        assert!(!d.is_licensed_for(VehicleType::Truck));
    }

    #[test]
    fn completion_rate_rounds_and_defaults_to_full() {
        let mut d = sample_driver();
        assert_eq!(d.completion_rate(), 100);

        d.total_trips = 3;
        d.completed_trips = 2;
        assert_eq!(d.completion_rate(), 67);
    }

    #[test]
    fn patch_clamps_safety_score() {
        let mut d = sample_driver();
        DriverPatch {
            safety_score: Some(250),
            status: Some(DriverStatus::Suspended),
            ..Default::default()
        }
        .apply(&mut d);

        assert_eq!(d.safety_score, MAX_SAFETY_SCORE);
        assert_eq!(d.status, DriverStatus::Suspended);
        assert_eq!(d.name, "Nina Park");
    }

    #[test]
    fn empty_patch() {
        assert!(DriverPatch::default().is_empty());
        let patch = DriverPatch {
            phone: Some("+1-555-0199".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
