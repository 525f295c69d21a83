//! Driver aggregate

pub mod model;

pub use model::{Driver, DriverPatch, DriverStatus, LicenseStanding, NewDriver, MAX_SAFETY_SCORE};
