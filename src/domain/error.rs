//! Domain errors

use thiserror::Error;

use crate::domain::VehicleType;

/// Why a trip could not be planned. Checks run in declaration order and the
/// first failure is reported; the message is meant for the end user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripError {
    #[error("Vehicle not found")]
    VehicleNotFound(String),

    #[error("Driver not found")]
    DriverNotFound(String),

    #[error("Vehicle is not available")]
    VehicleUnavailable(String),

    #[error("Driver is not available")]
    DriverUnavailable(String),

    #[error("Cargo weight ({cargo_weight_kg}kg) exceeds vehicle capacity ({max_capacity_kg}kg)")]
    OverCapacity {
        cargo_weight_kg: f64,
        max_capacity_kg: f64,
    },

    #[error("Driver license is expired")]
    LicenseExpired(String),

    #[error("Driver is not licensed for {0}")]
    NotLicensedFor(VehicleType),
}

/// Result of planning a trip
pub type TripResult<T> = Result<T, TripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            TripError::VehicleNotFound("v42".into()).to_string(),
            "Vehicle not found"
        );
        assert_eq!(
            TripError::OverCapacity {
                cargo_weight_kg: 25000.0,
                max_capacity_kg: 20000.0,
            }
            .to_string(),
            "Cargo weight (25000kg) exceeds vehicle capacity (20000kg)"
        );
        assert_eq!(
            TripError::NotLicensedFor(VehicleType::Bike).to_string(),
            "Driver is not licensed for Bike"
        );
    }
}
