//! Vehicle aggregate

pub mod model;

pub use model::{NewVehicle, Vehicle, VehiclePatch, VehicleStatus, VehicleType};
