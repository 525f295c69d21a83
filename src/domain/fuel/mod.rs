//! Fuel aggregate

pub mod model;

pub use model::{FuelLog, NewFuelLog};
