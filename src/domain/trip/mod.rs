//! Trip aggregate
//!
//! Contains the Trip entity, its lifecycle status and creation input.

pub mod model;

pub use model::{NewTrip, Trip, TripStatus};
