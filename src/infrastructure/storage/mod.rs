//! Storage traits and implementations

mod memory;
mod seed;
mod traits;

pub use memory::InMemoryStorage;
pub use traits::{EntityKind, Storage};
