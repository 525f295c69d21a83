//! Domain events
//!
//! Facts about ledger changes. The EventBus implementation lives in
//! `application::events`.

pub mod types;

pub use types::{EventMessage, LedgerEvent};
