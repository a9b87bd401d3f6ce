//! Concurrent allocation engine of a fuel station.
//!
//! Purchases for a variant are routed to the lane whose pump can serve them
//! with the shortest queue. Capacity is reserved under the variant's pool
//! lock; the physical dispense happens outside it, serialized per pump by a
//! first-come-first-served hand-off.

pub mod device;
pub mod error;
pub mod handoff;
pub mod lane;
pub mod pool;
pub mod station;
pub mod stats;


pub use device::{Device, Pump};
pub use error::{Result, StationError};
pub use lane::LaneSnapshot;
pub use shared::FuelVariant;
pub use station::{Station, StationEvent};
pub use stats::StatsSnapshot;
