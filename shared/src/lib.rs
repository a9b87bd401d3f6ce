pub mod config;
pub mod logger;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::{PumpSettings, StationConfig};
pub use types::{FuelVariant, UnknownVariant};
