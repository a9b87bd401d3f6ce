use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::types::{FuelVariant, UnknownVariant};

/// Timing of the simulated pumps
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PumpSettings {
    /// Wall-clock milliseconds needed to dispense one unit of fuel
    pub millis_per_unit: u64,
}

impl Default for PumpSettings {
    fn default() -> Self {
        Self { millis_per_unit: 100 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub log_filter: String,
    /// Unit price keyed by variant name, e.g. `regular = 0.8`
    pub prices: HashMap<String, f64>,
    pub pump: PumpSettings,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            prices: HashMap::new(),
            pump: PumpSettings::default(),
        }
    }
}

impl StationConfig {
    /// Load configuration from an optional file, overridden by `STATION__*`
    /// environment variables (`STATION__PUMP__MILLIS_PER_UNIT=5`).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("STATION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid station configuration: {}", e))?;

        settings
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Invalid station configuration: {}", e))
    }

    /// Configured prices with parsed variants, ordered by variant
    pub fn variant_prices(&self) -> Result<Vec<(FuelVariant, f64)>, UnknownVariant> {
        let mut prices = self
            .prices
            .iter()
            .map(|(name, price)| Ok((name.parse::<FuelVariant>()?, *price)))
            .collect::<Result<Vec<_>, UnknownVariant>>()?;
        prices.sort_by_key(|(variant, _)| *variant);
        Ok(prices)
    }
}
