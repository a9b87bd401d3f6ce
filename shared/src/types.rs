use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of fuel. Devices and prices are scoped per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelVariant {
    Regular,
    Premium,
    Diesel,
}

impl FuelVariant {
    pub const ALL: [FuelVariant; 3] = [FuelVariant::Regular, FuelVariant::Premium, FuelVariant::Diesel];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelVariant::Regular => "regular",
            FuelVariant::Premium => "premium",
            FuelVariant::Diesel => "diesel",
        }
    }
}

impl fmt::Display for FuelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fuel variant: {0:?}")]
pub struct UnknownVariant(pub String);

impl FromStr for FuelVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        FuelVariant::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}
