use shared::{FuelVariant, UnknownVariant};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Not enough {variant} fuel for {amount}")]
    NoFuel { variant: FuelVariant, amount: f64 },
    #[error("{variant} costs {price}, more than the accepted {max_price}")]
    TooExpensive {
        variant: FuelVariant,
        price: f64,
        max_price: f64,
    },
    #[error("Price is not set for {0}")]
    PriceNotSet(FuelVariant),
}

impl From<UnknownVariant> for StationError {
    fn from(err: UnknownVariant) -> Self {
        StationError::InvalidArgument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StationError>;
