use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use shared::{FuelVariant, StationConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::device::{same_device, Device};
use crate::error::{Result, StationError};
use crate::lane::LaneSnapshot;
use crate::pool::VariantPool;
use crate::stats::{SalesStats, StatsSnapshot};

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Outcome of a purchase that reached the business checks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StationEvent {
    Sale {
        variant: FuelVariant,
        amount: f64,
        cost: f64,
    },
    NoFuel {
        variant: FuelVariant,
        amount: f64,
    },
    TooExpensive {
        variant: FuelVariant,
        price: f64,
        max_price: f64,
    },
}

/// A fuel station serving concurrent purchases.
///
/// Lock order is registry, then pool. Purchases only ever take a pool lock,
/// the price lock and the statistics lock, never two of them at once.
pub struct Station {
    devices: Mutex<Vec<Arc<dyn Device>>>,
    pools: [VariantPool; 3],
    prices: RwLock<HashMap<FuelVariant, f64>>,
    stats: SalesStats,
    events: Option<mpsc::UnboundedSender<StationEvent>>,
}

impl Default for Station {
    fn default() -> Self {
        Self::new()
    }
}

impl Station {
    pub fn new() -> Self {
        Self {
            devices: Mutex::new(Vec::new()),
            pools: FuelVariant::ALL.map(VariantPool::new),
            prices: RwLock::new(HashMap::new()),
            stats: SalesStats::new(),
            events: None,
        }
    }

    /// Station that reports every counted purchase outcome on a channel
    pub fn with_events() -> (Self, mpsc::UnboundedReceiver<StationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut station = Self::new();
        station.events = Some(tx);
        (station, rx)
    }

    /// Station with the configured prices applied
    pub fn with_config(config: &StationConfig) -> Result<Self> {
        let station = Self::new();
        for (variant, price) in config.variant_prices()? {
            station.set_price(variant, price)?;
        }
        Ok(station)
    }

    fn pool(&self, variant: FuelVariant) -> &VariantPool {
        &self.pools[variant as usize]
    }

    /// Register a device. Registering the same device twice is a no-op.
    pub fn register_device(&self, device: Arc<dyn Device>) -> Result<()> {
        let quantity = device.remaining_quantity();
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(StationError::InvalidArgument(format!(
                "device quantity must be non-negative, got {}",
                quantity
            )));
        }

        let mut devices = self.devices.lock();
        if devices.iter().any(|known| same_device(known, &device)) {
            debug!(variant = %device.fuel_variant(), "Device already registered");
            return Ok(());
        }

        let variant = device.fuel_variant();
        self.pool(variant).push(Arc::clone(&device));
        devices.push(device);
        info!(variant = %variant, quantity = quantity, "Device registered");
        Ok(())
    }

    /// Copy of every registered device
    pub fn list_devices(&self) -> Vec<Arc<dyn Device>> {
        self.devices.lock().clone()
    }

    /// Buy `amount` of `variant` at no more than `max_unit_price` per unit.
    ///
    /// Blocks while earlier clients use the selected device. Returns the cost
    /// charged.
    pub fn purchase(&self, variant: FuelVariant, amount: f64, max_unit_price: f64) -> Result<f64> {
        if !is_positive(amount) {
            return Err(StationError::InvalidArgument(format!(
                "requested amount must be positive, got {}",
                amount
            )));
        }
        if !is_positive(max_unit_price) {
            return Err(StationError::InvalidArgument(format!(
                "maximum price must be positive, got {}",
                max_unit_price
            )));
        }

        let pool = self.pool(variant);
        if pool.is_empty() {
            return Err(self.cancel_no_fuel(variant, amount));
        }

        let price = self.price_for_purchase(variant)?;
        if price > max_unit_price {
            self.stats.record_too_expensive();
            warn!(
                variant = %variant,
                price = price,
                max_price = max_unit_price,
                "Purchase cancelled, too expensive"
            );
            self.emit(StationEvent::TooExpensive {
                variant,
                price,
                max_price: max_unit_price,
            });
            return Err(StationError::TooExpensive {
                variant,
                price,
                max_price: max_unit_price,
            });
        }

        let reservation = match pool.select(amount) {
            Some(reservation) => reservation,
            None => return Err(self.cancel_no_fuel(variant, amount)),
        };

        {
            let guard = reservation.acquire();
            guard.dispense(amount);
        }

        // Prices may have changed while queued; the current one is charged.
        let cost = self.price_for_purchase(variant)? * amount;
        self.stats.record_sale(cost);
        info!(variant = %variant, amount = amount, cost = cost, "Sale completed");
        self.emit(StationEvent::Sale {
            variant,
            amount,
            cost,
        });
        Ok(cost)
    }

    fn price_for_purchase(&self, variant: FuelVariant) -> Result<f64> {
        self.prices.read().get(&variant).copied().ok_or_else(|| {
            error!(variant = %variant, "Purchase attempted without a configured price");
            StationError::PriceNotSet(variant)
        })
    }

    fn cancel_no_fuel(&self, variant: FuelVariant, amount: f64) -> StationError {
        self.stats.record_no_fuel();
        warn!(variant = %variant, amount = amount, "Purchase cancelled, not enough fuel");
        self.emit(StationEvent::NoFuel { variant, amount });
        StationError::NoFuel { variant, amount }
    }

    fn emit(&self, event: StationEvent) {
        if let Some(events) = &self.events {
            // A dropped receiver only means nobody is listening.
            let _ = events.send(event);
        }
    }

    pub fn get_price(&self, variant: FuelVariant) -> Result<f64> {
        self.prices
            .read()
            .get(&variant)
            .copied()
            .ok_or(StationError::PriceNotSet(variant))
    }

    /// Replace the unit price of `variant`.
    ///
    /// Takes effect for every purchase that has not yet been charged,
    /// including clients already queued on a lane.
    pub fn set_price(&self, variant: FuelVariant, price: f64) -> Result<()> {
        if !is_positive(price) {
            return Err(StationError::InvalidArgument(format!(
                "price must be positive, got {}",
                price
            )));
        }
        self.prices.write().insert(variant, price);
        info!(variant = %variant, price = price, "Price set");
        Ok(())
    }

    pub fn revenue(&self) -> f64 {
        self.stats.snapshot().revenue
    }

    pub fn sales_count(&self) -> u64 {
        self.stats.snapshot().sales_count
    }

    pub fn cancellations_no_fuel(&self) -> u64 {
        self.stats.snapshot().cancel_no_fuel
    }

    pub fn cancellations_too_expensive(&self) -> u64 {
        self.stats.snapshot().cancel_too_expensive
    }

    /// All four counters read together
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Lanes of `variant` in registration order
    pub fn lanes(&self, variant: FuelVariant) -> Vec<LaneSnapshot> {
        self.pool(variant).snapshots()
    }

    pub fn log_summary(&self) {
        shared::logger::log_summary("stats", &self.stats());
    }
}
