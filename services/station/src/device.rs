//! Physical dispensing devices.

use parking_lot::Mutex;
use shared::{FuelVariant, PumpSettings};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A physical dispenser bound to one fuel variant.
///
/// `dispense` is not expected to tolerate concurrent calls on the same
/// device; the station never issues two at once.
pub trait Device: Send + Sync {
    fn fuel_variant(&self) -> FuelVariant;

    /// Non-negative, never increases.
    fn remaining_quantity(&self) -> f64;

    /// Blocks until `amount` has been dispensed. Caller guarantees
    /// `amount <= remaining_quantity()`.
    fn dispense(&self, amount: f64);
}

/// Identity comparison for shared devices.
pub fn same_device(a: &Arc<dyn Device>, b: &Arc<dyn Device>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const u8,
        Arc::as_ptr(b) as *const u8,
    )
}

/// Simulated pump that takes a fixed time per unit dispensed
#[derive(Debug)]
pub struct Pump {
    variant: FuelVariant,
    remaining: Mutex<f64>,
    per_unit: Duration,
}

impl Pump {
    pub fn new(variant: FuelVariant, quantity: f64) -> Self {
        Self::from_settings(variant, quantity, &PumpSettings::default())
    }

    pub fn from_settings(variant: FuelVariant, quantity: f64, settings: &PumpSettings) -> Self {
        Self {
            variant,
            remaining: Mutex::new(quantity),
            per_unit: Duration::from_millis(settings.millis_per_unit),
        }
    }

    /// Pump that dispenses without delay
    pub fn instant(variant: FuelVariant, quantity: f64) -> Self {
        Self::from_settings(variant, quantity, &PumpSettings { millis_per_unit: 0 })
    }
}

impl Device for Pump {
    fn fuel_variant(&self) -> FuelVariant {
        self.variant
    }

    fn remaining_quantity(&self) -> f64 {
        *self.remaining.lock()
    }

    fn dispense(&self, amount: f64) {
        if !self.per_unit.is_zero() {
            thread::sleep(self.per_unit.mul_f64(amount));
        }
        let mut remaining = self.remaining.lock();
        *remaining = (*remaining - amount).max(0.0);
    }
}
