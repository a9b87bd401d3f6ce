use parking_lot::Mutex;
use serde::Serialize;

/// Aggregate business counters. They only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub sales_count: u64,
    pub revenue: f64,
    pub cancel_no_fuel: u64,
    pub cancel_too_expensive: u64,
}

/// Counters behind one lock, separate from every pool lock.
#[derive(Debug, Default)]
pub struct SalesStats {
    inner: Mutex<StatsSnapshot>,
}

impl SalesStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sale(&self, cost: f64) {
        let mut stats = self.inner.lock();
        stats.sales_count += 1;
        stats.revenue += cost;
    }

    pub fn record_no_fuel(&self) {
        self.inner.lock().cancel_no_fuel += 1;
    }

    pub fn record_too_expensive(&self) {
        self.inner.lock().cancel_too_expensive += 1;
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        *self.inner.lock()
    }
}
