//! Test fixtures for the station integration suites

use parking_lot::{Condvar, Mutex};
use shared::FuelVariant;
use station_engine::Device;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Barrier that holds dispenses until the test opens it
#[derive(Default)]
pub struct Gate {
    open: Mutex<bool>,
    changed: Condvar,
}

impl Gate {
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn open(&self) {
        *self.open.lock() = true;
        self.changed.notify_all();
    }

    pub fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.changed.wait(&mut open);
        }
    }
}

/// Device that records how it is driven.
///
/// Flags overlapping dispenses and dispenses beyond the remaining quantity
/// instead of panicking, so the assertions happen on the test thread.
pub struct RecordingPump {
    variant: FuelVariant,
    remaining: Mutex<f64>,
    delay: Duration,
    gate: Option<Arc<Gate>>,
    active: AtomicUsize,
    entered: AtomicUsize,
    overlapped: AtomicBool,
    oversold: AtomicBool,
    dispensed: Mutex<Vec<f64>>,
}

impl RecordingPump {
    pub fn new(variant: FuelVariant, quantity: f64) -> Self {
        Self {
            variant,
            remaining: Mutex::new(quantity),
            delay: Duration::ZERO,
            gate: None,
            active: AtomicUsize::new(0),
            entered: AtomicUsize::new(0),
            overlapped: AtomicBool::new(false),
            oversold: AtomicBool::new(false),
            dispensed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_gate(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Amounts in the order they were dispensed
    pub fn dispensed(&self) -> Vec<f64> {
        self.dispensed.lock().clone()
    }

    pub fn total_dispensed(&self) -> f64 {
        self.dispensed.lock().iter().sum()
    }

    /// Dispense calls started so far, finished or not
    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    pub fn overlapped(&self) -> bool {
        self.overlapped.load(Ordering::SeqCst)
    }

    pub fn oversold(&self) -> bool {
        self.oversold.load(Ordering::SeqCst)
    }
}

impl Device for RecordingPump {
    fn fuel_variant(&self) -> FuelVariant {
        self.variant
    }

    fn remaining_quantity(&self) -> f64 {
        *self.remaining.lock()
    }

    fn dispense(&self, amount: f64) {
        if self.active.fetch_add(1, Ordering::SeqCst) > 0 {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        self.entered.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.wait();
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        {
            let mut remaining = self.remaining.lock();
            if amount > *remaining {
                self.oversold.store(true, Ordering::SeqCst);
            }
            *remaining = (*remaining - amount).max(0.0);
        }
        self.dispensed.lock().push(amount);

        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Poll `condition` until it holds, panicking after `timeout`.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + timeout;
    while !condition() {
        assert!(Instant::now() < deadline, "condition not reached within {:?}", timeout);
        thread::sleep(Duration::from_millis(1));
    }
}
