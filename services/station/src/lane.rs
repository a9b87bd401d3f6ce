use serde::Serialize;
use std::sync::Arc;

use crate::device::Device;
use crate::handoff::{Handoff, Ticket};

/// Bookkeeping around one device.
///
/// `queue_length` and `available_amount` are only touched while the owning
/// pool's lock is held. `available_amount` is the device's remaining quantity
/// minus every amount reserved on this lane and not yet dispensed, so it never
/// exceeds what the device really holds.
pub struct Lane {
    device: Arc<dyn Device>,
    handoff: Arc<Handoff>,
    queue_length: usize,
    available_amount: f64,
}

/// Point-in-time view of a lane
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaneSnapshot {
    pub queue_length: usize,
    pub available_amount: f64,
    pub remaining_quantity: f64,
}

impl Lane {
    pub fn new(device: Arc<dyn Device>) -> Self {
        let available_amount = device.remaining_quantity();
        Self {
            device,
            handoff: Arc::new(Handoff::new()),
            queue_length: 0,
            available_amount,
        }
    }

    pub fn device(&self) -> &Arc<dyn Device> {
        &self.device
    }

    pub fn handoff(&self) -> &Arc<Handoff> {
        &self.handoff
    }

    pub fn queue_length(&self) -> usize {
        self.queue_length
    }

    pub fn available_amount(&self) -> f64 {
        self.available_amount
    }

    /// A lane serves only requests strictly below what it has left.
    pub fn can_serve(&self, amount: f64) -> bool {
        self.available_amount > amount
    }

    /// Commit `amount` and take a place in the hand-off line.
    ///
    /// Callers check `can_serve` first; the ticket is drawn here so that
    /// hand-off order equals admission order.
    pub fn reserve(&mut self, amount: f64) -> Ticket {
        debug_assert!(self.can_serve(amount));
        self.queue_length += 1;
        self.available_amount -= amount;
        self.handoff.draw()
    }

    /// Leave the queue after dispensing. The reserved amount stays deducted.
    pub fn release(&mut self) {
        debug_assert!(self.queue_length > 0);
        self.queue_length = self.queue_length.saturating_sub(1);
    }

    pub fn snapshot(&self) -> LaneSnapshot {
        LaneSnapshot {
            queue_length: self.queue_length,
            available_amount: self.available_amount,
            remaining_quantity: self.device.remaining_quantity(),
        }
    }
}
