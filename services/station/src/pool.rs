//! Lane selection for one fuel variant.

use parking_lot::Mutex;
use shared::FuelVariant;
use std::sync::Arc;
use tracing::debug;

use crate::device::{Device, same_device};
use crate::handoff::{Handoff, Ticket};
use crate::lane::{Lane, LaneSnapshot};

/// Every lane of one variant behind a single lock.
///
/// The lock covers scanning, reserving and releasing; it is never held while
/// a client waits for a device or dispenses.
pub struct VariantPool {
    variant: FuelVariant,
    lanes: Mutex<Vec<Lane>>,
}

impl VariantPool {
    pub fn new(variant: FuelVariant) -> Self {
        Self {
            variant,
            lanes: Mutex::new(Vec::new()),
        }
    }

    pub fn variant(&self) -> FuelVariant {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.lanes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.lock().is_empty()
    }

    /// Append a lane for `device`. Returns false if the device is already here.
    pub fn push(&self, device: Arc<dyn Device>) -> bool {
        let mut lanes = self.lanes.lock();
        if lanes.iter().any(|lane| same_device(lane.device(), &device)) {
            return false;
        }
        lanes.push(Lane::new(device));
        true
    }

    /// Pick the lane with the shortest queue among those holding strictly more
    /// than `amount`, preferring the larger available amount on equal queues,
    /// and reserve `amount` on it before the lock is released.
    pub fn select(&self, amount: f64) -> Option<Reservation<'_>> {
        let mut lanes = self.lanes.lock();

        let mut selected: Option<usize> = None;
        for (index, lane) in lanes.iter().enumerate() {
            if !lane.can_serve(amount) {
                continue;
            }
            let better = match selected {
                None => true,
                Some(current) => {
                    let best = &lanes[current];
                    best.queue_length() > lane.queue_length()
                        || (best.queue_length() == lane.queue_length()
                            && best.available_amount() < lane.available_amount())
                }
            };
            if better {
                selected = Some(index);
            }
        }

        let index = selected?;
        let lane = &mut lanes[index];
        let ticket = lane.reserve(amount);
        debug!(
            variant = %self.variant,
            lane = index,
            amount = amount,
            queue_length = lane.queue_length(),
            available = lane.available_amount(),
            "Lane reserved"
        );

        Some(Reservation {
            slot: Slot {
                pool: self,
                index,
                ticket,
                handoff: Arc::clone(lane.handoff()),
                device: Arc::clone(lane.device()),
            },
            armed: true,
        })
    }

    fn release(&self, index: usize) {
        let mut lanes = self.lanes.lock();
        if let Some(lane) = lanes.get_mut(index) {
            lane.release();
        }
    }

    pub fn snapshots(&self) -> Vec<LaneSnapshot> {
        self.lanes.lock().iter().map(Lane::snapshot).collect()
    }
}

#[derive(Clone)]
struct Slot<'a> {
    pool: &'a VariantPool,
    index: usize,
    ticket: Ticket,
    handoff: Arc<Handoff>,
    device: Arc<dyn Device>,
}

/// Capacity reserved on a lane, waiting for the device.
///
/// Dropping a reservation without acquiring it still waits for its turn and
/// passes the device on, so the clients behind it are not stranded.
pub struct Reservation<'a> {
    slot: Slot<'a>,
    armed: bool,
}

impl<'a> Reservation<'a> {
    pub fn lane_index(&self) -> usize {
        self.slot.index
    }

    /// Block until this client is the sole holder of the lane's device.
    pub fn acquire(mut self) -> LaneGuard<'a> {
        self.slot.handoff.wait(self.slot.ticket);
        self.armed = false;
        debug!(
            variant = %self.slot.pool.variant,
            lane = self.slot.index,
            "Device acquired"
        );
        LaneGuard {
            slot: self.slot.clone(),
        }
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.slot.handoff.wait(self.slot.ticket);
            drop(LaneGuard {
                slot: self.slot.clone(),
            });
        }
    }
}

/// Exclusive hold on a lane's device.
///
/// Dropping it leaves the lane's queue under the pool lock and only then
/// hands the device to the next ticket.
pub struct LaneGuard<'a> {
    slot: Slot<'a>,
}

impl LaneGuard<'_> {
    pub fn device(&self) -> &Arc<dyn Device> {
        &self.slot.device
    }

    pub fn dispense(&self, amount: f64) {
        self.slot.device.dispense(amount);
    }
}

impl Drop for LaneGuard<'_> {
    fn drop(&mut self) {
        self.slot.pool.release(self.slot.index);
        self.slot.handoff.pass();
    }
}
