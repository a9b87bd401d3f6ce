//! Single-slot hand-off with strict arrival-order admission.
//!
//! Every waiter draws a ticket; the token is owned by whoever holds the
//! ticket equal to `now_serving`. Passing the token advances `now_serving`,
//! so tickets are served exactly in the order they were drawn.

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct TicketState {
    next_ticket: u64,
    now_serving: u64,
}

#[derive(Debug, Default)]
pub struct Handoff {
    state: Mutex<TicketState>,
    turn: Condvar,
}

impl Handoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a place in line. Never blocks.
    pub fn draw(&self) -> Ticket {
        let mut state = self.state.lock();
        let ticket = Ticket(state.next_ticket);
        state.next_ticket += 1;
        ticket
    }

    /// Block until `ticket` holds the token.
    ///
    /// There is no timeout. Wake-ups that are not our turn are ignored.
    pub fn wait(&self, ticket: Ticket) {
        let mut state = self.state.lock();
        while state.now_serving != ticket.0 {
            self.turn.wait(&mut state);
        }
    }

    /// Give the token to the next ticket in line. Must only be called by the
    /// current holder.
    pub fn pass(&self) {
        let mut state = self.state.lock();
        state.now_serving += 1;
        drop(state);
        self.turn.notify_all();
    }

    /// Tickets drawn but not yet passed on, the holder included
    pub fn pending(&self) -> u64 {
        let state = self.state.lock();
        state.next_ticket - state.now_serving
    }
}
