//! Request sequencing
//!
//! Overlapping requests may complete in any order. Every request takes a
//! ticket before it is sent, and a completed response only writes the parts
//! of the page no newer response has written yet.

use rustc_hash::FxHashMap;

use crate::ids::CartId;

/// Position of a request in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Hands out tickets and remembers the newest one applied per target.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
    summary: u64,
    lines: FxHashMap<CartId, u64>,
}

impl RequestSequencer {
    /// Create a sequencer with nothing issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for the next request.
    pub fn issue(&mut self) -> Ticket {
        self.issued = self.issued.saturating_add(1);

        Ticket(self.issued)
    }

    /// Record that `ticket` wrote the totals. An older ticket never moves the
    /// mark back.
    pub fn claim_summary(&mut self, ticket: Ticket) {
        self.summary = self.summary.max(ticket.0);
    }

    /// Whether `ticket` may still write the totals.
    pub fn summary_is_current(&self, ticket: Ticket) -> bool {
        ticket.0 > self.summary
    }

    /// Record that `ticket` wrote the quantity of `cart_id`. An older ticket
    /// never moves the mark back, and a retired line stays retired.
    pub fn claim_line(&mut self, cart_id: &CartId, ticket: Ticket) {
        let applied = self.lines.entry(cart_id.clone()).or_default();

        *applied = (*applied).max(ticket.0);
    }

    /// Whether `ticket` may still write the quantity of `cart_id`.
    pub fn line_is_current(&self, cart_id: &CartId, ticket: Ticket) -> bool {
        self.lines
            .get(cart_id)
            .is_none_or(|applied| ticket.0 > *applied)
    }

    /// Stop accepting quantity writes for a removed line.
    pub fn retire_line(&mut self, cart_id: &CartId) {
        self.lines.insert(cart_id.clone(), u64::MAX);
    }
}
