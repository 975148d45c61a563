use std::cell::Cell;

/// Ticket handed out for one load; compare it against the sequence when the
/// response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn number(self) -> u64 {
        self.0
    }
}

/// Monotonic per-controller request counter. Only the most recently issued
/// ticket is current; responses carrying an older ticket must be dropped.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: Cell<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestTicket(next)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest.get()
    }

    /// Invalidate every outstanding ticket without starting a new load.
    pub fn invalidate(&self) {
        self.issue();
    }
}
