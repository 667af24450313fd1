use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct Counters {
    issued: Cell<u64>,
    settled: Cell<u64>,
}

/// Latest-wins guard for requests issued by one control.
///
/// Every triggering event takes a ticket synchronously. When the response
/// arrives the ticket is settled; only the most recently issued ticket is
/// allowed to apply its result.
#[derive(Clone, Default)]
pub struct RequestSequence {
    counters: Rc<Counters>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        let seq = self.counters.issued.get() + 1;
        self.counters.issued.set(seq);
        RequestTicket {
            seq,
            counters: Rc::clone(&self.counters),
        }
    }

    /// Whether the latest issued request is still waiting for its response
    pub fn has_outstanding(&self) -> bool {
        self.counters.settled.get() < self.counters.issued.get()
    }

    /// Invalidate every issued ticket. Returns whether one was still outstanding.
    pub fn cancel_outstanding(&self) -> bool {
        let outstanding = self.has_outstanding();
        let seq = self.counters.issued.get() + 1;
        self.counters.issued.set(seq);
        self.counters.settled.set(seq);
        outstanding
    }
}

pub struct RequestTicket {
    seq: u64,
    counters: Rc<Counters>,
}

impl RequestTicket {
    #[cfg(test)]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_current(&self) -> bool {
        self.counters.issued.get() == self.seq
    }

    /// Mark the response as arrived. Returns `true` if it may be applied.
    pub fn settle(self) -> bool {
        if self.is_current() {
            self.counters.settled.set(self.seq);
            true
        } else {
            false
        }
    }
}
