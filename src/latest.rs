//! Latest-wins guard for interleaved async responses.
//!
//! Without a guard, a slow earlier search can land after a faster later one
//! and overwrite it. Each request takes a ticket before sending; when the
//! response arrives, only the holder of the newest ticket may publish.

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct LatestSlot {
    inner: Mutex<Slots>,
}

#[derive(Debug, Default)]
struct Slots {
    issued: u64,
    published: u64,
}

impl LatestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a request about to be issued.
    pub fn begin(&self) -> Ticket {
        let mut s = self.inner.lock();
        s.issued += 1;
        Ticket(s.issued)
    }

    /// True when this ticket's response may be published: it is the newest
    /// issued and nothing newer has published yet. Accepting consumes the
    /// ticket; stale tickets are refused permanently.
    pub fn accept(&self, ticket: Ticket) -> bool {
        let mut s = self.inner.lock();
        if ticket.0 == s.issued && ticket.0 > s.published {
            s.published = ticket.0;
            true
        } else {
            false
        }
    }
}
