//! Busy/ready tracking shared by all in-flight requests.
//!
//! The page shows busy while at least one request is in flight. Each request
//! holds a `BusyGuard`; dropping it settles that request, whether it
//! completed, failed, panicked or was abandoned.

use std::cell::Cell;

use crate::page::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Idle,
    Busy,
}

#[derive(Debug, Default)]
pub struct BusyTracker {
    in_flight: Cell<usize>,
}

impl BusyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    pub fn state(&self) -> TransportState {
        if self.in_flight.get() == 0 {
            TransportState::Idle
        } else {
            TransportState::Busy
        }
    }

    /// Mark one request as dispatched. The page flips to busy on the first.
    pub fn enter<'a, P: Page>(&'a self, page: &'a P) -> BusyGuard<'a, P> {
        let previous = self.in_flight.get();
        self.in_flight.set(previous + 1);
        if previous == 0 {
            page.set_busy(true);
        }
        BusyGuard {
            tracker: self,
            page,
        }
    }
}

/// Settles one request on drop. The page flips to ready on the last.
#[must_use = "dropping the guard immediately settles the request"]
pub struct BusyGuard<'a, P: Page> {
    tracker: &'a BusyTracker,
    page: &'a P,
}

impl<P: Page> Drop for BusyGuard<'_, P> {
    fn drop(&mut self) {
        let remaining = self.tracker.in_flight.get().saturating_sub(1);
        self.tracker.in_flight.set(remaining);
        if remaining == 0 {
            self.page.set_busy(false);
        }
    }
}
