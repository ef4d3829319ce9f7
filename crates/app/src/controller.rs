//! Shared capture session state

use crate::console::Console;
use capture_gdi::Rect;
use overlay::RegionSink;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Everything the pointer-hook and keyboard-hook threads share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Last committed drag, `Rect::EMPTY` until the first one
    pub region: Rect,
    /// Sequence number for the next capture file
    pub next_index: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            region: Rect::EMPTY,
            next_index: 1,
        }
    }
}

/// Capture number claimed for one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub region: Rect,
    pub index: u32,
}

/// Owner of the committed region and capture counter.
///
/// Every lock is held for a single read or assignment only.
pub struct Controller {
    session: Mutex<SessionState>,
    console: Arc<dyn Console>,
}

impl Controller {
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self {
            session: Mutex::new(SessionState::default()),
            console,
        }
    }

    /// Replace the committed region wholesale
    pub fn update_region(&self, rect: Rect) {
        self.session.lock().region = rect;

        debug!(%rect, "region committed");
        self.console.region_updated(rect);
    }

    /// Consistent copy of region and counter
    #[cfg(test)]
    pub fn snapshot(&self) -> SessionState {
        *self.session.lock()
    }

    /// Claim the next capture number for the committed region.
    ///
    /// Returns `None` while the region is empty; no number is taken then.
    pub fn reserve(&self) -> Option<Reservation> {
        let mut session = self.session.lock();
        if session.region.is_empty() {
            return None;
        }

        let reservation = Reservation {
            region: session.region,
            index: session.next_index,
        };
        session.next_index = session.next_index.saturating_add(1);
        Some(reservation)
    }

    /// Hand back the number of a capture that failed, unless a later one was
    /// already claimed
    pub fn release(&self, reservation: Reservation) {
        let mut session = self.session.lock();
        if session.next_index == reservation.index.saturating_add(1) {
            session.next_index = reservation.index;
        }
    }

    pub fn console(&self) -> &Arc<dyn Console> {
        &self.console
    }
}

impl RegionSink for Controller {
    fn commit(&self, rect: Rect) {
        self.update_region(rect);
    }
}
