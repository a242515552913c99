//! Busy/idle status signal

use std::sync::Mutex;
use tokio::sync::watch;

/// Observable busy flag.
///
/// The flag is `true` while at least one request is outstanding. Requests
/// are tracked with [`BusyGuard`]s so overlapping calls don't clear each
/// other's busy state.
pub struct StatusFlag {
    tx: watch::Sender<bool>,
    in_flight: Mutex<usize>,
}

impl StatusFlag {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            tx,
            in_flight: Mutex::new(0),
        }
    }

    /// Mark a request as outstanding until the returned guard is dropped.
    pub fn enter(&self) -> BusyGuard<'_> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        *in_flight += 1;
        self.publish(true);
        BusyGuard { flag: self }
    }

    pub fn is_busy(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    fn leave(&self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.publish(false);
        }
    }

    // Subscribers are only woken on an actual flip.
    fn publish(&self, busy: bool) {
        self.tx.send_if_modified(|current| {
            if *current == busy {
                return false;
            }
            *current = busy;
            true
        });
    }
}

impl Default for StatusFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that releases its request on drop, so the flag settles even when
/// the owning future is cancelled or returns early.
pub struct BusyGuard<'a> {
    flag: &'a StatusFlag,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.leave();
    }
}
