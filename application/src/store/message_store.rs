//! Append-only turn log

use chatbot_domain::Turn;
use std::sync::Arc;
use tokio::sync::watch;

/// Immutable view of the turn log at one point in time.
pub type History = Arc<Vec<Turn>>;

/// Ordered, append-only log of conversation turns.
///
/// Each append swaps in a new immutable [`History`] under the channel's
/// write lock, so readers never observe a torn sequence and a snapshot
/// stays valid after later appends.
pub struct MessageStore {
    tx: watch::Sender<History>,
}

impl MessageStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(History::default());
        Self { tx }
    }

    /// Append a turn and return the full sequence including it.
    ///
    /// Subscribers are notified of the new sequence.
    pub fn append(&self, turn: Turn) -> History {
        let mut appended = History::default();
        self.tx.send_modify(|history| {
            let mut turns = Vec::with_capacity(history.len() + 1);
            turns.extend(history.iter().cloned());
            turns.push(turn);
            *history = Arc::new(turns);
            appended = Arc::clone(history);
        });
        appended
    }

    /// Current sequence of turns.
    pub fn snapshot(&self) -> History {
        Arc::clone(&self.tx.borrow())
    }

    /// Receiver yielding the latest sequence on every append.
    pub fn subscribe(&self) -> watch::Receiver<History> {
        self.tx.subscribe()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}
