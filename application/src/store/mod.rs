//! Observable conversation state.
//!
//! Both pieces of state a front-end renders live behind
//! `tokio::sync::watch` channels: the latest value is readable at any time,
//! and subscribers can await the next change.
//!
//! - [`MessageStore`]: append-only turn log
//! - [`StatusFlag`]: busy/idle signal with a drop guard

mod message_store;
mod status;

pub use message_store::{History, MessageStore};
pub use status::{BusyGuard, StatusFlag};
