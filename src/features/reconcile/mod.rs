//! Queue reconciliation.
//!
//! Models the server's action queue on the client and lets actions be
//! queued locally before the server has confirmed them.
//!
//! - [`QueueEngine`] owns the confirmed and pending queues
//! - [`entry`] holds the entry types and the snapshot item
//! - [`dispatch`] turns pending entries into `queue add` commands

pub mod dispatch;
pub mod engine;
pub mod entry;

pub use dispatch::{add_command, remove_command};
pub use engine::{QueueEngine, CLEAR_ALL, DEFAULT_CAPACITY};
pub use entry::{same_command, ConfirmedEntry, PendingEntry, QueueItem};
