//! nexus-queue - client-side action queue reconciliation
//!
//! This crate keeps a local model of a server-controlled action queue in
//! step with the server's queue notifications, and lets actions be queued
//! locally ahead of the server without overrunning its queue or stacking
//! balance-consuming actions.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod transport;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use crate::core::{Flag, FlagSet, QueueTypeCodec};
pub use error::QueueError;
pub use features::reconcile::{ConfirmedEntry, PendingEntry, QueueEngine, QueueItem};
pub use transport::{CommandSink, RecordingSink, WriterSink};
