//! Feature implementations for nexus-queue.
//!
//! - Queue reconciliation engine and dispatch
//! - Event scripts and replay

pub mod reconcile;
pub mod script;
