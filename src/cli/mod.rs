//! Command-line interface for nexus-queue.

pub mod args;
pub mod commands;
