//! Command implementations for nexus-queue.
//!
//! This module contains the implementation of all CLI commands. Each one
//! returns the text to print.

mod codec;
mod replay;

pub use codec::{aliases, completions, decode, encode};
pub use replay::replay;
