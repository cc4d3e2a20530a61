//! Core abstractions for nexus-queue.
//!
//! Queue-type flags and the letter codec shared by the engine, the event
//! script and the CLI.

mod codec;
mod flags;

pub use codec::{
    decode, decode_letters, encode, expand_builtin, QueueTypeCodec, BUILTIN_ALIASES, NEGATION,
};
pub use flags::{Flag, FlagSet};
