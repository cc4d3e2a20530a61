//! Event scripts.
//!
//! A script is a plain text list of the notifications a server would send
//! (`track`, `run`, `blocked`, ...) mixed with local requests (`do`,
//! `undo`). Replaying one drives a [`QueueEngine`](crate::features::reconcile::QueueEngine)
//! exactly as a live session would and records every command it sends.

pub mod event;
pub mod replay;

pub use event::{parse_line, parse_script, Event, ScriptLine};
pub use replay::{replay, ReplayRecord, ReplayReport};
