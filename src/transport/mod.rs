//! Outbound command delivery.
//!
//! The engine hands finished command strings (`queue add eb slash`,
//! `queue remove 2`) to a [`CommandSink`]. Delivery is fire-and-forget:
//! the engine never waits for the server to acknowledge anything.

use std::io::Write;

use crate::error::QueueError;

/// Something that can deliver a command string to the server.
#[cfg_attr(test, mockall::automock)]
pub trait CommandSink {
    /// Send one command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be handed to the transport.
    fn send_command(&mut self, command: &str) -> Result<(), QueueError>;
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn send_command(&mut self, command: &str) -> Result<(), QueueError> {
        (**self).send_command(command)
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn send_command(&mut self, command: &str) -> Result<(), QueueError> {
        (**self).send_command(command)
    }
}

/// Sink that keeps every command it is given, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Vec<String>,
}

impl RecordingSink {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { sent: Vec::new() }
    }

    /// Commands received so far.
    #[must_use]
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.sent)
    }
}

impl CommandSink for RecordingSink {
    fn send_command(&mut self, command: &str) -> Result<(), QueueError> {
        self.sent.push(command.to_string());
        Ok(())
    }
}

/// Sink that writes each command as a line to a writer.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CommandSink for WriterSink<W> {
    fn send_command(&mut self, command: &str) -> Result<(), QueueError> {
        writeln!(self.writer, "{command}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| QueueError::Transport(format!("Failed to write command: {e}")))
    }
}
