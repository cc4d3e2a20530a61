//! Error types for nexus-queue.

use thiserror::Error;

/// Errors raised outside the reconciliation engine itself.
///
/// The engine never fails; these cover configuration, event scripts,
/// output formatting and the command sink.
#[derive(Error, Debug)]
pub enum QueueError {
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An event script line could not be understood.
    #[error("Script error on line {line}: {message}")]
    Script {
        /// 1-based line number in the script.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The command sink refused or failed to deliver a command.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A caller-supplied argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl QueueError {
    /// Build a script error for the given 1-based line.
    #[must_use]
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::InvalidArgument(_) => 2,
            Self::Script { .. } => 3,
            Self::Transport(_) | Self::Parse(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_error_display() {
        let err = QueueError::script(4, "unknown event 'jump'");
        assert_eq!(
            err.to_string(),
            "Script error on line 4: unknown event 'jump'"
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(QueueError::Config("bad".to_string()).exit_code(), 2);
        assert_eq!(QueueError::InvalidArgument("bad".to_string()).exit_code(), 2);
        assert_eq!(QueueError::Transport("closed".to_string()).exit_code(), 1);
    }
}
