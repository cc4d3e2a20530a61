//! Queue-type inspection commands.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, OutputFormat};
use crate::config::Config;
use crate::core::encode as encode_flags;
use crate::error::QueueError;
use crate::output::{format_aliases, format_flags, to_json};

/// Execute decode command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn decode(config: &Config, spec: &str, format: OutputFormat) -> Result<String, QueueError> {
    let flags = config.codec().decode(spec);
    format_flags(spec, &flags, format)
}

/// Execute encode command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn encode(config: &Config, spec: &str, format: OutputFormat) -> Result<String, QueueError> {
    let letters = encode_flags(&config.codec().decode(spec));
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({ "spec": spec, "letters": letters })),
        OutputFormat::Pretty => Ok(letters),
    }
}

/// Execute aliases command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn aliases(config: &Config, format: OutputFormat) -> Result<String, QueueError> {
    format_aliases(&config.codec().aliases(), format)
}

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, QueueError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "nexus-queue", &mut buf);
    String::from_utf8(buf).map_err(|e| QueueError::InvalidArgument(format!("UTF-8 error: {e}")))
}
