//! Output formatting for nexus-queue.
//!
//! Every command renders either as colored text or as JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::core::FlagSet;
use crate::error::QueueError;
use crate::features::script::ReplayReport;

pub use json::*;
pub use pretty::*;

/// Format a decoded queue spec based on output format
///
/// # Errors
///
/// Returns `QueueError::Parse` if JSON serialization fails.
pub fn format_flags(
    spec: &str,
    flags: &FlagSet,
    format: OutputFormat,
) -> Result<String, QueueError> {
    match format {
        OutputFormat::Pretty => Ok(format_flags_pretty(spec, flags)),
        OutputFormat::Json => format_flags_json(spec, flags),
    }
}

/// Format the alias table based on output format
///
/// # Errors
///
/// Returns `QueueError::Parse` if JSON serialization fails.
pub fn format_aliases(
    aliases: &[(String, String)],
    format: OutputFormat,
) -> Result<String, QueueError> {
    match format {
        OutputFormat::Pretty => Ok(format_aliases_pretty(aliases)),
        OutputFormat::Json => format_aliases_json(aliases),
    }
}

/// Format a replay report based on output format
///
/// # Errors
///
/// Returns `QueueError::Parse` if JSON serialization fails.
pub fn format_replay(report: &ReplayReport, format: OutputFormat) -> Result<String, QueueError> {
    match format {
        OutputFormat::Pretty => Ok(format_replay_pretty(report)),
        OutputFormat::Json => format_replay_json(report),
    }
}
