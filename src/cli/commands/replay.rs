//! Event script replay command.

use tracing::info;

use crate::cli::args::{OutputFormat, ReplayArgs};
use crate::config::Config;
use crate::error::QueueError;
use crate::features::script::{parse_script, replay as replay_script};
use crate::output::format_replay;
use crate::transport::RecordingSink;

/// Execute replay command on already loaded script text.
///
/// # Errors
///
/// Returns an error if the script does not parse, the capacity override is
/// zero, or output formatting fails.
pub fn replay(
    config: &Config,
    args: &ReplayArgs,
    script: &str,
    format: OutputFormat,
) -> Result<String, QueueError> {
    let lines = parse_script(script)?;

    let mut engine = config.build_engine(RecordingSink::new());
    if let Some(capacity) = args.capacity {
        if capacity == 0 {
            return Err(QueueError::InvalidArgument(
                "--capacity must be at least 1".to_string(),
            ));
        }
        engine = engine.with_capacity(capacity);
    }

    info!(
        script = %args.script,
        events = lines.len(),
        capacity = engine.capacity(),
        "replaying script"
    );
    let report = replay_script(&mut engine, &lines);
    format_replay(&report, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(capacity: Option<usize>) -> ReplayArgs {
        ReplayArgs {
            script: "-".to_string(),
            capacity,
        }
    }

    #[test]
    fn test_replay_json() {
        let script = "do kick b\ndo punch b\n";
        let output = replay(&Config::default(), &args(None), script, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["events"], 2);
        assert_eq!(parsed["records"][0]["kind"], "sent");
        assert_eq!(parsed["records"][0]["command"], "queue add b kick");
        assert_eq!(parsed["records"].as_array().map(Vec::len), Some(1));
        assert_eq!(parsed["queue"][1]["dispatched"], false);
    }

    #[test]
    fn test_capacity_override() {
        let script = "do a e --free\ndo b e --free\ndo c e --free\n";
        let output =
            replay(&Config::default(), &args(Some(2)), script, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["records"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = replay(&Config::default(), &args(Some(0)), "blocked\n", OutputFormat::Json)
            .unwrap_err();
        assert!(matches!(err, QueueError::InvalidArgument(_)));
    }

    #[test]
    fn test_bad_script_reports_line() {
        let script = "blocked\nfly away\n";
        let err =
            replay(&Config::default(), &args(None), script, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, QueueError::Script { line: 2, .. }));
    }
}
