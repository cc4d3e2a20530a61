//! JSON output formatting for nexus-queue.

use serde::Serialize;
use serde_json::json;

use crate::core::{encode, FlagSet};
use crate::error::QueueError;
use crate::features::script::ReplayReport;

/// Format a decoded flag set with its canonical letters.
///
/// # Errors
///
/// Returns `QueueError::Parse` if JSON serialization fails.
pub fn format_flags_json(spec: &str, flags: &FlagSet) -> Result<String, QueueError> {
    let output = json!({
        "spec": spec,
        "letters": encode(flags),
        "flags": flags,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format alias words and their letters.
///
/// # Errors
///
/// Returns `QueueError::Parse` if JSON serialization fails.
pub fn format_aliases_json(aliases: &[(String, String)]) -> Result<String, QueueError> {
    let items: Vec<_> = aliases
        .iter()
        .map(|(alias, letters)| json!({ "alias": alias, "letters": letters }))
        .collect();
    to_json(&items)
}

/// Format a replay report as JSON.
///
/// # Errors
///
/// Returns `QueueError::Parse` if JSON serialization fails.
pub fn format_replay_json(report: &ReplayReport) -> Result<String, QueueError> {
    to_json(report)
}

/// Serialize any value as pretty JSON.
///
/// # Errors
///
/// Returns `QueueError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, QueueError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decode;
    use crate::features::reconcile::{ConfirmedEntry, PendingEntry, QueueItem};
    use crate::features::script::ReplayRecord;

    #[test]
    fn test_format_replay_json() {
        let queue = vec![
            QueueItem::Confirmed(ConfirmedEntry::external("slash", decode("b"))),
            QueueItem::Pending(PendingEntry::new("kick", decode("eb"), true, false)),
        ];
        let report = ReplayReport {
            events: 2,
            records: vec![ReplayRecord::Snapshot {
                line: 2,
                queue: queue.clone(),
            }],
            queue,
        };

        let output = format_replay_json(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["events"], 2);
        assert_eq!(parsed["records"][0]["kind"], "snapshot");
        assert_eq!(parsed["records"][0]["queue"][0]["state"], "confirmed");
        assert_eq!(parsed["queue"][0]["flags"]["has_balance"], true);
        assert_eq!(parsed["queue"][1]["state"], "pending");
        assert_eq!(parsed["queue"][1]["dispatched"], false);
    }

    #[test]
    fn test_format_flags_json() {
        let output = format_flags_json("free", &decode("free")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["spec"], "free");
        assert_eq!(parsed["letters"], "eb!p!w!t");
        assert_eq!(parsed["flags"]["has_paralysis"], false);
        assert!(parsed["flags"].get("is_standing").is_none());
    }

    #[test]
    fn test_format_aliases_json() {
        let aliases = vec![("stun".to_string(), "!t".to_string())];
        let output = format_aliases_json(&aliases).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["alias"], "stun");
        assert_eq!(parsed[0]["letters"], "!t");
    }
}
