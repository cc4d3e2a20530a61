//! Replaying a parsed script against an engine.

use serde::Serialize;
use tracing::debug;

use super::event::{Event, ScriptLine};
use crate::features::reconcile::{QueueEngine, QueueItem};
use crate::transport::RecordingSink;

/// Something observable that happened while replaying a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayRecord {
    /// The engine sent a command to the server.
    Sent { line: usize, command: String },
    /// An undo was attempted.
    Undo {
        line: usize,
        command: String,
        found: bool,
    },
    /// The script asked for the queue to be shown.
    Snapshot { line: usize, queue: Vec<QueueItem> },
}

/// Everything a replay produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    /// Number of events applied.
    pub events: usize,
    /// Records in the order they happened.
    pub records: Vec<ReplayRecord>,
    /// Queue after the last event.
    pub queue: Vec<QueueItem>,
}

impl ReplayReport {
    /// All commands that were sent, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|record| match record {
                ReplayRecord::Sent { command, .. } => Some(command.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Apply `lines` in order, recording what the engine sends after each one.
///
/// Commands already sitting in the sink are discarded first.
pub fn replay(engine: &mut QueueEngine<RecordingSink>, lines: &[ScriptLine]) -> ReplayReport {
    let mut report = ReplayReport::default();
    engine.sink_mut().drain();

    for ScriptLine { line, event } in lines {
        debug!(line, event = event.keyword(), "replaying event");
        let undo_result = event.apply(engine);
        report.events += 1;

        for command in engine.sink_mut().drain() {
            report.records.push(ReplayRecord::Sent {
                line: *line,
                command,
            });
        }

        match (event, undo_result) {
            (Event::Undo { command }, Some(found)) => report.records.push(ReplayRecord::Undo {
                line: *line,
                command: command.clone(),
                found,
            }),
            (Event::Show, _) => report.records.push(ReplayRecord::Snapshot {
                line: *line,
                queue: engine.queue(),
            }),
            _ => {},
        }
    }

    report.queue = engine.queue();
    report
}
