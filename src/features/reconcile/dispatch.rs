//! Dispatch of pending entries to the server.
//!
//! Only a limited number of entries fit in the server queue, and only one
//! balance-consuming action may be outstanding, so pending entries are sent
//! front to back until either limit is hit.

use tracing::{debug, trace, warn};

use super::engine::QueueEngine;
use crate::core::{encode, FlagSet};
use crate::transport::CommandSink;

/// `queue add <letters> <command>`
#[must_use]
pub fn add_command(flags: &FlagSet, command: &str) -> String {
    format!("queue add {} {}", encode(flags), command)
}

/// `queue remove <position>`, position 1-based.
#[must_use]
pub fn remove_command(position: usize) -> String {
    format!("queue remove {position}")
}

impl<S: CommandSink> QueueEngine<S> {
    /// Send whatever pending entries may go out now.
    ///
    /// Nothing is sent while a confirmed entry holds balance. Otherwise
    /// entries are walked from the front while the confirmed queue plus the
    /// entries walked so far stay under capacity. The walk stops after the
    /// first balance-consuming entry, whether it was sent now or earlier.
    ///
    /// Returns the number of commands sent.
    pub fn dispatch(&mut self) -> usize {
        if self.is_balance_busy() {
            trace!("balance busy, holding pending entries");
            return 0;
        }

        let mut sent = 0;
        let mut walked = 0;
        while self.confirmed.len() + walked < self.capacity && walked < self.pending.len() {
            let entry = &mut self.pending[walked];
            walked += 1;

            if !entry.dispatched {
                let outbound = add_command(&entry.flags, &entry.command);
                if let Err(e) = self.sink.send_command(&outbound) {
                    warn!(command = %entry.command, error = %e, "failed to dispatch entry");
                    break;
                }
                debug!(command = %entry.command, "dispatched entry");
                entry.dispatched = true;
                sent += 1;
            }

            if entry.consumes_balance {
                break;
            }
        }
        sent
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::core::decode;
    use crate::error::QueueError;
    use crate::features::reconcile::PendingEntry;
    use crate::transport::{MockCommandSink, RecordingSink};

    #[test]
    fn test_command_formats() {
        assert_eq!(add_command(&decode("free"), "slash"), "queue add eb!p!w!t slash");
        assert_eq!(add_command(&FlagSet::new(), "slash"), "queue add  slash");
        assert_eq!(remove_command(3), "queue remove 3");
    }

    #[test]
    fn test_balance_entry_stops_the_pass() {
        let mut sink = MockCommandSink::new();
        sink.expect_send_command()
            .withf(|command| command == "queue add b kick")
            .times(1)
            .returning(|_| Ok(()));

        let mut engine = QueueEngine::new(sink);
        engine.do_action("kick", decode("b"), true, false);
        engine.do_action("punch", decode("b"), true, false);

        assert!(engine.pending()[0].dispatched);
        assert!(!engine.pending()[1].dispatched);
    }

    #[test]
    fn test_free_entries_flow_until_balance_entry() {
        let mut seq = Sequence::new();
        let mut sink = MockCommandSink::new();
        for expected in ["queue add e sip health", "queue add e eat herb", "queue add b kick"] {
            sink.expect_send_command()
                .withf(move |command| command == expected)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }

        let mut engine = QueueEngine::new(sink);
        engine.pending.push(PendingEntry::new("sip health", decode("e"), false, false));
        engine.pending.push(PendingEntry::new("eat herb", decode("e"), false, false));
        engine.pending.push(PendingEntry::new("kick", decode("b"), true, false));
        engine.pending.push(PendingEntry::new("punch", decode("b"), true, false));

        assert_eq!(engine.dispatch(), 3);
        assert!(!engine.pending()[3].dispatched);
    }

    #[test]
    fn test_balance_busy_holds_everything() {
        let mut engine = QueueEngine::new(RecordingSink::new());
        engine.track("slash", "b");
        engine.do_action("sip health", decode("e"), false, false);

        assert_eq!(engine.dispatch(), 0);
        assert!(engine.sink().sent().is_empty());
    }

    #[test]
    fn test_capacity_counts_confirmed_entries() {
        let mut engine = QueueEngine::new(RecordingSink::new()).with_capacity(3);
        engine.do_action("a", decode("e"), false, false);
        engine.track("a", "e");
        engine.do_action("b", decode("e"), false, false);
        engine.track("b", "e");
        // two confirmed, non-balance: room for one more
        engine.do_action("c", decode("e"), false, false);
        engine.do_action("d", decode("e"), false, false);

        let dispatched: Vec<bool> = engine.pending().iter().map(|e| e.dispatched).collect();
        assert_eq!(dispatched, [true, false]);
    }

    #[test]
    fn test_default_capacity_is_six() {
        let mut engine = QueueEngine::new(RecordingSink::new());
        for name in ["a", "b", "c", "d", "e", "f", "g"] {
            engine.do_action(name, decode("e"), false, false);
        }
        assert_eq!(engine.sink().sent().len(), 6);
        assert!(!engine.pending()[6].dispatched);
    }

    #[test]
    fn test_already_dispatched_balance_entry_still_stops_pass() {
        let mut engine = QueueEngine::new(RecordingSink::new());
        engine.do_action("kick", decode("b"), true, false);
        engine.do_action("sip health", decode("e"), false, false);

        assert_eq!(engine.sink().sent(), ["queue add b kick"]);
        assert_eq!(engine.dispatch(), 0);
    }

    #[test]
    fn test_failed_send_leaves_entry_undispatched() {
        let mut sink = MockCommandSink::new();
        sink.expect_send_command()
            .times(1)
            .returning(|_| Err(QueueError::Transport("closed".to_string())));

        let mut engine = QueueEngine::new(sink);
        engine.do_action("kick", decode("b"), false, false);

        assert!(!engine.pending()[0].dispatched);
    }
}
