//! Entry types for the confirmed and pending queues.

use serde::{Deserialize, Serialize};

use crate::core::FlagSet;

/// An action the engine believes is sitting in the server's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedEntry {
    /// Command text as the server reported it.
    pub command: String,
    /// Queue-type conditions.
    pub flags: FlagSet,
    /// Whether this entry was queued by us and may be removed with `undo`.
    pub locally_controlled: bool,
    /// Queue it again locally once it has run.
    pub repeat: bool,
    /// Running it uses up balance.
    pub consumes_balance: bool,
}

impl ConfirmedEntry {
    /// An entry queued by something other than this engine.
    ///
    /// Its balance use is unknown, so it is assumed to consume balance.
    #[must_use]
    pub fn external(command: impl Into<String>, flags: FlagSet) -> Self {
        Self {
            command: command.into(),
            flags,
            locally_controlled: false,
            repeat: false,
            consumes_balance: true,
        }
    }

    /// Promote a pending entry the server has now confirmed.
    #[must_use]
    pub fn confirmed_from(
        command: impl Into<String>,
        flags: FlagSet,
        local: &PendingEntry,
    ) -> Self {
        Self {
            command: command.into(),
            flags,
            locally_controlled: true,
            repeat: local.repeat,
            consumes_balance: local.consumes_balance,
        }
    }
}

/// A locally requested action the server has not confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEntry {
    /// Command text to queue.
    pub command: String,
    /// Queue-type conditions.
    pub flags: FlagSet,
    /// A `queue add` has been sent and we are waiting to hear back.
    pub dispatched: bool,
    /// Queue it again once it has run.
    pub repeat: bool,
    /// Running it uses up balance.
    pub consumes_balance: bool,
}

impl PendingEntry {
    /// A fresh, undispatched entry.
    #[must_use]
    pub fn new(
        command: impl Into<String>,
        flags: FlagSet,
        consumes_balance: bool,
        repeat: bool,
    ) -> Self {
        Self {
            command: command.into(),
            flags,
            dispatched: false,
            repeat,
            consumes_balance,
        }
    }

    /// The follow-up entry for a repeating action that has just run.
    #[must_use]
    pub fn repeat_of(entry: &ConfirmedEntry) -> Self {
        Self::new(entry.command.clone(), entry.flags, entry.consumes_balance, true)
    }
}

/// One row of a queue snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueueItem {
    /// Present in the server queue.
    Confirmed(ConfirmedEntry),
    /// Waiting locally.
    Pending(PendingEntry),
}

impl QueueItem {
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Confirmed(entry) => &entry.command,
            Self::Pending(entry) => &entry.command,
        }
    }

    #[must_use]
    pub const fn flags(&self) -> &FlagSet {
        match self {
            Self::Confirmed(entry) => &entry.flags,
            Self::Pending(entry) => &entry.flags,
        }
    }

    #[must_use]
    pub const fn consumes_balance(&self) -> bool {
        match self {
            Self::Confirmed(entry) => entry.consumes_balance,
            Self::Pending(entry) => entry.consumes_balance,
        }
    }

    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

/// Case-insensitive command comparison used for every match.
#[must_use]
pub fn same_command(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Flag;

    #[test]
    fn test_external_entry_assumes_balance() {
        let entry = ConfirmedEntry::external("slash", FlagSet::new());
        assert!(!entry.locally_controlled);
        assert!(!entry.repeat);
        assert!(entry.consumes_balance);
    }

    #[test]
    fn test_promotion_inherits_local_settings() {
        let flags = FlagSet::new().with(Flag::HasBalance, true);
        let local = PendingEntry::new("touch tree", flags, false, true);
        let entry = ConfirmedEntry::confirmed_from("TOUCH TREE", flags, &local);

        assert_eq!(entry.command, "TOUCH TREE");
        assert!(entry.locally_controlled);
        assert!(entry.repeat);
        assert!(!entry.consumes_balance);
    }

    #[test]
    fn test_same_command_ignores_case() {
        assert!(same_command("Fireball", "fIREBALL"));
        assert!(!same_command("fireball", "fireballs"));
    }

    #[test]
    fn test_item_serializes_with_state_tag() {
        let entry = PendingEntry::new("sip health", FlagSet::new(), false, false);
        let item = QueueItem::Pending(entry);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["state"], "pending");
        assert_eq!(json["command"], "sip health");
        assert_eq!(json["dispatched"], false);
    }
}
