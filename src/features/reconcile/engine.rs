//! The queue reconciliation engine.
//!
//! Keeps two views of the server's action queue in step:
//! - the confirmed queue, rebuilt from the server's queue notifications
//! - the pending queue, actions we want run that the server has not
//!   confirmed yet
//!
//! Every operation runs to completion synchronously. Outbound commands go
//! to a [`CommandSink`] and are never awaited.

use tracing::{debug, warn};

use super::dispatch::remove_command;
use super::entry::{same_command, ConfirmedEntry, PendingEntry, QueueItem};
use crate::core::{FlagSet, QueueTypeCodec};
use crate::transport::CommandSink;

/// Most entries the server will hold at once.
pub const DEFAULT_CAPACITY: usize = 6;

/// Queue-spec token that makes [`QueueEngine::clear`] drop everything.
pub const CLEAR_ALL: &str = "all";

/// Client-side model of the server's action queue.
pub struct QueueEngine<S: CommandSink> {
    pub(super) confirmed: Vec<ConfirmedEntry>,
    pub(super) pending: Vec<PendingEntry>,
    pub(super) codec: QueueTypeCodec,
    pub(super) sink: S,
    pub(super) capacity: usize,
}

impl<S: CommandSink> QueueEngine<S> {
    /// Create an empty engine sending through `sink`.
    #[must_use]
    pub const fn new(sink: S) -> Self {
        Self {
            confirmed: Vec::new(),
            pending: Vec::new(),
            codec: QueueTypeCodec::new(),
            sink,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Use `codec` to decode incoming queue specs.
    #[must_use]
    pub fn with_codec(mut self, codec: QueueTypeCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Override the dispatch budget.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Record an entry the server appended to its queue.
    ///
    /// If we were waiting for exactly this action (same command ignoring
    /// case, same flags) the pending entry is promoted instead of creating
    /// an unrelated one.
    pub fn track(&mut self, command: &str, spec: &str) {
        let flags = self.codec.decode(spec);
        let local = self
            .pending
            .iter()
            .position(|item| same_command(&item.command, command) && item.flags == flags);

        let entry = match local {
            Some(index) => {
                let local = self.pending.remove(index);
                debug!(command, "confirmed local entry");
                ConfirmedEntry::confirmed_from(command, flags, &local)
            },
            None => {
                debug!(command, "tracked external entry");
                ConfirmedEntry::external(command, flags)
            },
        };
        self.confirmed.push(entry);
    }

    /// Record an entry the server put at the front of its queue.
    pub fn track_first(&mut self, command: &str, spec: &str) {
        let flags = self.codec.decode(spec);
        debug!(command, "tracked entry at front");
        self.confirmed.insert(0, ConfirmedEntry::external(command, flags));
    }

    /// Record an entry inserted before the 1-based `position`.
    ///
    /// Positions past the end append. Position 0 names no entry and is
    /// ignored; it never wraps around to the last entry.
    pub fn track_at(&mut self, position: usize, command: &str, spec: &str) {
        let Some(index) = position.checked_sub(1) else {
            debug!(command, "ignoring insert at position 0");
            return;
        };
        let flags = self.codec.decode(spec);
        let index = index.min(self.confirmed.len());
        debug!(command, position, "tracked inserted entry");
        self.confirmed
            .insert(index, ConfirmedEntry::external(command, flags));
    }

    /// Record that the entry at the 1-based `position` was replaced.
    ///
    /// Positions past the end append. Position 0 names no entry and is
    /// ignored; it never wraps around to the last entry.
    pub fn track_replace(&mut self, position: usize, command: &str, spec: &str) {
        let Some(index) = position.checked_sub(1) else {
            debug!(command, "ignoring replace at position 0");
            return;
        };
        let entry = ConfirmedEntry::external(command, self.codec.decode(spec));
        if let Some(slot) = self.confirmed.get_mut(index) {
            debug!(command, position, replaced = %slot.command, "tracked replacement");
            *slot = entry;
        } else {
            debug!(command, position, "replace past end, appending");
            self.confirmed.push(entry);
        }
    }

    /// Record that the entry at the 1-based `position` was removed.
    ///
    /// Out-of-range positions, 0 included, leave the queue unchanged.
    pub fn track_remove(&mut self, position: usize) {
        match position.checked_sub(1) {
            Some(index) if index < self.confirmed.len() => {
                let removed = self.confirmed.remove(index);
                debug!(command = %removed.command, position, "tracked removal");
            },
            _ => debug!(position, "removal out of range"),
        }
    }

    /// Drop confirmed entries.
    ///
    /// `"all"` empties the confirmed queue. Anything else is decoded and
    /// removes every entry whose flags match exactly.
    pub fn clear(&mut self, spec: &str) {
        if spec == CLEAR_ALL {
            debug!(count = self.confirmed.len(), "cleared confirmed queue");
            self.confirmed.clear();
            return;
        }
        let flags = self.codec.decode(spec);
        let before = self.confirmed.len();
        self.confirmed.retain(|entry| entry.flags != flags);
        debug!(spec, count = before - self.confirmed.len(), "cleared queue type");
    }

    /// Snapshot of the confirmed queue followed by the pending queue.
    #[must_use]
    pub fn queue(&self) -> Vec<QueueItem> {
        self.confirmed
            .iter()
            .cloned()
            .map(QueueItem::Confirmed)
            .chain(self.pending.iter().cloned().map(QueueItem::Pending))
            .collect()
    }

    /// The server reported that an entry ran.
    ///
    /// Matches on command and flags first. The reported queue type is not
    /// always the one the entry was queued with, so a second pass matches
    /// on command alone. A repeating entry is queued again locally.
    pub fn run(&mut self, command: &str, spec: &str) {
        let flags = self.codec.decode(spec);
        let found = self
            .take_ran(command, Some(&flags))
            .or_else(|| self.take_ran(command, None));

        match found {
            Some(entry) if entry.repeat => {
                debug!(command, "ran repeating entry, queueing again");
                self.pending.push(PendingEntry::repeat_of(&entry));
            },
            Some(_) => debug!(command, "ran entry"),
            None => debug!(command, "ran entry we were not tracking"),
        }
        self.dispatch();
    }

    fn take_ran(&mut self, command: &str, flags: Option<&FlagSet>) -> Option<ConfirmedEntry> {
        let index = self.confirmed.iter().position(|entry| {
            same_command(&entry.command, command) && flags.map_or(true, |f| entry.flags == *f)
        })?;
        Some(self.confirmed.remove(index))
    }

    /// Ask for `command` to be queued locally, then dispatch.
    pub fn do_action(
        &mut self,
        command: &str,
        flags: FlagSet,
        consumes_balance: bool,
        repeat: bool,
    ) {
        debug!(command, consumes_balance, repeat, "queued local action");
        self.pending
            .push(PendingEntry::new(command, flags, consumes_balance, repeat));
        self.dispatch();
    }

    /// The server refused the command we sent. Release it for a retry on
    /// the next dispatch.
    pub fn blocked(&mut self) {
        if let Some(entry) = self.pending.iter_mut().find(|entry| entry.dispatched) {
            debug!(command = %entry.command, "dispatch blocked, releasing");
            entry.dispatched = false;
        }
    }

    /// Best-effort removal of `command`.
    ///
    /// A locally controlled confirmed entry is removed by asking the server
    /// to drop it; the entry stays until the server reports the removal.
    /// Otherwise the first matching pending entry is dropped. Returns
    /// `false` when neither queue has a match.
    pub fn undo(&mut self, command: &str) -> bool {
        if let Some(index) = self
            .confirmed
            .iter()
            .position(|entry| entry.locally_controlled && same_command(&entry.command, command))
        {
            let outbound = remove_command(index + 1);
            if let Err(e) = self.sink.send_command(&outbound) {
                warn!(command, error = %e, "failed to send queue removal");
            }
            return true;
        }

        if let Some(index) = self
            .pending
            .iter()
            .position(|entry| same_command(&entry.command, command))
        {
            self.pending.remove(index);
            debug!(command, "undid pending entry");
            return true;
        }

        false
    }

    /// Confirmed entries, front first.
    #[must_use]
    pub fn confirmed(&self) -> &[ConfirmedEntry] {
        &self.confirmed
    }

    /// Pending entries in submission order.
    #[must_use]
    pub fn pending(&self) -> &[PendingEntry] {
        &self.pending
    }

    /// Balance is taken while any confirmed entry consumes it.
    #[must_use]
    pub fn is_balance_busy(&self) -> bool {
        self.confirmed.iter().any(|entry| entry.consumes_balance)
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub const fn codec(&self) -> &QueueTypeCodec {
        &self.codec
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Tear down the engine, keeping the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: CommandSink + Default> Default for QueueEngine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
