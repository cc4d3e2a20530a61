use colored::Colorize;

use crate::core::{encode, FlagSet};
use crate::features::reconcile::QueueItem;
use crate::features::script::{ReplayRecord, ReplayReport};

fn letters_or_dash(flags: &FlagSet) -> String {
    let letters = encode(flags);
    if letters.is_empty() {
        "-".to_string()
    } else {
        letters
    }
}

fn format_item_line(position: Option<usize>, item: &QueueItem) -> String {
    let marker = position.map_or_else(|| "  -".to_string(), |p| format!("{p:>3}"));
    let state = match item {
        QueueItem::Confirmed(_) => "[confirmed]".green(),
        QueueItem::Pending(entry) if entry.dispatched => "[sent]     ".yellow(),
        QueueItem::Pending(_) => "[pending]  ".white(),
    };

    let mut line = format!(
        "{marker} {state} {}  {}",
        item.command().bold(),
        letters_or_dash(item.flags()).cyan()
    );

    let mut notes = Vec::new();
    if let QueueItem::Confirmed(entry) = item {
        if entry.locally_controlled {
            notes.push("local");
        }
        if entry.repeat {
            notes.push("repeat");
        }
    }
    if let QueueItem::Pending(entry) = item {
        if entry.repeat {
            notes.push("repeat");
        }
    }
    if item.consumes_balance() {
        notes.push("balance");
    }
    if !notes.is_empty() {
        line.push_str(&format!("  {}", notes.join(" ").dimmed()));
    }
    line
}

/// Format a queue snapshot as a numbered list.
///
/// Confirmed entries carry their 1-based server position; pending entries
/// are listed after them with a dash.
pub fn format_queue_pretty(items: &[QueueItem]) -> String {
    if items.is_empty() {
        return "Queue (0 items)\n  Empty".to_string();
    }

    let mut output = format!("Queue ({} items)\n", items.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    let mut position = 0;
    for item in items {
        let shown = if item.is_confirmed() {
            position += 1;
            Some(position)
        } else {
            None
        };
        output.push_str(&format_item_line(shown, item));
        output.push('\n');
    }

    output
}

/// Format a decoded flag set, one flag per line.
pub fn format_flags_pretty(spec: &str, flags: &FlagSet) -> String {
    let mut output = format!("{} → {}\n", spec.bold(), letters_or_dash(flags).cyan());
    if flags.is_empty() {
        output.push_str(&format!("  {}", "no conditions".dimmed()));
        return output;
    }
    for (flag, value) in flags.asserted() {
        let value = if value { "yes".green() } else { "no".red() };
        output.push_str(&format!("  {:<20} {value}\n", flag.name()));
    }
    output
}

/// Format alias words as a two-column table.
pub fn format_aliases_pretty(aliases: &[(String, String)]) -> String {
    let mut output = format!("Aliases ({})\n", aliases.len());
    output.push_str(&"─".repeat(30));
    output.push('\n');
    for (alias, letters) in aliases {
        output.push_str(&format!("  {:<14} {}\n", alias.bold(), letters.cyan()));
    }
    output
}

/// Format the outcome of a replay.
pub fn format_replay_pretty(report: &ReplayReport) -> String {
    let mut output = String::new();

    for record in &report.records {
        match record {
            ReplayRecord::Sent { line, command } => {
                output.push_str(&format!(
                    "{} {} {command}\n",
                    format!("{line:>4}").dimmed(),
                    "→".green()
                ));
            },
            ReplayRecord::Undo {
                line,
                command,
                found,
            } => {
                let result = if *found {
                    "undone".green()
                } else {
                    "not queued".red()
                };
                output.push_str(&format!(
                    "{} undo {command}: {result}\n",
                    format!("{line:>4}").dimmed()
                ));
            },
            ReplayRecord::Snapshot { line, queue } => {
                output.push_str(&format!("{} {}\n", format!("{line:>4}").dimmed(), "show".bold()));
                output.push_str(&format_queue_pretty(queue));
                output.push('\n');
            },
        }
    }

    output.push_str(&format!(
        "{} events replayed, {} commands sent\n\n",
        report.events,
        report.sent().len()
    ));
    output.push_str(&format_queue_pretty(&report.queue));
    output
}
