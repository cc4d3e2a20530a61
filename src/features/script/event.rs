//! Event script parsing.
//!
//! One event per line. Blank lines and lines starting with `#` are skipped.
//! Arguments are split on whitespace; wrap a command containing spaces in
//! double quotes.
//!
//! ```text
//! track "touch tree" b
//! do kick eb --repeat
//! run kick eb
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::QueueError;
use crate::features::reconcile::QueueEngine;
use crate::transport::CommandSink;

// A double-quoted argument or a run of non-space characters
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]*)"|(\S+)"#).unwrap_or_else(|e| panic!("Invalid token regex: {e}"))
});

/// A single notification or request from a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Track { command: String, spec: String },
    TrackFirst { command: String, spec: String },
    TrackAt { position: usize, command: String, spec: String },
    TrackReplace { position: usize, command: String, spec: String },
    TrackRemove { position: usize },
    Clear { spec: String },
    Run { command: String, spec: String },
    Do {
        command: String,
        spec: String,
        consumes_balance: bool,
        repeat: bool,
    },
    Blocked,
    Undo { command: String },
    /// Run a dispatch pass without any other change.
    Dispatch,
    /// Print the current queue.
    Show,
}

/// An event with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub event: Event,
}

impl Event {
    /// Script keyword for this event.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Track { .. } => "track",
            Self::TrackFirst { .. } => "track-first",
            Self::TrackAt { .. } => "track-at",
            Self::TrackReplace { .. } => "track-replace",
            Self::TrackRemove { .. } => "track-remove",
            Self::Clear { .. } => "clear",
            Self::Run { .. } => "run",
            Self::Do { .. } => "do",
            Self::Blocked => "blocked",
            Self::Undo { .. } => "undo",
            Self::Dispatch => "dispatch",
            Self::Show => "show",
        }
    }

    /// Apply the event to `engine`.
    ///
    /// Returns the result of `undo` for undo events, `None` otherwise.
    pub fn apply<S: CommandSink>(&self, engine: &mut QueueEngine<S>) -> Option<bool> {
        match self {
            Self::Track { command, spec } => engine.track(command, spec),
            Self::TrackFirst { command, spec } => engine.track_first(command, spec),
            Self::TrackAt {
                position,
                command,
                spec,
            } => engine.track_at(*position, command, spec),
            Self::TrackReplace {
                position,
                command,
                spec,
            } => engine.track_replace(*position, command, spec),
            Self::TrackRemove { position } => engine.track_remove(*position),
            Self::Clear { spec } => engine.clear(spec),
            Self::Run { command, spec } => engine.run(command, spec),
            Self::Do {
                command,
                spec,
                consumes_balance,
                repeat,
            } => {
                let flags = engine.codec().decode(spec);
                engine.do_action(command, flags, *consumes_balance, *repeat);
            },
            Self::Blocked => engine.blocked(),
            Self::Undo { command } => return Some(engine.undo(command)),
            Self::Dispatch => {
                engine.dispatch();
            },
            Self::Show => {},
        }
        None
    }
}

fn tokenize(line: &str) -> Vec<String> {
    TOKEN_PATTERN
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn position(line: usize, raw: &str) -> Result<usize, QueueError> {
    raw.parse()
        .map_err(|_| QueueError::script(line, format!("'{raw}' is not a queue position")))
}

/// Parse one script line. Returns `None` for blank lines and comments.
///
/// # Errors
///
/// Returns `QueueError::Script` for unknown keywords and wrong arguments.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Event>, QueueError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens = tokenize(trimmed);
    let Some((keyword, args)) = tokens.split_first() else {
        return Ok(None);
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let event = match (keyword.as_str(), args.as_slice()) {
        ("track", [command, spec]) => Event::Track {
            command: (*command).to_string(),
            spec: (*spec).to_string(),
        },
        ("track-first", [command, spec]) => Event::TrackFirst {
            command: (*command).to_string(),
            spec: (*spec).to_string(),
        },
        ("track-at", [pos, command, spec]) => Event::TrackAt {
            position: position(line, pos)?,
            command: (*command).to_string(),
            spec: (*spec).to_string(),
        },
        ("track-replace", [pos, command, spec]) => Event::TrackReplace {
            position: position(line, pos)?,
            command: (*command).to_string(),
            spec: (*spec).to_string(),
        },
        ("track-remove", [pos]) => Event::TrackRemove {
            position: position(line, pos)?,
        },
        ("clear", [spec]) => Event::Clear {
            spec: (*spec).to_string(),
        },
        ("run", [command, spec]) => Event::Run {
            command: (*command).to_string(),
            spec: (*spec).to_string(),
        },
        ("do", [command, spec, options @ ..]) => {
            let mut consumes_balance = true;
            let mut repeat = false;
            for option in options {
                match *option {
                    "--free" => consumes_balance = false,
                    "--repeat" => repeat = true,
                    other => {
                        return Err(QueueError::script(line, format!("unknown option '{other}'")));
                    },
                }
            }
            Event::Do {
                command: (*command).to_string(),
                spec: (*spec).to_string(),
                consumes_balance,
                repeat,
            }
        },
        ("blocked", []) => Event::Blocked,
        ("undo", [command]) => Event::Undo {
            command: (*command).to_string(),
        },
        ("dispatch", []) => Event::Dispatch,
        ("show", []) => Event::Show,
        (
            "track" | "track-first" | "track-at" | "track-replace" | "track-remove" | "clear"
            | "run" | "do" | "blocked" | "undo" | "dispatch" | "show",
            _,
        ) => {
            return Err(QueueError::script(
                line,
                format!("wrong number of arguments for '{keyword}'"),
            ));
        },
        (other, _) => {
            return Err(QueueError::script(line, format!("unknown event '{other}'")));
        },
    };
    Ok(Some(event))
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns the first line that fails to parse.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, QueueError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if let Some(event) = parse_line(line, raw)? {
            lines.push(ScriptLine { line, event });
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"track "touch tree" b"#),
            vec!["track", "touch tree", "b"]
        );
        assert_eq!(tokenize(r#"undo """#), vec!["undo", ""]);
    }

    #[test]
    fn test_skip_blank_and_comments() {
        assert_eq!(parse_line(1, "   ").unwrap(), None);
        assert_eq!(parse_line(2, "# setup").unwrap(), None);
    }

    #[test]
    fn test_parse_track_at() {
        let event = parse_line(1, "track-at 2 heal b").unwrap().unwrap();
        assert_eq!(
            event,
            Event::TrackAt {
                position: 2,
                command: "heal".to_string(),
                spec: "b".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_do_options() {
        let event = parse_line(1, r#"do "sip health" e --free --repeat"#)
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            Event::Do {
                command: "sip health".to_string(),
                spec: "e".to_string(),
                consumes_balance: false,
                repeat: true,
            }
        );

        let event = parse_line(1, "do kick b").unwrap().unwrap();
        assert!(matches!(
            event,
            Event::Do {
                consumes_balance: true,
                repeat: false,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = parse_line(7, "jump high").unwrap_err();
        assert_eq!(err.to_string(), "Script error on line 7: unknown event 'jump'");

        let err = parse_line(3, "track-remove first").unwrap_err();
        assert!(matches!(err, QueueError::Script { line: 3, .. }));

        let err = parse_line(4, "run kick").unwrap_err();
        assert!(err.to_string().contains("wrong number of arguments for 'run'"));

        let err = parse_line(5, "do kick b --fast").unwrap_err();
        assert!(err.to_string().contains("unknown option '--fast'"));
    }

    #[test]
    fn test_parse_script_numbers_lines() {
        let script = "# opener\ntrack slash b\n\nblocked\nshow\n";
        let lines = parse_script(script).unwrap();

        let numbered: Vec<(usize, &str)> = lines
            .iter()
            .map(|l| (l.line, l.event.keyword()))
            .collect();
        assert_eq!(numbered, vec![(2, "track"), (4, "blocked"), (5, "show")]);
    }
}
