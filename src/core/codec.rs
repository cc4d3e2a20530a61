//! Queue-type letter codec.
//!
//! Converts between the compact letter form the server understands
//! (`be!p!t!w`) and a [`FlagSet`]. Both directions walk [`Flag::ALL`], so a
//! letter can never mean one thing when decoding and another when encoding.

use std::collections::BTreeMap;

use tracing::trace;

use super::flags::{Flag, FlagSet};

/// Marker that negates the letter directly after it.
pub const NEGATION: char = '!';

/// Built-in alias words and the letters they expand to.
pub const BUILTIN_ALIASES: [(&str, &str); 9] = [
    ("equilibrium", "e"),
    ("balance", "b"),
    ("class", "c"),
    ("paralysis", "!p"),
    ("unbound", "!w"),
    ("stun", "!t"),
    ("free", "be!p!t!w"),
    ("freestand", "be!p!tu!w"),
    ("full", "be!p!tuc!w"),
];

/// Expand `spec` through the built-in alias table.
///
/// Returns `spec` unchanged when it is not an alias.
#[must_use]
pub fn expand_builtin(spec: &str) -> &str {
    BUILTIN_ALIASES
        .iter()
        .find(|&&(alias, _)| alias == spec)
        .map_or(spec, |&(_, letters)| letters)
}

/// Decode a letter sequence into flags.
///
/// Only the first occurrence of each letter counts. It is asserted `false`
/// when the character right before it is `!`, otherwise `true`. Characters
/// that are not flag letters are ignored.
#[must_use]
pub fn decode_letters(letters: &str) -> FlagSet {
    let mut flags = FlagSet::new();
    for flag in Flag::ALL {
        if let Some(index) = letters.find(flag.letter()) {
            let negated = letters[..index].chars().next_back() == Some(NEGATION);
            flags.set(flag, Some(!negated));
        }
    }
    flags
}

/// Encode flags as letters in canonical order, `!` before each `false`.
#[must_use]
pub fn encode(flags: &FlagSet) -> String {
    let mut letters = String::with_capacity(flags.len() * 2);
    for (flag, value) in flags.asserted() {
        if !value {
            letters.push(NEGATION);
        }
        letters.push(flag.letter());
    }
    letters
}

/// Decode a queue spec using only the built-in aliases.
#[must_use]
pub fn decode(spec: &str) -> FlagSet {
    decode_letters(expand_builtin(spec))
}

/// Codec with user-defined aliases layered over the built-in table.
///
/// User aliases are consulted first, so they may shadow a built-in word.
#[derive(Debug, Clone, Default)]
pub struct QueueTypeCodec {
    aliases: BTreeMap<String, String>,
}

impl QueueTypeCodec {
    /// Codec that knows only the built-in aliases.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Codec with extra alias words.
    #[must_use]
    pub const fn with_aliases(aliases: BTreeMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Expand `spec` through user aliases, then the built-in table.
    #[must_use]
    pub fn expand<'a>(&'a self, spec: &'a str) -> &'a str {
        if let Some(letters) = self.aliases.get(spec) {
            trace!(alias = spec, letters = %letters, "expanded user alias");
            return letters;
        }
        expand_builtin(spec)
    }

    /// Decode a queue spec (alias word or letters) into flags.
    #[must_use]
    pub fn decode(&self, spec: &str) -> FlagSet {
        decode_letters(self.expand(spec))
    }

    /// Every alias this codec knows, user aliases first.
    ///
    /// Built-ins shadowed by a user alias are left out.
    #[must_use]
    pub fn aliases(&self) -> Vec<(String, String)> {
        let user = self
            .aliases
            .iter()
            .map(|(alias, letters)| (alias.clone(), letters.clone()));
        let builtin = BUILTIN_ALIASES
            .iter()
            .filter(|(alias, _)| !self.aliases.contains_key(*alias))
            .map(|(alias, letters)| ((*alias).to_string(), (*letters).to_string()));
        user.chain(builtin).collect()
    }
}
