//! Queue-type flags.
//!
//! A queue type is a set of named conditions the server checks before it
//! runs a queued action. Each condition is either asserted (`true`/`false`)
//! or left out, meaning "don't care".

use serde::{Deserialize, Serialize};

/// A single queue-type condition.
///
/// The declaration order is the canonical order used when encoding a
/// [`FlagSet`] back into letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Equilibrium ("eq") is available.
    HasEquipment,
    /// Balance is available.
    HasBalance,
    /// Class-specific balance is available.
    HasClassBalance,
    /// Ship balance is available.
    HasShipBalance,
    /// Paralysed.
    HasParalysis,
    /// Bound (webbed, entangled, ...).
    IsBound,
    /// Standing up.
    IsStanding,
    /// Stunned.
    IsStunned,
}

impl Flag {
    /// All flags in canonical order.
    pub const ALL: [Self; 8] = [
        Self::HasEquipment,
        Self::HasBalance,
        Self::HasClassBalance,
        Self::HasShipBalance,
        Self::HasParalysis,
        Self::IsBound,
        Self::IsStanding,
        Self::IsStunned,
    ];

    /// The queue-type letter for this flag.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::HasEquipment => 'e',
            Self::HasBalance => 'b',
            Self::HasClassBalance => 'c',
            Self::HasShipBalance => 's',
            Self::HasParalysis => 'p',
            Self::IsBound => 'w',
            Self::IsStanding => 'u',
            Self::IsStunned => 't',
        }
    }

    /// Human readable name, e.g. `has-balance`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HasEquipment => "has-equipment",
            Self::HasBalance => "has-balance",
            Self::HasClassBalance => "has-class-balance",
            Self::HasShipBalance => "has-ship-balance",
            Self::HasParalysis => "has-paralysis",
            Self::IsBound => "is-bound",
            Self::IsStanding => "is-standing",
            Self::IsStunned => "is-stunned",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The conditions attached to a queued action.
///
/// Equality is exact: two sets are equal only when they assert the same
/// flags with the same values. An absent flag never equals an asserted one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_equipment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_balance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_class_balance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_ship_balance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_paralysis: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bound: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_standing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_stunned: Option<bool>,
}

impl FlagSet {
    /// An empty set: every flag is "don't care".
    #[must_use]
    pub const fn new() -> Self {
        Self {
            has_equipment: None,
            has_balance: None,
            has_class_balance: None,
            has_ship_balance: None,
            has_paralysis: None,
            is_bound: None,
            is_standing: None,
            is_stunned: None,
        }
    }

    /// Builder-style assertion of a flag.
    #[must_use]
    pub fn with(mut self, flag: Flag, value: bool) -> Self {
        *self.slot_mut(flag) = Some(value);
        self
    }

    /// The asserted value of `flag`, if any.
    #[must_use]
    pub const fn get(&self, flag: Flag) -> Option<bool> {
        match flag {
            Flag::HasEquipment => self.has_equipment,
            Flag::HasBalance => self.has_balance,
            Flag::HasClassBalance => self.has_class_balance,
            Flag::HasShipBalance => self.has_ship_balance,
            Flag::HasParalysis => self.has_paralysis,
            Flag::IsBound => self.is_bound,
            Flag::IsStanding => self.is_standing,
            Flag::IsStunned => self.is_stunned,
        }
    }

    /// Assert `flag` as `value`, or clear it with `None`.
    pub fn set(&mut self, flag: Flag, value: Option<bool>) {
        *self.slot_mut(flag) = value;
    }

    /// Number of asserted flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.asserted().count()
    }

    /// True when no flag is asserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asserted().next().is_none()
    }

    /// Asserted flags with their values, in canonical order.
    pub fn asserted(&self) -> impl Iterator<Item = (Flag, bool)> + '_ {
        Flag::ALL
            .into_iter()
            .filter_map(|flag| self.get(flag).map(|value| (flag, value)))
    }

    fn slot_mut(&mut self, flag: Flag) -> &mut Option<bool> {
        match flag {
            Flag::HasEquipment => &mut self.has_equipment,
            Flag::HasBalance => &mut self.has_balance,
            Flag::HasClassBalance => &mut self.has_class_balance,
            Flag::HasShipBalance => &mut self.has_ship_balance,
            Flag::HasParalysis => &mut self.has_paralysis,
            Flag::IsBound => &mut self.is_bound,
            Flag::IsStanding => &mut self.is_standing,
            Flag::IsStunned => &mut self.is_stunned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_unique() {
        let mut letters: Vec<char> = Flag::ALL.iter().map(|flag| flag.letter()).collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters.len(), Flag::ALL.len());
    }

    #[test]
    fn test_equality_requires_same_asserted_keys() {
        let balance = FlagSet::new().with(Flag::HasBalance, true);
        let balance_and_eq = balance.with(Flag::HasEquipment, true);
        let not_balance = FlagSet::new().with(Flag::HasBalance, false);

        assert_eq!(balance, FlagSet::new().with(Flag::HasBalance, true));
        assert_ne!(balance, balance_and_eq);
        assert_ne!(balance, not_balance);
        assert_ne!(FlagSet::new(), not_balance);
    }

    #[test]
    fn test_asserted_in_canonical_order() {
        let flags = FlagSet::new()
            .with(Flag::IsStunned, false)
            .with(Flag::HasEquipment, true);

        let asserted: Vec<_> = flags.asserted().collect();
        assert_eq!(
            asserted,
            vec![(Flag::HasEquipment, true), (Flag::IsStunned, false)]
        );
        assert_eq!(flags.len(), 2);
        assert!(!flags.is_empty());
    }

    #[test]
    fn test_set_clears_with_none() {
        let mut flags = FlagSet::new().with(Flag::IsBound, true);
        flags.set(Flag::IsBound, None);
        assert!(flags.is_empty());
    }

    #[test]
    fn test_json_skips_absent_flags() {
        let flags = FlagSet::new().with(Flag::HasBalance, true);
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"{"has_balance":true}"#);

        let back: FlagSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }
}
