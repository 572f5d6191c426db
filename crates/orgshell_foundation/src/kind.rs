//! Grammatical roles of vocabulary words.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The role a word plays in a command line.
///
/// Variants are declared in precedence order, so the derived `Ord` sorts
/// words into canonical command order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WordKind {
    /// What to do: `create`, `show`, `delete`.
    Action,
    /// Narrows an action or entity: `holding`, `operating`.
    Modifier,
    /// What to do it to: `company`, `brand`.
    Entity,
    /// A `key=value` detail: `currency`, `name`.
    Attribute,
}

impl WordKind {
    /// All kinds, in precedence order.
    pub const ALL: [WordKind; 4] = [
        WordKind::Action,
        WordKind::Modifier,
        WordKind::Entity,
        WordKind::Attribute,
    ];

    /// Human-readable canonical ordering, used in composition messages.
    pub const EXPECTED_ORDER: &'static str = "ACTION → MODIFIER → ENTITY → ATTRIBUTES";

    /// Returns the fixed precedence (1 = first).
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            WordKind::Action => 1,
            WordKind::Modifier => 2,
            WordKind::Entity => 3,
            WordKind::Attribute => 4,
        }
    }

    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            WordKind::Action => "action",
            WordKind::Modifier => "modifier",
            WordKind::Entity => "entity",
            WordKind::Attribute => "attribute",
        }
    }
}

impl fmt::Display for WordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
