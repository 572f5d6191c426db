//! Business entities managed by the shell.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The closed set of entity kinds an Entity word can denote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntityKind {
    /// A legal organization.
    Company,
    /// Brand identity of a company.
    Brand,
    /// Free-form key/value metadata.
    Metadata,
    /// A product or service.
    Offering,
    /// A target audience or segment.
    Target,
    /// Company values and principles.
    Values,
}

impl EntityKind {
    /// All entity kinds.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Company,
        EntityKind::Brand,
        EntityKind::Metadata,
        EntityKind::Offering,
        EntityKind::Target,
        EntityKind::Values,
    ];

    /// Returns the lowercase name of this entity kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Company => "company",
            EntityKind::Brand => "brand",
            EntityKind::Metadata => "metadata",
            EntityKind::Offering => "offering",
            EntityKind::Target => "target",
            EntityKind::Values => "values",
        }
    }

    /// Parses a lowercase entity name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
