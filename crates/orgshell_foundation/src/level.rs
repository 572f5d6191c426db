//! Navigation hierarchy levels.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How deep the shell is in the system → organization → application tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContextLevel {
    /// Top level; no organization selected.
    #[default]
    System = 0,
    /// Inside one organization.
    Organization = 1,
    /// Inside an application of an organization.
    Application = 2,
}

impl ContextLevel {
    /// Returns the numeric depth (0, 1 or 2).
    #[must_use]
    pub const fn depth(self) -> u8 {
        self as u8
    }

    /// Returns the level at the given depth, if any.
    #[must_use]
    pub const fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            0 => Some(ContextLevel::System),
            1 => Some(ContextLevel::Organization),
            2 => Some(ContextLevel::Application),
            _ => None,
        }
    }

    /// Returns the level one step up, or `None` at the system level.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            ContextLevel::System => None,
            ContextLevel::Organization => Some(ContextLevel::System),
            ContextLevel::Application => Some(ContextLevel::Organization),
        }
    }

    /// Returns the short name shown in prompts and messages.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            ContextLevel::System => "sys",
            ContextLevel::Organization => "org",
            ContextLevel::Application => "app",
        }
    }
}

impl fmt::Display for ContextLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
