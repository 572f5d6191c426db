//! Type descriptors for attribute values.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The type an attribute word expects its value to have.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueType {
    /// Any text.
    Text,
    /// A signed integer.
    Integer,
    /// A finite decimal number.
    Decimal,
    /// `true`/`false` and common spellings.
    Bool,
    /// A calendar date.
    Date,
    /// A month of the year, by number or name.
    Month,
    /// One of a closed set of options, matched case-insensitively.
    Choice(Vec<String>),
}

impl ValueType {
    /// Creates a choice type from a list of options.
    #[must_use]
    pub fn choice<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValueType::Choice(options.into_iter().map(Into::into).collect())
    }

    /// Returns the options of a choice type, or an empty slice.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match self {
            ValueType::Choice(options) => options,
            _ => &[],
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Text => write!(f, "text"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Decimal => write!(f, "decimal"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Date => write!(f, "date (YYYY-MM-DD)"),
            ValueType::Month => write!(f, "month (1-12 or name)"),
            ValueType::Choice(options) => write!(f, "one of {}", options.join(", ")),
        }
    }
}
