//! Typed attribute values.
//!
//! Raw `key=value` text is coerced into an [`AttributeValue`] using the
//! attribute word's [`ValueType`]. `Display` renders the canonical text.

use std::fmt;

use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CoercionError;
use crate::types::ValueType;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// A value attached to an attribute.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum AttributeValue {
    /// Free text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Finite decimal.
    Decimal(f64),
    /// Boolean.
    Bool(bool),
    /// Calendar date.
    Date(NaiveDate),
    /// Month of the year, 1-12.
    Month(u8),
    /// One of a closed set of options, in its declared spelling.
    Choice(String),
}

impl AttributeValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        AttributeValue::Text(s.into())
    }

    /// Coerces raw text into a value of the given type.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] when the text is not a valid value of `ty`.
    pub fn coerce(raw: &str, ty: &ValueType) -> Result<Self, CoercionError> {
        let trimmed = raw.trim();
        let fail = || CoercionError::new(raw, ty);
        match ty {
            ValueType::Text => Ok(AttributeValue::Text(raw.to_string())),
            ValueType::Integer => trimmed
                .replace('_', "")
                .parse::<i64>()
                .map(AttributeValue::Integer)
                .map_err(|_| fail()),
            ValueType::Decimal => match trimmed.replace('_', "").parse::<f64>() {
                Ok(d) if d.is_finite() => Ok(AttributeValue::Decimal(d)),
                _ => Err(fail()),
            },
            ValueType::Bool => match trimmed.to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Ok(AttributeValue::Bool(true)),
                "false" | "no" | "n" | "0" | "off" => Ok(AttributeValue::Bool(false)),
                _ => Err(fail()),
            },
            ValueType::Date => DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .map(AttributeValue::Date)
                .ok_or_else(fail),
            ValueType::Month => parse_month(trimmed)
                .map(AttributeValue::Month)
                .ok_or_else(fail),
            ValueType::Choice(options) => options
                .iter()
                .find(|opt| opt.eq_ignore_ascii_case(trimmed))
                .map(|opt| AttributeValue::Choice(opt.clone()))
                .ok_or_else(fail),
        }
    }

    /// Returns the name of this value's type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Text(_) => "text",
            AttributeValue::Integer(_) => "integer",
            AttributeValue::Decimal(_) => "decimal",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Date(_) => "date",
            AttributeValue::Month(_) => "month",
            AttributeValue::Choice(_) => "choice",
        }
    }

    /// Returns the text content of a `Text` or `Choice` value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) | AttributeValue::Choice(s) => Some(s),
            _ => None,
        }
    }
}

fn parse_month(s: &str) -> Option<u8> {
    if let Ok(n) = s.parse::<u8>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let lower = s.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.starts_with(&lower))
        .and_then(|i| u8::try_from(i + 1).ok())
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) | AttributeValue::Choice(s) => f.write_str(s),
            AttributeValue::Integer(n) => write!(f, "{n}"),
            AttributeValue::Decimal(d) => write!(f, "{d}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            AttributeValue::Month(m) => write!(f, "{m}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}
