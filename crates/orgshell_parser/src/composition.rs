//! Keyword ordering rules.
//!
//! Commands read ACTION → MODIFIER → ENTITY, with attributes allowed after
//! any of those. Words of equal precedence may repeat.

use std::collections::BTreeSet;

use orgshell_foundation::{CompositionError, WordKind};

use crate::vocabulary::Word;

/// Validates and canonicalizes word order.
pub struct CompositionRules;

impl CompositionRules {
    /// Checks a recognized word sequence.
    ///
    /// # Errors
    ///
    /// - [`CompositionError::Empty`] for an empty sequence
    /// - [`CompositionError::AttributeFirst`] when an attribute leads a
    ///   sequence that also holds other kinds
    /// - [`CompositionError::OutOfOrder`] when a non-attribute word follows
    ///   one of higher precedence
    pub fn validate(words: &[&Word]) -> Result<(), CompositionError> {
        let Some(first) = words.first() else {
            return Err(CompositionError::Empty);
        };

        let has_structure = words.iter().any(|w| w.kind() != WordKind::Attribute);
        if first.kind() == WordKind::Attribute && has_structure {
            return Err(CompositionError::AttributeFirst {
                word: first.id().to_string(),
            });
        }

        let mut highest = 0;
        for word in words.iter().filter(|w| w.kind() != WordKind::Attribute) {
            let precedence = word.kind().precedence();
            if precedence < highest {
                return Err(CompositionError::OutOfOrder {
                    word: word.id().to_string(),
                    kind: word.kind(),
                });
            }
            highest = precedence;
        }
        Ok(())
    }

    /// Whether a sequence passes [`CompositionRules::validate`].
    #[must_use]
    pub fn is_valid(words: &[&Word]) -> bool {
        Self::validate(words).is_ok()
    }

    /// Sorts words by precedence, keeping the relative order of equals.
    #[must_use]
    pub fn canonical_sort<'a>(words: &[&'a Word]) -> Vec<&'a Word> {
        let mut sorted = words.to_vec();
        sorted.sort_by_key(|w| w.kind().precedence());
        sorted
    }

    /// Kinds worth offering after the sequence, for interactive completion.
    ///
    /// Only kinds that come strictly later than the last structural word
    /// are offered, plus attributes. A sequence made only of attributes
    /// continues with attributes.
    #[must_use]
    pub fn next_valid_types(words: &[&Word]) -> BTreeSet<WordKind> {
        Self::next_valid_kinds(words.iter().map(|w| w.kind()))
    }

    /// [`CompositionRules::next_valid_types`] over bare kinds.
    #[must_use]
    pub fn next_valid_kinds(kinds: impl IntoIterator<Item = WordKind>) -> BTreeSet<WordKind> {
        let mut seen = false;
        let highest = kinds
            .into_iter()
            .inspect(|_| seen = true)
            .filter(|k| *k != WordKind::Attribute)
            .map(WordKind::precedence)
            .max();
        match highest {
            None if !seen => WordKind::ALL.into_iter().collect(),
            None => BTreeSet::from([WordKind::Attribute]),
            Some(highest) => WordKind::ALL
                .into_iter()
                .filter(|k| *k == WordKind::Attribute || k.precedence() > highest)
                .collect(),
        }
    }

    /// The ordering rules, for help output.
    #[must_use]
    pub fn order_hint() -> &'static str {
        "Words are read in the order ACTION → MODIFIER → ENTITY → ATTRIBUTES.\n\
         Attributes (key=value) may follow any word but may not lead a command.\n\
         Words of the same kind may repeat."
    }
}
