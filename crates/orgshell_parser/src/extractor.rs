//! Value extraction.
//!
//! Pairs keys with the values that follow them. Attribute words (and
//! unresolved keys) followed by a value produce attribute entries; entity
//! words followed by a value produce `<entity>_name` entries.

use std::collections::{BTreeMap, BTreeSet};

use orgshell_foundation::{AttributeValue, Error, WordKind};

use crate::tokenizer::Token;
use crate::vocabulary::{VocabularyRegistry, Word};

/// Values pulled out of a token sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    /// `<entity>_name` -> value.
    pub entity_values: BTreeMap<String, String>,
    /// Attribute key, as typed -> typed value.
    pub attribute_values: BTreeMap<String, AttributeValue>,
    /// Values kept as raw text because they did not fit their type.
    pub warnings: Vec<String>,
    /// Indices of value tokens paired with a key.
    pub consumed: BTreeSet<usize>,
}

/// Extracts attribute and entity values from recognized tokens.
pub struct ValueExtractor;

impl ValueExtractor {
    /// Extracts values.
    ///
    /// Keys are stored as typed, so `curr=EUR` and `currency=USD` are two
    /// entries. Later pairs for the same key text replace earlier ones. A
    /// value that does not fit its attribute's type is kept as text and
    /// noted in `warnings`. When no entity
    /// word is present, the first unpaired value that looks like a name is
    /// stored under `<fallback_entity>_name`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a token refers to a word the vocabulary
    /// does not hold.
    pub fn extract(
        tokens: &[Token],
        vocab: &VocabularyRegistry,
        fallback_entity: &str,
    ) -> Result<Extraction, Error> {
        let mut out = Extraction::default();
        let mut has_entity = false;

        for (i, token) in tokens.iter().enumerate() {
            let word = match token.word {
                Some(r) => Some(vocab.word(r).ok_or_else(|| {
                    Error::internal(format!("token '{}' refers to unknown word", token.text))
                })?),
                None => None,
            };
            if word.is_some_and(|w| w.kind() == WordKind::Entity) {
                has_entity = true;
            }

            let Some(value) = tokens.get(i + 1).filter(|t| t.is_value()) else {
                continue;
            };
            match word {
                Some(Word::Attribute(attr)) => {
                    let key = token.text.clone();
                    let typed = match AttributeValue::coerce(&value.text, &attr.value_type) {
                        Ok(v) => v,
                        Err(e) => {
                            out.warnings.push(format!("Invalid value for '{key}': {e}"));
                            AttributeValue::text(value.text.clone())
                        }
                    };
                    out.attribute_values.insert(key, typed);
                    out.consumed.insert(i + 1);
                }
                Some(Word::Entity(entity)) => {
                    out.entity_values
                        .insert(format!("{}_name", entity.meta.id), value.text.clone());
                    out.consumed.insert(i + 1);
                }
                None if token.is_unknown() => {
                    out.attribute_values
                        .insert(token.text.clone(), AttributeValue::text(value.text.clone()));
                    out.consumed.insert(i + 1);
                }
                _ => {}
            }
        }

        if !has_entity {
            let name = tokens.iter().enumerate().find(|(i, t)| {
                t.is_value() && !out.consumed.contains(i) && looks_like_name(t, vocab)
            });
            if let Some((_, token)) = name {
                out.entity_values
                    .insert(format!("{fallback_entity}_name"), token.text.clone());
            }
        }

        Ok(out)
    }
}

/// Quoted text, separators, mixed case, or all-caps longer than three
/// characters that is not an enumerated value.
fn looks_like_name(token: &Token, vocab: &VocabularyRegistry) -> bool {
    let text = token.text.as_str();
    if vocab.is_known_value(text) {
        return false;
    }
    let has_upper = text.chars().any(char::is_uppercase);
    let has_lower = text.chars().any(char::is_lowercase);
    token.quoted
        || text.contains('-')
        || text.contains('_')
        || (has_upper && has_lower)
        || (has_upper && text.chars().count() > 3)
}
