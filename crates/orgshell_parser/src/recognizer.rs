//! Word recognition.
//!
//! Resolves `Unknown` tokens to vocabulary words, first exactly (id, alias,
//! abbreviation) and then by fuzzy similarity against word ids. Tokens that
//! stay unresolved are classified as values when they look like names.

use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::similarity::WordMatcher;
use crate::tokenizer::{Token, TokenClass};
use crate::vocabulary::{VocabularyRegistry, WordRef};

/// Confidence assigned to exact matches.
pub const EXACT_CONFIDENCE: f64 = 100.0;

/// Resolves tokens against a vocabulary.
pub struct Recognizer<'a> {
    vocab: &'a VocabularyRegistry,
    matcher: &'a dyn WordMatcher,
    config: &'a ParserConfig,
}

impl<'a> Recognizer<'a> {
    /// Creates a recognizer.
    #[must_use]
    pub fn new(
        vocab: &'a VocabularyRegistry,
        matcher: &'a dyn WordMatcher,
        config: &'a ParserConfig,
    ) -> Self {
        Self {
            vocab,
            matcher,
            config,
        }
    }

    /// Recognizes every `Unknown` token in place. Other tokens are untouched.
    pub fn recognize(&self, tokens: &mut [Token]) {
        for token in tokens.iter_mut().filter(|t| t.is_unknown()) {
            self.recognize_token(token);
        }
    }

    /// Recognizes a single token.
    pub fn recognize_token(&self, token: &mut Token) {
        if let Some(word_ref) = self.vocab.lookup(&token.text) {
            trace!(text = %token.text, "exact match");
            resolve(token, word_ref, EXACT_CONFIDENCE);
            return;
        }

        let ranked = if self.never_a_word(&token.text) {
            Vec::new()
        } else {
            self.rank_candidates(&token.text)
        };
        let relaxed = self.config.suggestion_threshold();

        match ranked.first() {
            Some(&(best, score)) if score >= self.config.fuzzy_threshold => {
                debug!(text = %token.text, score, "fuzzy match");
                resolve(token, best, score);
                token.suggestions = self.suggestion_ids(&ranked[1..], relaxed);
            }
            _ => {
                token.suggestions = self.suggestion_ids(&ranked, relaxed);
                token.class = if self.looks_like_value(&token.text) {
                    TokenClass::Value
                } else {
                    TokenClass::Unknown
                };
                trace!(text = %token.text, class = ?token.class, "unresolved");
            }
        }
    }

    /// Scores every word id against the text, best first.
    ///
    /// Equal scores keep registration order.
    #[must_use]
    pub fn rank_candidates(&self, text: &str) -> Vec<(WordRef, f64)> {
        let lower = text.to_lowercase();
        let mut scored: Vec<(WordRef, f64)> = self
            .vocab
            .iter()
            .map(|(r, w)| (r, self.matcher.score(&lower, w.id())))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }

    /// Whether unresolved text should be treated as a value.
    ///
    /// Values are uppercase, contain `_` or `-`, mix cases, are numeric, or
    /// are an enumerated value some attribute accepts.
    #[must_use]
    pub fn looks_like_value(&self, text: &str) -> bool {
        // all-caps and mixed case both contain an uppercase letter
        text.chars().any(char::is_uppercase)
            || text.contains('_')
            || text.contains('-')
            || is_numeric(text)
            || self.vocab.is_known_value(text)
    }

    fn never_a_word(&self, text: &str) -> bool {
        is_numeric(text) || self.vocab.is_known_value(text)
    }

    fn suggestion_ids(&self, ranked: &[(WordRef, f64)], min_score: f64) -> Vec<String> {
        ranked
            .iter()
            .filter(|(_, score)| *score >= min_score)
            .take(self.config.max_suggestions)
            .filter_map(|(r, _)| self.vocab.word(*r))
            .map(|w| w.id().to_string())
            .collect()
    }
}

fn resolve(token: &mut Token, word_ref: WordRef, confidence: f64) {
    token.class = TokenClass::Word;
    token.word = Some(word_ref);
    token.confidence = confidence;
}

/// Digits with optional sign, separators and one decimal point.
pub(crate) fn is_numeric(text: &str) -> bool {
    let digits = text.strip_prefix(&['-', '+'][..]).unwrap_or(text);
    digits.chars().any(|c| c.is_ascii_digit())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '_' || c == ',')
        && digits.matches('.').count() <= 1
}
