//! String similarity for fuzzy word recognition.

/// Scores how alike two strings are.
///
/// Scores range from 0 (nothing in common) to 100 (identical). The
/// recognizer lowercases both sides before asking.
pub trait WordMatcher: Send + Sync {
    /// Returns the similarity of `a` and `b`, 0-100.
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Normalized Levenshtein similarity.
#[derive(Clone, Copy, Debug, Default)]
pub struct LevenshteinMatcher;

impl WordMatcher for LevenshteinMatcher {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b) * 100.0
    }
}

/// Jaro-Winkler similarity, which favours shared prefixes.
#[derive(Clone, Copy, Debug, Default)]
pub struct JaroWinklerMatcher;

impl WordMatcher for JaroWinklerMatcher {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b) * 100.0
    }
}
