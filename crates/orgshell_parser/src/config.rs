//! Parser configuration.

/// Default score a fuzzy match must reach to be accepted.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 80.0;

/// Tunables for the interpretation pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ParserConfig {
    /// Minimum similarity (0-100) for a fuzzy match to be accepted.
    pub fuzzy_threshold: f64,
    /// Fraction of the threshold that a candidate needs to be suggested.
    pub suggestion_ratio: f64,
    /// Maximum number of suggestions per token.
    pub max_suggestions: usize,
    /// Entity id used when a name appears without an entity word.
    pub fallback_entity: String,
    /// Whether to expand first-token shortcuts such as `cc`.
    pub expand_shortcuts: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            suggestion_ratio: 0.7,
            max_suggestions: 3,
            fallback_entity: "company".to_string(),
            expand_shortcuts: true,
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fuzzy threshold, clamped to 0..=100.
    #[must_use]
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = if threshold.is_nan() {
            DEFAULT_FUZZY_THRESHOLD
        } else {
            threshold.clamp(0.0, 100.0)
        };
        self
    }

    /// Sets the suggestion ratio, clamped to 0..=1.
    #[must_use]
    pub fn with_suggestion_ratio(mut self, ratio: f64) -> Self {
        self.suggestion_ratio = if ratio.is_nan() {
            0.7
        } else {
            ratio.clamp(0.0, 1.0)
        };
        self
    }

    /// Sets the maximum number of suggestions per token.
    #[must_use]
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Sets the fallback entity id.
    #[must_use]
    pub fn with_fallback_entity(mut self, entity: impl Into<String>) -> Self {
        self.fallback_entity = entity.into();
        self
    }

    /// Enables or disables shortcut expansion.
    #[must_use]
    pub fn with_shortcuts(mut self, enabled: bool) -> Self {
        self.expand_shortcuts = enabled;
        self
    }

    /// Score a candidate needs to be offered as a suggestion.
    #[must_use]
    pub fn suggestion_threshold(&self) -> f64 {
        self.fuzzy_threshold * self.suggestion_ratio
    }
}
