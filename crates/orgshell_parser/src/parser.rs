//! Main parser pipeline.
//!
//! Orchestrates: shortcut expansion → tokenize → recognize → extract values
//! → validate composition → match commands → suggestions.

use std::collections::BTreeMap;
use std::sync::Arc;

use orgshell_foundation::{AttributeValue, Error, WordKind};
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, warn};

use crate::command::{Command, CommandRef, CommandRegistry};
use crate::composition::CompositionRules;
use crate::config::ParserConfig;
use crate::extractor::ValueExtractor;
use crate::recognizer::{EXACT_CONFIDENCE, Recognizer};
use crate::shortcuts::ShortcutTable;
use crate::similarity::{LevenshteinMatcher, WordMatcher};
use crate::tokenizer::{Token, Tokenizer};
use crate::vocabulary::{VocabularyRegistry, Word, WordRef};

/// Everything learned from one line of input.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ParseResult {
    /// The raw input.
    pub input: String,
    /// The input after shortcut expansion; token offsets refer to this.
    pub expanded: String,
    /// Recognized tokens.
    pub tokens: Vec<Token>,
    /// Resolved words, in input order.
    pub recognized_words: Vec<WordRef>,
    /// `<entity>_name` -> value.
    pub entity_values: BTreeMap<String, String>,
    /// Attribute key -> typed value.
    pub attribute_values: BTreeMap<String, AttributeValue>,
    /// Whether no errors were found.
    pub is_valid: bool,
    /// Problems that make the input unusable.
    pub errors: Vec<String>,
    /// Problems that leave the input usable, such as a value kept as raw
    /// text because it does not fit its attribute's type.
    pub warnings: Vec<String>,
    /// Hints for the user.
    pub suggestions: Vec<String>,
    /// Commands whose word set covers the input, ranked best first.
    pub matching_commands: Vec<CommandRef>,
    /// The best matching command.
    pub selected_command: Option<CommandRef>,
}

impl ParseResult {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            ..Self::default()
        }
    }

    /// Tokens that did not resolve to a word.
    pub fn unresolved(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.is_word())
    }
}

/// Interprets command lines.
///
/// The parser holds no mutable state; `parse` takes `&self` and the parser
/// can be shared across threads.
pub struct Parser {
    commands: Arc<CommandRegistry>,
    shortcuts: ShortcutTable,
    matcher: Box<dyn WordMatcher>,
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser over a command registry and its vocabulary.
    #[must_use]
    pub fn new(commands: Arc<CommandRegistry>) -> Self {
        Self {
            commands,
            shortcuts: ShortcutTable::new(),
            matcher: Box::new(LevenshteinMatcher),
            config: ParserConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the shortcut table.
    #[must_use]
    pub fn with_shortcuts(mut self, shortcuts: ShortcutTable) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// Replaces the similarity scorer.
    #[must_use]
    pub fn with_matcher(mut self, matcher: impl WordMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// The vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &VocabularyRegistry {
        self.commands.vocabulary()
    }

    /// The command registry.
    #[must_use]
    pub fn commands(&self) -> &Arc<CommandRegistry> {
        &self.commands
    }

    /// The shortcut table.
    #[must_use]
    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses one line of input.
    ///
    /// Never fails: user mistakes land in `errors` and `suggestions`, and
    /// internal faults are reported as a `Parse error: …` entry.
    #[must_use]
    pub fn parse(&self, input: &str) -> ParseResult {
        let mut result = ParseResult::new(input);
        if let Err(e) = self.run(&mut result) {
            warn!(error = %e, input, "internal parse failure");
            result.errors.push(format!("Parse error: {e}"));
        }
        result.is_valid = result.errors.is_empty();
        debug!(
            input,
            valid = result.is_valid,
            words = result.recognized_words.len(),
            selected = ?result.selected_command,
            "parsed"
        );
        result
    }

    /// Ids of the result's recognized words, in input order.
    #[must_use]
    pub fn word_ids<'a>(&'a self, result: &ParseResult) -> Vec<&'a str> {
        self.vocabulary().ids_of(&result.recognized_words)
    }

    /// The selected command of a result.
    #[must_use]
    pub fn selected<'a>(&'a self, result: &ParseResult) -> Option<&'a Command> {
        result
            .selected_command
            .and_then(|r| self.commands.command(r))
    }

    fn run(&self, result: &mut ParseResult) -> Result<(), Error> {
        let vocab = self.vocabulary();

        result.expanded = if self.config.expand_shortcuts {
            self.shortcuts.expand(&result.input)
        } else {
            result.input.clone()
        };

        let mut tokens = Tokenizer::tokenize(&result.expanded);
        Recognizer::new(vocab, self.matcher.as_ref(), &self.config).recognize(&mut tokens);
        result.recognized_words = tokens.iter().filter_map(|t| t.word).collect();
        let words = resolve_all(vocab, &result.recognized_words)?;

        let extraction = ValueExtractor::extract(&tokens, vocab, &self.config.fallback_entity)?;
        result.entity_values = extraction.entity_values;
        result.attribute_values = extraction.attribute_values;
        result.tokens = tokens;

        let composition = CompositionRules::validate(&words);
        if let Err(e) = &composition {
            result.errors.push(e.to_string());
        }
        result.warnings = extraction.warnings;

        let matches = self.commands.find_matching(&result.recognized_words);
        result.matching_commands = self.commands.rank(&matches, &result.recognized_words);
        result.selected_command = result.matching_commands.first().copied();

        self.suggest(result, &words, composition.is_ok())
    }

    fn suggest(&self, result: &mut ParseResult, words: &[&Word], ordered: bool) -> Result<(), Error> {
        let vocab = self.vocabulary();
        let mut out = Vec::new();

        for token in &result.tokens {
            if token.is_unknown() {
                if let Some(best) = token.suggestions.first() {
                    out.push(format!("Did you mean '{best}' instead of '{}'?", token.text));
                }
            } else if let Some(r) = token.word.filter(|_| token.confidence < EXACT_CONFIDENCE) {
                let word = resolve(vocab, r)?;
                out.push(format!("Interpreted '{}' as '{}'", token.text, word.id()));
            }
        }

        if let Some(command) = self.selected(result) {
            let missing = command.missing_required(&result.recognized_words);
            if !missing.is_empty() {
                out.push(format!(
                    "Missing required words: {}",
                    vocab.ids_of(&missing).join(", ")
                ));
            }
        }

        let has = |kind: WordKind| words.iter().any(|w| w.kind() == kind);
        let first_action = words.iter().find_map(|w| match w {
            Word::Action(a) => Some(a),
            _ => None,
        });
        if first_action.is_some_and(|a| a.requires_entity) && !has(WordKind::Entity) {
            out.push(format!(
                "Consider adding an entity word (e.g., {})",
                examples(vocab, WordKind::Entity, 3)
            ));
        }
        if has(WordKind::Entity) && !has(WordKind::Action) {
            out.push(format!(
                "Consider adding an action word (e.g., {})",
                examples(vocab, WordKind::Action, 5)
            ));
        }

        if let Some(command) = self.selected(result) {
            if result.attribute_values.is_empty() && has(WordKind::Action) && has(WordKind::Entity) {
                let mut typed: Vec<_> = command
                    .optional()
                    .iter()
                    .filter_map(|r| vocab.word(*r))
                    .filter_map(|w| w.value_type().map(|t| (w.id(), t)))
                    .collect();
                // Attributes with fixed options make the most useful hints.
                typed.sort_by_key(|(_, ty)| ty.options().is_empty());
                let hints: Vec<String> = typed
                    .into_iter()
                    .take(2)
                    .map(|(id, ty)| {
                        let example = ty.options().first().map_or("value", String::as_str);
                        format!("{id}={example}")
                    })
                    .collect();
                if !hints.is_empty() {
                    out.push(format!("Consider adding attributes like {}", hints.join(" ")));
                }
            }
        }

        if ordered && !words.is_empty() && result.matching_commands.is_empty() {
            out.push(format!(
                "No command accepts the words: {}",
                vocab.ids_of(&result.recognized_words).join(", ")
            ));
        }

        result.suggestions = out;
        Ok(())
    }
}

fn resolve(vocab: &VocabularyRegistry, word_ref: WordRef) -> Result<&Word, Error> {
    vocab
        .word(word_ref)
        .ok_or_else(|| Error::internal(format!("dangling word reference #{}", word_ref.index())))
}

fn resolve_all<'a>(vocab: &'a VocabularyRegistry, refs: &[WordRef]) -> Result<Vec<&'a Word>, Error> {
    refs.iter().map(|r| resolve(vocab, *r)).collect()
}

fn examples(vocab: &VocabularyRegistry, kind: WordKind, n: usize) -> String {
    vocab
        .by_type(kind)
        .iter()
        .take(n)
        .map(|w| format!("'{}'", w.id()))
        .collect::<Vec<_>>()
        .join(", ")
}
