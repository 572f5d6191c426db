//! Command registry and matching.
//!
//! A command is a set of required and optional words bound to a handler.
//! Recognized words select commands whose word set covers them; ranking
//! orders the candidates.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use orgshell_foundation::{ContextLevel, ContextLevelError, RegistrationError, WordKind, WordSetError};
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::trace;

use crate::composition::CompositionRules;
use crate::context::Context;
use crate::vocabulary::{VocabularyRegistry, Word, WordRef};

/// Handle to a registered command. The index is the registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CommandRef(usize);

impl CommandRef {
    /// Returns the registration index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Name of the handler that executes a command.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HandlerRef(String);

impl HandlerRef {
    /// Creates a handler reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The handler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unvalidated command definition, built before registration.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandDef {
    /// Unique command id.
    pub id: String,
    /// Help text.
    pub description: String,
    /// Word ids that must all be present.
    pub required: Vec<String>,
    /// Word ids that may be present.
    pub optional: Vec<String>,
    /// Shallowest context the command runs in.
    pub min_level: ContextLevel,
    /// Handler name; defaults to the command id.
    pub handler: Option<String>,
    /// Example invocations.
    pub examples: Vec<String>,
}

impl CommandDef {
    /// Starts a definition.
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            required: Vec::new(),
            optional: Vec::new(),
            min_level: ContextLevel::System,
            handler: None,
            examples: Vec::new(),
        }
    }

    /// Adds required word ids.
    #[must_use]
    pub fn requires<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(words.into_iter().map(Into::into));
        self
    }

    /// Adds optional word ids.
    #[must_use]
    pub fn accepts<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional.extend(words.into_iter().map(Into::into));
        self
    }

    /// Sets the minimum context level.
    #[must_use]
    pub fn with_min_level(mut self, level: ContextLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Sets the handler name.
    #[must_use]
    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// Adds an example invocation.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }
}

/// A registered command.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    id: String,
    description: String,
    required: BTreeSet<WordRef>,
    optional: BTreeSet<WordRef>,
    min_level: ContextLevel,
    handler: HandlerRef,
    examples: Vec<String>,
}

impl Command {
    /// Command id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Help text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Required words, in registration order.
    #[must_use]
    pub fn required(&self) -> &BTreeSet<WordRef> {
        &self.required
    }

    /// Optional words, in registration order.
    #[must_use]
    pub fn optional(&self) -> &BTreeSet<WordRef> {
        &self.optional
    }

    /// Minimum context level.
    #[must_use]
    pub fn min_level(&self) -> ContextLevel {
        self.min_level
    }

    /// Handler reference.
    #[must_use]
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    /// Example invocations.
    #[must_use]
    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Whether the word is required or optional for this command.
    #[must_use]
    pub fn accepts(&self, word: WordRef) -> bool {
        self.required.contains(&word) || self.optional.contains(&word)
    }

    /// Required words absent from `words`.
    #[must_use]
    pub fn missing_required(&self, words: &[WordRef]) -> Vec<WordRef> {
        self.required
            .iter()
            .filter(|r| !words.contains(r))
            .copied()
            .collect()
    }

    /// Number of required words present in `words`.
    #[must_use]
    pub fn satisfied_required(&self, words: &[WordRef]) -> usize {
        self.required.iter().filter(|r| words.contains(r)).count()
    }

    /// Checks a list of word ids against this command.
    ///
    /// Checks run in order: missing required words, words the command does
    /// not accept, ids missing from the vocabulary, then word order.
    ///
    /// # Errors
    ///
    /// Returns the first [`WordSetError`] found.
    pub fn validate_words(
        &self,
        ids: &[&str],
        vocab: &VocabularyRegistry,
    ) -> Result<(), WordSetError> {
        let refs: Vec<Option<WordRef>> = ids.iter().map(|id| vocab.get_ref(id)).collect();
        let present: Vec<WordRef> = refs.iter().flatten().copied().collect();

        let missing = self.missing_required(&present);
        if !missing.is_empty() {
            return Err(WordSetError::MissingRequired(
                vocab.ids_of(&missing).into_iter().map(String::from).collect(),
            ));
        }

        let foreign: Vec<String> = ids
            .iter()
            .zip(&refs)
            .filter(|(_, r)| r.is_none_or(|r| !self.accepts(r)))
            .map(|(id, _)| (*id).to_string())
            .collect();
        if let Some(first) = foreign.first() {
            if refs.iter().all(Option::is_some) {
                return Err(WordSetError::Foreign(foreign));
            }
            return Err(WordSetError::UnknownWord(first.clone()));
        }

        let words: Vec<&Word> = present.iter().filter_map(|r| vocab.word(*r)).collect();
        CompositionRules::validate(&words)?;
        Ok(())
    }

    /// Checks that the command may run in `context`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextLevelError`] when the context is below the
    /// command's minimum level.
    pub fn can_execute(&self, context: &Context) -> Result<(), ContextLevelError> {
        context.require(self.min_level)
    }
}

/// Registry of commands over a shared vocabulary.
#[derive(Clone, Debug)]
pub struct CommandRegistry {
    vocab: Arc<VocabularyRegistry>,
    commands: Vec<Command>,
    ids: HashMap<String, CommandRef>,
    by_action: HashMap<WordRef, Vec<CommandRef>>,
}

impl CommandRegistry {
    /// Creates an empty registry over a vocabulary.
    #[must_use]
    pub fn new(vocab: Arc<VocabularyRegistry>) -> Self {
        Self {
            vocab,
            commands: Vec::new(),
            ids: HashMap::new(),
            by_action: HashMap::new(),
        }
    }

    /// Registers a command, consuming the registry.
    ///
    /// # Errors
    ///
    /// Fails on a duplicate id, an empty required set, word ids missing
    /// from the vocabulary, or a word both required and optional.
    pub fn register(mut self, def: CommandDef) -> Result<Self, RegistrationError> {
        if self.ids.contains_key(&def.id) {
            return Err(RegistrationError::DuplicateCommand(def.id));
        }
        if def.required.is_empty() {
            return Err(RegistrationError::NoRequiredWords(def.id));
        }

        let unknown: Vec<String> = def
            .required
            .iter()
            .chain(&def.optional)
            .filter(|id| self.vocab.get_ref(id).is_none())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(RegistrationError::UnknownWords {
                command: def.id,
                words: unknown,
            });
        }

        let resolve = |ids: &[String]| -> BTreeSet<WordRef> {
            ids.iter().filter_map(|id| self.vocab.get_ref(id)).collect()
        };
        let required = resolve(&def.required);
        let optional = resolve(&def.optional);

        let overlap: Vec<String> = required
            .intersection(&optional)
            .filter_map(|r| self.vocab.word(*r))
            .map(|w| w.id().to_string())
            .collect();
        if !overlap.is_empty() {
            return Err(RegistrationError::OverlappingWords {
                command: def.id,
                words: overlap,
            });
        }

        let command_ref = CommandRef(self.commands.len());
        for action in required
            .iter()
            .filter(|r| self.vocab.word(**r).is_some_and(|w| w.kind() == WordKind::Action))
        {
            self.by_action.entry(*action).or_default().push(command_ref);
        }
        self.ids.insert(def.id.clone(), command_ref);
        self.commands.push(Command {
            handler: HandlerRef::new(def.handler.unwrap_or_else(|| def.id.clone())),
            id: def.id,
            description: def.description,
            required,
            optional,
            min_level: def.min_level,
            examples: def.examples,
        });
        Ok(self)
    }

    /// The vocabulary the commands refer to.
    #[must_use]
    pub fn vocabulary(&self) -> &Arc<VocabularyRegistry> {
        &self.vocab
    }

    /// Resolves a handle.
    #[must_use]
    pub fn command(&self, command_ref: CommandRef) -> Option<&Command> {
        self.commands.get(command_ref.index())
    }

    /// Looks up a command by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.get_ref(id).and_then(|r| self.command(r))
    }

    /// Looks up a command handle by id.
    #[must_use]
    pub fn get_ref(&self, id: &str) -> Option<CommandRef> {
        self.ids.get(id).copied()
    }

    /// Commands that require the given action word, in registration order.
    #[must_use]
    pub fn commands_for_action(&self, action: WordRef) -> Vec<&Command> {
        self.by_action
            .get(&action)
            .into_iter()
            .flatten()
            .filter_map(|r| self.command(*r))
            .collect()
    }

    /// Iterates over commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (CommandRef, &Command)> {
        self.commands
            .iter()
            .enumerate()
            .map(|(i, c)| (CommandRef(i), c))
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands whose word set covers every recognized word.
    ///
    /// Nothing matches when the words themselves are out of order.
    #[must_use]
    pub fn find_matching(&self, words: &[WordRef]) -> Vec<CommandRef> {
        let resolved: Vec<&Word> = words.iter().filter_map(|r| self.vocab.word(*r)).collect();
        if resolved.len() != words.len() || !CompositionRules::is_valid(&resolved) {
            return Vec::new();
        }
        self.iter()
            .filter(|(_, c)| words.iter().all(|w| c.accepts(*w)))
            .map(|(r, _)| r)
            .collect()
    }

    /// Orders candidate commands, best first.
    ///
    /// Keys, in order: most required words satisfied, fewest required words,
    /// most word kinds shared with the input, earliest registration.
    #[must_use]
    pub fn rank(&self, matches: &[CommandRef], words: &[WordRef]) -> Vec<CommandRef> {
        let input_kinds = self.vocab.kinds_of(words);
        let mut keyed: Vec<_> = matches
            .iter()
            .filter_map(|r| self.command(*r).map(|c| (*r, c)))
            .map(|(r, c)| {
                let command_words: Vec<WordRef> =
                    c.required.iter().chain(&c.optional).copied().collect();
                let shared = self
                    .vocab
                    .kinds_of(&command_words)
                    .intersection(&input_kinds)
                    .count();
                let key = (
                    Reverse(c.satisfied_required(words)),
                    c.required.len(),
                    Reverse(shared),
                    r,
                );
                trace!(command = %c.id, ?key, "rank");
                key
            })
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(.., r)| r).collect()
    }

    /// The best matching command, if any.
    #[must_use]
    pub fn best_match(&self, words: &[WordRef]) -> Option<CommandRef> {
        self.rank(&self.find_matching(words), words).first().copied()
    }
}
