//! Error types for orgshell.
//!
//! Each pipeline concern has its own error enum so callers can match on the
//! exact failure. [`Error`] wraps all of them for code that only needs to
//! report.

use thiserror::Error;

use crate::kind::WordKind;
use crate::level::ContextLevel;
use crate::types::ValueType;

/// The main error type for orgshell operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Vocabulary or command set could not be built.
    #[error(transparent)]
    Registration(RegistrationError),

    /// Word sequence violates the composition rules.
    #[error(transparent)]
    Composition(CompositionError),

    /// Context invariants were violated.
    #[error(transparent)]
    Context(ContextError),

    /// Navigation failed.
    #[error(transparent)]
    Navigation(NavigationError),

    /// A parsed command could not be executed.
    #[error(transparent)]
    Execution(ExecutionError),

    /// I/O failure in the runtime.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violated; indicates a bug.
    #[error("internal error: {0}")]
    Internal(String),
}

macro_rules! impl_from_kind {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Error {
                fn from(err: $source) -> Self {
                    Self::new(ErrorKind::$variant(err))
                }
            }
        )*
    };
}

impl_from_kind! {
    RegistrationError => Registration,
    CompositionError => Composition,
    ContextError => Context,
    NavigationError => Navigation,
    ExecutionError => Execution,
    std::io::Error => Io,
}

/// A `Result` using the orgshell [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building the vocabulary or command set.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Word ids must be non-empty.
    #[error("word id must not be empty")]
    EmptyWordId,

    /// A word with this id already exists.
    #[error("word '{0}' is already registered")]
    DuplicateWord(String),

    /// An alias or abbreviation is already taken.
    #[error("alias '{alias}' of word '{word}' conflicts with word '{existing}'")]
    AliasConflict {
        /// The conflicting alias text.
        alias: String,
        /// The word being registered.
        word: String,
        /// The word that already owns the text.
        existing: String,
    },

    /// A command with this id already exists.
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    /// Commands need at least one required word.
    #[error("command '{0}' must have at least one required word")]
    NoRequiredWords(String),

    /// A command references words missing from the vocabulary.
    #[error("command '{command}' references unknown words: {}", .words.join(", "))]
    UnknownWords {
        /// The command id.
        command: String,
        /// The unknown word ids.
        words: Vec<String>,
    },

    /// A word is listed as both required and optional.
    #[error("command '{command}' lists words as both required and optional: {}", .words.join(", "))]
    OverlappingWords {
        /// The command id.
        command: String,
        /// The overlapping word ids.
        words: Vec<String>,
    },
}

/// Violations of the keyword ordering rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// No words were recognized.
    #[error("Command cannot be empty (at least 1 keyword required)")]
    Empty,

    /// A word appeared after a word of higher precedence.
    #[error(
        "Invalid keyword order: '{word}' ({kind}) cannot come after a keyword of higher precedence. Expected order: {order}",
        order = WordKind::EXPECTED_ORDER
    )]
    OutOfOrder {
        /// The offending word id.
        word: String,
        /// Its kind.
        kind: WordKind,
    },

    /// An attribute led a sequence containing other kinds.
    #[error(
        "Attribute '{word}' cannot come before ACTION, MODIFIER, or ENTITY keywords. Expected order: {order}",
        order = WordKind::EXPECTED_ORDER
    )]
    AttributeFirst {
        /// The leading attribute word id.
        word: String,
    },
}

/// Problems with a word set checked against one command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WordSetError {
    /// Some required words are absent.
    #[error("Missing required words: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    /// Some words are neither required nor optional for the command.
    #[error("Unknown words for this command: {}", .0.join(", "))]
    Foreign(Vec<String>),

    /// A word id is not in the vocabulary.
    #[error("Unknown word ID: {0}")]
    UnknownWord(String),

    /// The words are in an invalid order.
    #[error(transparent)]
    Composition(#[from] CompositionError),
}

/// A context whose fields disagree with its level.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContextError {
    /// Fields set or unset contrary to the level.
    #[error("At level {depth} ({level}), {detail}", depth = .level.depth())]
    LevelConsistency {
        /// The level that was requested.
        level: ContextLevel,
        /// What the level requires.
        detail: &'static str,
    },
}

/// A command run below the level it requires.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Command requires '{required}' context, currently at '{current}' context")]
pub struct ContextLevelError {
    /// The minimum level.
    pub required: ContextLevel,
    /// The current level.
    pub current: ContextLevel,
}

/// Failures of the navigation state machine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The directory has no organization by this name.
    #[error("Company '{name}' does not exist")]
    NotFound {
        /// The requested name.
        name: String,
    },

    /// Application targets need an organization context.
    #[error("Cannot open application '{app}' outside an organization")]
    RequiresOrganization {
        /// The requested application.
        app: String,
    },

    /// The target text could not be understood.
    #[error("Invalid navigation target: '{0}'")]
    InvalidTarget(String),

    /// The resulting context would be inconsistent.
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Failures at the execution boundary.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// The parse result carries errors.
    #[error("Cannot execute an invalid command: {}", .0.join("; "))]
    InvalidParse(Vec<String>),

    /// No command was selected for the input.
    #[error("No command matches the input")]
    NoCommand,

    /// The selected command is not registered.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// No handler is registered for the command.
    #[error("No handler '{handler}' registered for command '{command}'")]
    MissingHandler {
        /// The command id.
        command: String,
        /// The handler name.
        handler: String,
    },

    /// The current context is too shallow.
    #[error(transparent)]
    ContextLevel(#[from] ContextLevelError),

    /// A navigation handler failed.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// A handler reported failure.
    #[error("Handler '{handler}' failed: {message}")]
    Handler {
        /// The handler name.
        handler: String,
        /// What went wrong.
        message: String,
    },
}

/// Raw text that is not a valid value of the expected type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("expected {expected}, got '{raw}'")]
pub struct CoercionError {
    /// The raw text.
    pub raw: String,
    /// Description of the expected type.
    pub expected: String,
}

impl CoercionError {
    /// Creates a coercion error for `raw` against `ty`.
    #[must_use]
    pub fn new(raw: &str, ty: &ValueType) -> Self {
        Self {
            raw: raw.to_string(),
            expected: ty.to_string(),
        }
    }
}
