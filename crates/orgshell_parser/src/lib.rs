//! Forgiving command interpretation for the orgshell business shell.
//!
//! This crate turns loosely typed input such as `cc ACME curency=eur` into a
//! structured [`ParseResult`] and, given a navigation [`Context`], into an
//! [`Invocation`] a handler can execute.
//!
//! # Architecture
//!
//! ```text
//! "cc ACME curency=eur"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SHORTCUTS       │  → "create company ACME curency=eur"
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   TOKENIZER     │  → [create, company, ACME, curency, =eur]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RECOGNIZER      │  → [Action(create), Entity(company), Value, Attribute(currency)~, Value]
//! │ (exact + fuzzy) │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ EXTRACTOR       │  → company_name = ACME, currency = EUR
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ COMPOSITION     │  → ACTION → MODIFIER → ENTITY → ATTRIBUTES
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ COMMAND         │  → create_company (+ suggestions)
//! │ MATCHING        │
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ DISPATCH        │  → handler(invocation, context)
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`vocabulary`] - Word definitions and the registry that resolves surface forms
//! - [`tokenizer`] - Convert raw input to a token stream
//! - [`similarity`] - Pluggable string similarity scoring
//! - [`recognizer`] - Exact and fuzzy word recognition
//! - [`extractor`] - Entity names and typed attribute values
//! - [`composition`] - Keyword ordering rules
//! - [`command`] - Command definitions, matching and ranking
//! - [`context`] - Immutable navigation context
//! - [`shortcuts`] - First-token shortcut expansion
//! - [`parser`] - Main parser pipeline orchestration
//! - [`dispatch`] - Handler binding and execution
//! - [`stdlib`] - Standard business vocabulary and commands

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod composition;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod extractor;
pub mod parser;
pub mod recognizer;
pub mod shortcuts;
pub mod similarity;
pub mod stdlib;
pub mod tokenizer;
pub mod vocabulary;


// Re-export main types for convenience
pub use command::{Command, CommandDef, CommandRef, CommandRegistry, HandlerRef};
pub use composition::CompositionRules;
pub use config::{DEFAULT_FUZZY_THRESHOLD, ParserConfig};
pub use context::{
    Context, InMemoryDirectory, NavigationTarget, OrgId, OrganizationDirectory, navigate,
};
pub use dispatch::{CommandHandler, Dispatcher, HandlerOutcome, Invocation, NavigateHandler};
pub use extractor::{Extraction, ValueExtractor};
pub use parser::{ParseResult, Parser};
pub use recognizer::Recognizer;
pub use shortcuts::ShortcutTable;
pub use similarity::{JaroWinklerMatcher, LevenshteinMatcher, WordMatcher};
pub use tokenizer::{Operator, Token, TokenClass, Tokenizer};
pub use vocabulary::{
    ActionCategory, ActionWord, AttributeWord, CrudOperation, EntityWord, ModifierWord, Word,
    WordMeta, WordRef, VocabularyRegistry,
};
