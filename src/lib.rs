//! orgshell - Forgiving command interpreter for a business-entity shell
//!
//! This crate re-exports all layers of the orgshell system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: orgshell_runtime     - REPL, CLI, session state
//! Layer 1: orgshell_parser      - Vocabulary, recognition, commands, context, dispatch
//! Layer 0: orgshell_foundation  - Core types (WordKind, ContextLevel, AttributeValue, Error)
//! ```

pub use orgshell_foundation as foundation;
pub use orgshell_parser as parser;
pub use orgshell_runtime as runtime;
