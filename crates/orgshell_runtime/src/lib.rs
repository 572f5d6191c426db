//! REPL and CLI for orgshell.
//!
//! This crate provides:
//! - [`Session`] - Parser, handlers, organization directory and current context
//! - [`Repl`] - Interactive read-eval-print loop
//! - [`LineEditor`] - Line editing abstraction (rustyline or batch input)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod repl;
pub mod session;

pub use editor::{Completions, LineEditor, LinesEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, ReplConfig, render};
pub use session::{Evaluation, Session, SharedDirectory};
