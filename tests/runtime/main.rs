//! Runtime integration tests for orgshell
//!
//! Tests that drive whole sessions through the REPL layer.

mod repl;
mod session;
