//! Core types and error definitions for orgshell.
//!
//! This crate provides:
//! - [`WordKind`] - The four grammatical roles a vocabulary word can play
//! - [`ContextLevel`] - The navigation hierarchy (system, organization, application)
//! - [`EntityKind`] - The closed set of business entities the shell manages
//! - [`ValueType`] / [`AttributeValue`] - Typed attribute values
//! - [`Error`] - Error types shared by every layer

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod kind;
pub mod level;
pub mod types;
pub mod value;

pub use entity::EntityKind;
pub use error::{
    CoercionError, CompositionError, ContextError, ContextLevelError, Error, ErrorKind,
    ExecutionError, NavigationError, RegistrationError, Result, WordSetError,
};
pub use kind::WordKind;
pub use level::ContextLevel;
pub use types::ValueType;
pub use value::AttributeValue;
