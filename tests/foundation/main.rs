//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: WordKind, ContextLevel, AttributeValue and Error.

mod kinds;
mod values;
