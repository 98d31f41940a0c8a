//! Integration tests for Layer 2: Engine
//!
//! Tests for lock parsing, evaluation, and rendering against a live database.

mod common;
mod evaluation;
mod parsing;
