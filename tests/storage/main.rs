//! Integration tests for Layer 1: Storage
//!
//! Tests for the object table, attributes and inheritance, name matching,
//! softcode, and the database's ambient state.

mod matching;
mod objects;
mod softcode;
