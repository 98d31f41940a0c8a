//! mushlock - Lock expressions for a multiplayer text-game server
//!
//! This crate re-exports all layers of the mushlock system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: mushlock_engine     — Lock parsing, evaluation, rendering
//! Layer 1: mushlock_storage    — Objects, attributes, matching, softcode
//! Layer 0: mushlock_foundation — Core types (Dbref, AttrNum, flags, Error)
//! ```

pub use mushlock_engine as engine;
pub use mushlock_foundation as foundation;
pub use mushlock_storage as storage;
