//! In-memory game database for mushlock.
//!
//! This crate provides:
//! - [`ObjectStore`] - Object table with contents and exit chains
//! - [`AttrRegistry`] / [`AttrStore`] - Attribute definitions and values
//! - [`visibility`] - Who may read which attribute
//! - [`matcher`] - Name resolution from a player's point of view
//! - [`softcode`] - A minimal expression evaluator with global registers
//! - [`Database`] - Everything above plus ambient match state and a notification outbox

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attribute;
pub mod database;
pub mod matcher;
pub mod object;
pub mod softcode;
pub mod visibility;

pub use attribute::{AttrRegistry, AttrStore};
pub use database::{Database, MAX_PARENT_DEPTH, Notification};
pub use matcher::MatchState;
pub use object::{Object, ObjectStore};
pub use softcode::{EvalContext, REGISTER_COUNT, Registers};
