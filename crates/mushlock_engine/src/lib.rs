//! Lock expressions for mushlock: parsing, evaluation, and rendering.
//!
//! This crate provides:
//! - [`BoolExp`] - The lock expression tree
//! - [`LockParser`] - Recursive-descent parsing of typed and stored lock text
//! - [`Evaluator`] - Checking an actor against a lock
//! - [`unparse`] - Rendering a tree back to text in several formats
//! - [`LockEngine`] - The entry points the command layer calls
//!
//! The engine reaches the game only through the traits in [`host`];
//! [`mushlock_storage::Database`] implements all of them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod boolexp;
pub mod config;
mod database_host;
pub mod error;
pub mod eval;
pub mod guard;
pub mod host;
pub mod lock;
pub mod parser;
pub mod unparse;

#[cfg(test)]
mod testing;

pub use boolexp::{BoolExp, BoolExpKind, LockOperand};
pub use config::LockConfig;
pub use error::{LockError, ParseError};
pub use eval::Evaluator;
pub use guard::{MatchStateGuard, RegisterGuard};
pub use host::{
    AttributeSource, ContentsIter, LockHost, LockStore, NameMatcher, Notifier, ObjectGraph,
    ScriptEvaluator, member,
};
pub use lock::LockEngine;
pub use parser::LockParser;
pub use unparse::{UnparseFormat, unparse};
