//! Core types for mushlock.
//!
//! This crate provides:
//! - [`Dbref`] - Object references, with the distinguished `NOTHING`/`AMBIGUOUS`/`HOME` values
//! - [`ObjectType`] and [`ObjectFlags`] - What an object is and how it behaves
//! - [`AttrNum`], [`AttrDef`], [`AttrValue`], [`AttrFlags`] - The attribute model
//! - [`wild_match`] - Wildcard and ordering comparison used by attribute locks
//! - [`strings_equal`] - Case-insensitive, space-compressing string comparison
//! - [`Error`] - Error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attr;
pub mod dbref;
pub mod error;
pub mod object;
pub mod strings;
pub mod wild;

pub use attr::{AttrDef, AttrFlags, AttrNum, AttrValue};
pub use dbref::{Dbref, MatchResult};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use object::{ObjectFlags, ObjectType};
pub use strings::strings_equal;
pub use wild::{quick_wild, wild_match};
