//! Error types for mushlock.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::dbref::Dbref;

/// Result alias used throughout the database layers.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for database operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an object not found error.
    #[must_use]
    pub fn object_not_found(obj: Dbref) -> Self {
        Self::new(ErrorKind::ObjectNotFound(obj))
    }

    /// Creates an invalid object error.
    #[must_use]
    pub fn invalid_object(obj: Dbref) -> Self {
        Self::new(ErrorKind::InvalidObject(obj))
    }

    /// Creates an unknown attribute error.
    #[must_use]
    pub fn unknown_attribute(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAttribute(name.into()))
    }

    /// Creates a duplicate attribute error.
    #[must_use]
    pub fn duplicate_attribute(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateAttribute(name.into()))
    }

    /// Creates a containment cycle error.
    #[must_use]
    pub fn containment_cycle(object: Dbref, destination: Dbref) -> Self {
        Self::new(ErrorKind::ContainmentCycle {
            object,
            destination,
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// No object lives at this reference.
    #[error("object not found: {0}")]
    ObjectNotFound(Dbref),

    /// The object exists but cannot take part in the operation.
    #[error("invalid object: {0}")]
    InvalidObject(Dbref),

    /// No attribute with this name or number is defined.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// An attribute with this name is already defined.
    #[error("duplicate attribute: {0}")]
    DuplicateAttribute(String),

    /// The attribute name contains characters that cannot appear in locks.
    #[error("invalid attribute name: {0:?}")]
    InvalidAttributeName(String),

    /// The move would place an object inside itself.
    #[error("cannot move {object} into {destination}: containment cycle")]
    ContainmentCycle {
        /// The object being moved.
        object: Dbref,
        /// Where it was being moved to.
        destination: Dbref,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The acting object, if any.
    pub actor: Option<Dbref>,
    /// The command or operation being performed.
    pub operation: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the acting object.
    #[must_use]
    pub fn with_actor(mut self, actor: Dbref) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(actor) = self.actor {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "by {actor}")?;
        }
        Ok(())
    }
}
