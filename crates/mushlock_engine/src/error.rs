//! Error types for lock parsing and storage.

use thiserror::Error;

/// Why lock text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text was empty.
    #[error("empty lock")]
    Empty,

    /// User-typed text contained a tab, newline, or escape character.
    #[error("forbidden character {0:?} in lock")]
    ForbiddenCharacter(char),

    /// User-typed text had unmatched parentheses.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    /// The expression nests deeper than the configured limit.
    #[error("lock nested deeper than {limit} levels")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// An operator or the end of input appeared where an operand belongs.
    #[error("missing operand at offset {offset}")]
    MissingOperand {
        /// Byte offset into the lock text.
        offset: usize,
    },

    /// A parenthesized group was not closed.
    #[error("expected ')' at offset {offset}")]
    ExpectedCloseParen {
        /// Byte offset into the lock text.
        offset: usize,
    },

    /// An operator was applied to an operand of the wrong kind.
    #[error("'{operator}' cannot apply to this operand")]
    InvalidOperand {
        /// The offending operator.
        operator: char,
    },

    /// Name matching found nothing.
    #[error("I don't see {0} here.")]
    UnknownObject(String),

    /// Name matching found more than one object.
    #[error("I don't know which {0} you mean!")]
    AmbiguousObject(String),

    /// Stored lock text referenced something other than a live `#n` object.
    #[error("invalid object reference {0:?}")]
    InvalidObjectRef(String),

    /// Text remained after a complete expression.
    #[error("unexpected input at offset {offset}")]
    TrailingInput {
        /// Byte offset into the lock text.
        offset: usize,
    },
}

/// Why a lock could not be set.
#[derive(Debug, Error)]
pub enum LockError {
    /// The lock text did not parse.
    #[error("invalid lock: {0}")]
    Parse(#[from] ParseError),

    /// The database refused to store it.
    #[error("cannot store lock: {0}")]
    Store(#[from] mushlock_foundation::Error),
}
