//! The lock expression tree.
//!
//! Each variant carries exactly the data its operator needs, so operand
//! constraints the parser enforces (an indirection names an object, an
//! `=`/`+` operand is an object or an attribute check) hold by construction.

use std::fmt;

use mushlock_foundation::{AttrNum, Dbref};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed lock.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoolExp {
    /// Always passes. Never produced by the parser.
    True,
    /// Passes for the object itself or anything inside it.
    Const(Dbref),
    /// Both sides must pass; the right side is skipped if the left fails.
    And(Box<BoolExp>, Box<BoolExp>),
    /// Either side must pass; the right side is skipped if the left passes.
    Or(Box<BoolExp>, Box<BoolExp>),
    /// Inverts its operand.
    Not(Box<BoolExp>),
    /// Evaluates the default lock stored on another object.
    Indirect(Dbref),
    /// Tests the actor alone, never its inventory.
    Is(LockOperand),
    /// Tests the actor's inventory.
    Carry(LockOperand),
    /// Passes if the actor has the same owner as the object.
    Owner(Dbref),
    /// Wildcard-matches an attribute on the actor or its inventory.
    AttrCheck {
        /// Attribute to fetch.
        attr: AttrNum,
        /// Wildcard pattern the value must match.
        pattern: String,
    },
    /// Evaluates an attribute as softcode and compares the output.
    AttrEval {
        /// Attribute holding the code.
        attr: AttrNum,
        /// Output that lets the actor pass.
        expected: String,
    },
}

/// Operand of the `=` and `+` operators.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LockOperand {
    /// A specific object.
    Object(Dbref),
    /// An attribute wildcard check.
    Attr {
        /// Attribute to fetch.
        attr: AttrNum,
        /// Wildcard pattern the value must match.
        pattern: String,
    },
}

/// Node kind, without payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoolExpKind {
    /// See [`BoolExp::True`].
    True,
    /// See [`BoolExp::Const`].
    Const,
    /// See [`BoolExp::And`].
    And,
    /// See [`BoolExp::Or`].
    Or,
    /// See [`BoolExp::Not`].
    Not,
    /// See [`BoolExp::Indirect`].
    Indirect,
    /// See [`BoolExp::Is`].
    Is,
    /// See [`BoolExp::Carry`].
    Carry,
    /// See [`BoolExp::Owner`].
    Owner,
    /// See [`BoolExp::AttrCheck`].
    AttrCheck,
    /// See [`BoolExp::AttrEval`].
    AttrEval,
}

impl fmt::Display for BoolExpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::True => "true",
            Self::Const => "const",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Indirect => "indirect",
            Self::Is => "is",
            Self::Carry => "carry",
            Self::Owner => "owner",
            Self::AttrCheck => "attr-check",
            Self::AttrEval => "attr-eval",
        };
        f.write_str(name)
    }
}

impl BoolExp {
    /// Builds `left & right`.
    #[must_use]
    pub fn and(left: BoolExp, right: BoolExp) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// Builds `left | right`.
    #[must_use]
    pub fn or(left: BoolExp, right: BoolExp) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Builds `!inner`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: BoolExp) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Builds an attribute check.
    #[must_use]
    pub fn attr_check(attr: AttrNum, pattern: impl Into<String>) -> Self {
        Self::AttrCheck {
            attr,
            pattern: pattern.into(),
        }
    }

    /// Builds an attribute evaluation.
    #[must_use]
    pub fn attr_eval(attr: AttrNum, expected: impl Into<String>) -> Self {
        Self::AttrEval {
            attr,
            expected: expected.into(),
        }
    }

    /// Returns the node kind.
    #[must_use]
    pub fn kind(&self) -> BoolExpKind {
        match self {
            Self::True => BoolExpKind::True,
            Self::Const(_) => BoolExpKind::Const,
            Self::And(..) => BoolExpKind::And,
            Self::Or(..) => BoolExpKind::Or,
            Self::Not(_) => BoolExpKind::Not,
            Self::Indirect(_) => BoolExpKind::Indirect,
            Self::Is(_) => BoolExpKind::Is,
            Self::Carry(_) => BoolExpKind::Carry,
            Self::Owner(_) => BoolExpKind::Owner,
            Self::AttrCheck { .. } => BoolExpKind::AttrCheck,
            Self::AttrEval { .. } => BoolExpKind::AttrEval,
        }
    }

    /// Counts nodes, treating each operand of `@`, `=`, `+`, and `$` as a
    /// node of its own.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::True | Self::Const(_) | Self::AttrCheck { .. } | Self::AttrEval { .. } => 1,
            Self::And(l, r) | Self::Or(l, r) => 1 + l.node_count() + r.node_count(),
            Self::Not(inner) => 1 + inner.node_count(),
            Self::Indirect(_) | Self::Is(_) | Self::Carry(_) | Self::Owner(_) => 2,
        }
    }

    /// Height of the tree; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::True | Self::Const(_) | Self::AttrCheck { .. } | Self::AttrEval { .. } => 1,
            Self::And(l, r) | Self::Or(l, r) => 1 + l.depth().max(r.depth()),
            Self::Not(inner) => 1 + inner.depth(),
            Self::Indirect(_) | Self::Is(_) | Self::Carry(_) | Self::Owner(_) => 2,
        }
    }

    /// Returns true for the explicit always-pass lock.
    #[must_use]
    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }
}

impl LockOperand {
    /// Converts a parsed leaf into an operand, if it has an allowed kind.
    #[must_use]
    pub fn from_leaf(leaf: BoolExp) -> Option<Self> {
        match leaf {
            BoolExp::Const(obj) => Some(Self::Object(obj)),
            BoolExp::AttrCheck { attr, pattern } => Some(Self::Attr { attr, pattern }),
            _ => None,
        }
    }
}
