//! Object references.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference to an object in the game database.
///
/// Non-negative values index real objects. A few negative values carry
/// special meaning for matchers and movement.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dbref(pub i32);

impl Dbref {
    /// The null reference.
    pub const NOTHING: Dbref = Dbref(-1);
    /// A matcher found more than one candidate.
    pub const AMBIGUOUS: Dbref = Dbref(-2);
    /// The virtual room standing for a mover's home.
    pub const HOME: Dbref = Dbref(-3);
    /// The single highest-privilege player.
    pub const GOD: Dbref = Dbref(1);

    /// Creates a reference from a raw object number.
    #[must_use]
    pub const fn new(number: i32) -> Self {
        Self(number)
    }

    /// Returns the raw object number.
    #[must_use]
    pub const fn number(self) -> i32 {
        self.0
    }

    /// Returns true if this reference can index the object table.
    #[must_use]
    pub const fn is_valid_index(self) -> bool {
        self.0 >= 0
    }

    /// Returns true for [`Dbref::NOTHING`].
    #[must_use]
    pub const fn is_nothing(self) -> bool {
        self.0 == Self::NOTHING.0
    }

    /// Returns the table index, or `None` for special values.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn index(self) -> Option<usize> {
        if self.0 >= 0 {
            Some(self.0 as usize)
        } else {
            None
        }
    }
}

impl fmt::Debug for Dbref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NOTHING => write!(f, "Dbref(NOTHING)"),
            Self::AMBIGUOUS => write!(f, "Dbref(AMBIGUOUS)"),
            Self::HOME => write!(f, "Dbref(HOME)"),
            Self(n) => write!(f, "Dbref(#{n})"),
        }
    }
}

impl fmt::Display for Dbref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<i32> for Dbref {
    fn from(number: i32) -> Self {
        Self(number)
    }
}

/// Outcome of resolving a typed name against an actor's surroundings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchResult {
    /// Exactly one object matched.
    Found(Dbref),
    /// Nothing matched.
    NotFound,
    /// More than one object matched equally well.
    Ambiguous,
}

impl MatchResult {
    /// Collapses the result to the classic dbref encoding.
    #[must_use]
    pub const fn to_dbref(self) -> Dbref {
        match self {
            Self::Found(obj) => obj,
            Self::NotFound => Dbref::NOTHING,
            Self::Ambiguous => Dbref::AMBIGUOUS,
        }
    }
}
