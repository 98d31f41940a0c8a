//! Object types and flags.

use std::fmt;

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What kind of object a database slot holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectType {
    /// A place that holds things, players, and exits.
    Room,
    /// A portable object.
    Thing,
    /// A link from one room to another.
    Exit,
    /// A connected character.
    Player,
    /// A destroyed slot awaiting reuse.
    Garbage,
}

impl ObjectType {
    /// Returns true if objects of this type have a location.
    #[must_use]
    pub const fn has_location(self) -> bool {
        matches!(self, Self::Thing | Self::Player)
    }

    /// Returns true if objects of this type can hold other objects.
    #[must_use]
    pub const fn has_contents(self) -> bool {
        matches!(self, Self::Room | Self::Thing | Self::Player)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Room => "ROOM",
            Self::Thing => "THING",
            Self::Exit => "EXIT",
            Self::Player => "PLAYER",
            Self::Garbage => "GARBAGE",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// Per-object flags consulted by lock checks and attribute visibility.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ObjectFlags: u32 {
        /// Full administrative privileges.
        const WIZARD = 0x0000_0010;
        /// May see everything a wizard sees.
        const ROYALTY = 0x0000_0020;
        /// Anyone may examine the object.
        const VISUAL = 0x0000_0040;
        /// Only players may pass the object's locks.
        const KEY = 0x0000_0080;
        /// Passes every lock unconditionally.
        const PASS_LOCKS = 0x0000_0100;
        /// Scheduled for destruction.
        const GOING = 0x0000_0200;
    }
}

impl Default for ObjectFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl ObjectFlags {
    /// Returns true if the holder may see hidden and dark-to-mortal data.
    #[must_use]
    pub const fn sees_all(self) -> bool {
        self.intersects(Self::WIZARD.union(Self::ROYALTY))
    }
}
