//! The attribute model: numbers, definitions, flags, and fetched values.

use std::fmt;

use bitflags::bitflags;

use crate::dbref::Dbref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attribute number.
///
/// Numbers below [`AttrNum::USER_START`] are builtin attributes with fixed
/// meaning; user-defined attributes are allocated from there upward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttrNum(pub u32);

impl AttrNum {
    /// Description.
    pub const DESC: AttrNum = AttrNum(6);
    /// Sex.
    pub const SEX: AttrNum = AttrNum(7);
    /// Default object lock.
    pub const LOCK: AttrNum = AttrNum(42);
    /// Object name.
    pub const NAME: AttrNum = AttrNum(43);
    /// Enter lock.
    pub const LENTER: AttrNum = AttrNum(59);
    /// Leave lock.
    pub const LLEAVE: AttrNum = AttrNum(60);
    /// Page lock.
    pub const LPAGE: AttrNum = AttrNum(61);
    /// Use lock.
    pub const LUSE: AttrNum = AttrNum(62);
    /// Give lock.
    pub const LGIVE: AttrNum = AttrNum(63);
    /// Password.
    pub const PASS: AttrNum = AttrNum(5);
    /// Teleport lock.
    pub const LTPORT: AttrNum = AttrNum(85);
    /// Drop lock.
    pub const LDROP: AttrNum = AttrNum(86);
    /// Receive lock.
    pub const LRECEIVE: AttrNum = AttrNum(87);
    /// Link lock.
    pub const LLINK: AttrNum = AttrNum(93);
    /// Teleport-out lock.
    pub const LTELOUT: AttrNum = AttrNum(94);
    /// Spare lock not consulted by the server.
    pub const LUSER: AttrNum = AttrNum(97);
    /// Parent lock.
    pub const LPARENT: AttrNum = AttrNum(98);
    /// Control lock.
    pub const LCONTROL: AttrNum = AttrNum(99);
    /// First number handed out to user-defined attributes.
    pub const USER_START: AttrNum = AttrNum(256);

    /// Creates an attribute number.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the raw number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AttrNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// Attribute flags, both on registry definitions and on stored values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct AttrFlags: u32 {
        /// Players other than the owner can't see it.
        const ODARK = 0x0000_0001;
        /// No one can see it.
        const DARK = 0x0000_0002;
        /// Only wizards can change it.
        const WIZARD = 0x0000_0004;
        /// Only wizards can see it.
        const MDARK = 0x0000_0008;
        /// Never shown, not even to God.
        const INTERNAL = 0x0000_0010;
        /// No `@` command is generated for it.
        const NOCMD = 0x0000_0020;
        /// The value is locked against change.
        const LOCK = 0x0000_0040;
        /// The definition should be ignored.
        const DELETED = 0x0000_0080;
        /// `$`-commands are not processed from it.
        const NOPROG = 0x0000_0100;
        /// Only God can change it.
        const GOD = 0x0000_0200;
        /// The attribute holds a lock.
        const IS_LOCK = 0x0000_0400;
        /// Anyone can see it.
        const VISUAL = 0x0000_0800;
        /// Not inherited by children.
        const PRIVATE = 0x0000_1000;
        /// The value is a structure.
        const STRUCTURE = 0x0008_0000;
    }
}

impl Default for AttrFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Registry definition of an attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttrDef {
    /// The attribute number.
    pub number: AttrNum,
    /// The canonical (uppercase) name.
    pub name: String,
    /// Flags that apply to every value of this attribute.
    pub flags: AttrFlags,
}

impl AttrDef {
    /// Creates a definition, uppercasing the name.
    #[must_use]
    pub fn new(number: AttrNum, name: &str, flags: AttrFlags) -> Self {
        Self {
            number,
            name: name.to_ascii_uppercase(),
            flags,
        }
    }
}

/// One fetched attribute value with its ownership and per-value flags.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttrValue {
    /// The stored text; empty means unset.
    pub text: String,
    /// Who owns this value.
    pub owner: Dbref,
    /// Flags set on this particular value.
    pub flags: AttrFlags,
}

impl AttrValue {
    /// Creates a value.
    #[must_use]
    pub fn new(text: impl Into<String>, owner: Dbref, flags: AttrFlags) -> Self {
        Self {
            text: text.into(),
            owner,
            flags,
        }
    }

    /// The value of an attribute that is not set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            owner: Dbref::NOTHING,
            flags: AttrFlags::empty(),
        }
    }

    /// Returns true if no text is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for AttrValue {
    fn default() -> Self {
        Self::empty()
    }
}
