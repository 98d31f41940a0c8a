//! Attribute registry and per-object attribute values.

use mushlock_foundation::{AttrDef, AttrFlags, AttrNum, AttrValue, Dbref, Error, ErrorKind, Result};

/// Builtin attribute definitions with their classic numbers and flags.
const BUILTINS: &[(u32, &str, AttrFlags)] = &[
    (5, "PASSWORD", AttrFlags::INTERNAL.union(AttrFlags::DARK)),
    (6, "DESCRIBE", AttrFlags::VISUAL),
    (7, "SEX", AttrFlags::VISUAL),
    (42, "LOCK", AttrFlags::IS_LOCK),
    (
        43,
        "NAME",
        AttrFlags::INTERNAL
            .union(AttrFlags::DARK)
            .union(AttrFlags::NOCMD)
            .union(AttrFlags::NOPROG),
    ),
    (59, "ENTERLOCK", AttrFlags::IS_LOCK),
    (60, "LEAVELOCK", AttrFlags::IS_LOCK),
    (61, "PAGELOCK", AttrFlags::IS_LOCK),
    (62, "USELOCK", AttrFlags::IS_LOCK),
    (63, "GIVELOCK", AttrFlags::IS_LOCK),
    (85, "TPORTLOCK", AttrFlags::IS_LOCK),
    (86, "DROPLOCK", AttrFlags::IS_LOCK),
    (87, "RECEIVELOCK", AttrFlags::IS_LOCK),
    (93, "LINKLOCK", AttrFlags::IS_LOCK),
    (94, "TELOUTLOCK", AttrFlags::IS_LOCK),
    (97, "USERLOCK", AttrFlags::IS_LOCK),
    (98, "PARENTLOCK", AttrFlags::IS_LOCK),
    (99, "CONTROLLOCK", AttrFlags::IS_LOCK),
];

/// Maps attribute names and numbers to their definitions.
#[derive(Clone, Debug)]
pub struct AttrRegistry {
    by_number: im::HashMap<AttrNum, AttrDef>,
    by_name: im::HashMap<String, AttrNum>,
    next_user: u32,
}

impl Default for AttrRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AttrRegistry {
    /// Creates a registry holding the builtin attributes.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            by_number: im::HashMap::new(),
            by_name: im::HashMap::new(),
            next_user: AttrNum::USER_START.number(),
        };
        for &(number, name, flags) in BUILTINS {
            registry.insert(AttrDef::new(AttrNum::new(number), name, flags));
        }
        registry
    }

    fn insert(&mut self, def: AttrDef) {
        self.by_name.insert(def.name.clone(), def.number);
        self.by_number.insert(def.number, def);
    }

    /// Defines a user attribute and returns its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or cannot be written in a lock
    /// (empty, or containing whitespace or lock syntax).
    pub fn define(&mut self, name: &str, flags: AttrFlags) -> Result<AttrNum> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_graphic() && !"!&|@=+$()#:/*".contains(c));
        if !valid {
            return Err(Error::new(ErrorKind::InvalidAttributeName(name.to_string())));
        }
        let upper = name.to_ascii_uppercase();
        if self.by_name.contains_key(&upper) {
            return Err(Error::duplicate_attribute(upper));
        }
        let number = AttrNum::new(self.next_user);
        self.next_user += 1;
        self.insert(AttrDef::new(number, &upper, flags));
        Ok(number)
    }

    /// Adds another name for an existing attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute is unknown or the alias is taken.
    pub fn alias(&mut self, number: AttrNum, alias: &str) -> Result<()> {
        if !self.by_number.contains_key(&number) {
            return Err(Error::unknown_attribute(number.to_string()));
        }
        let upper = alias.to_ascii_uppercase();
        if self.by_name.contains_key(&upper) {
            return Err(Error::duplicate_attribute(upper));
        }
        self.by_name.insert(upper, number);
        Ok(())
    }

    /// Looks up a definition by number.
    #[must_use]
    pub fn by_number(&self, number: AttrNum) -> Option<&AttrDef> {
        self.by_number.get(&number)
    }

    /// Looks up a definition by name, ignoring case.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&AttrDef> {
        self.by_name
            .get(&name.to_ascii_uppercase())
            .and_then(|n| self.by_number.get(n))
    }

    /// Number of defined attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    /// Returns true if nothing is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }
}

/// Attribute values keyed by object and attribute number.
#[derive(Clone, Debug, Default)]
pub struct AttrStore {
    values: im::HashMap<(Dbref, AttrNum), AttrValue>,
}

impl AttrStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value set directly on `obj`, if any.
    #[must_use]
    pub fn get(&self, obj: Dbref, attr: AttrNum) -> Option<&AttrValue> {
        self.values.get(&(obj, attr))
    }

    /// Sets a value. Setting empty text clears the attribute.
    pub fn set(&mut self, obj: Dbref, attr: AttrNum, value: AttrValue) {
        if value.is_empty() {
            self.values.remove(&(obj, attr));
        } else {
            self.values.insert((obj, attr), value);
        }
    }

    /// Removes a value, returning it.
    pub fn clear(&mut self, obj: Dbref, attr: AttrNum) -> Option<AttrValue> {
        self.values.remove(&(obj, attr))
    }

    /// Removes every value stored on `obj`.
    pub fn clear_object(&mut self, obj: Dbref) {
        self.values.retain(|(o, _), _| *o != obj);
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
