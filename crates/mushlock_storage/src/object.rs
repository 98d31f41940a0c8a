//! Object table with singly-linked contents and exit chains.
//!
//! Every container keeps the head of its contents chain (and rooms the head
//! of their exit chain); each object links to its next sibling through
//! `next`. A chain ends at [`Dbref::NOTHING`].

use mushlock_foundation::{Dbref, Error, ErrorKind, ObjectFlags, ObjectType, Result};

/// One object slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    /// Display name. Exit names are `;`-separated alias lists.
    pub name: String,
    /// What kind of object this is.
    pub kind: ObjectType,
    /// Who owns the object. Players own themselves.
    pub owner: Dbref,
    /// Where the object is (for exits: their source room).
    pub location: Dbref,
    /// Object this one inherits attributes from.
    pub parent: Dbref,
    /// Behavior flags.
    pub flags: ObjectFlags,
    /// Head of the contents chain.
    pub contents: Dbref,
    /// Head of the exit chain (rooms only).
    pub exits: Dbref,
    /// Next sibling in whichever chain holds this object.
    pub next: Dbref,
}

impl Object {
    fn new(name: &str, kind: ObjectType, owner: Dbref) -> Self {
        Self {
            name: name.to_string(),
            kind,
            owner,
            location: Dbref::NOTHING,
            parent: Dbref::NOTHING,
            flags: ObjectFlags::empty(),
            contents: Dbref::NOTHING,
            exits: Dbref::NOTHING,
            next: Dbref::NOTHING,
        }
    }
}

/// Stores objects indexed by dbref.
#[derive(Clone, Debug, Default)]
pub struct ObjectStore {
    objects: im::Vector<Object>,
}

impl ObjectStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots, garbage included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no objects were ever created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Allocates a new unlinked object and returns its reference.
    ///
    /// A `NOTHING` owner makes the object own itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is full.
    pub fn allocate(&mut self, name: &str, kind: ObjectType, owner: Dbref) -> Result<Dbref> {
        let number = i32::try_from(self.objects.len())
            .map_err(|_| Error::new(ErrorKind::Internal("object table full".into())))?;
        let obj = Dbref::new(number);
        let owner = if owner.is_nothing() { obj } else { owner };
        self.objects.push_back(Object::new(name, kind, owner));
        Ok(obj)
    }

    /// Returns the object at `obj`, garbage included.
    #[must_use]
    pub fn get(&self, obj: Dbref) -> Option<&Object> {
        obj.index().and_then(|i| self.objects.get(i))
    }

    /// Returns a mutable reference to the object at `obj`.
    ///
    /// # Errors
    ///
    /// Returns an error if no slot exists at `obj`.
    pub fn get_mut(&mut self, obj: Dbref) -> Result<&mut Object> {
        obj.index()
            .and_then(|i| self.objects.get_mut(i))
            .ok_or_else(|| Error::object_not_found(obj))
    }

    /// Returns true if `obj` names a live object.
    #[must_use]
    pub fn is_good(&self, obj: Dbref) -> bool {
        self.get(obj).is_some_and(|o| o.kind != ObjectType::Garbage)
    }

    /// Returns the live object at `obj`.
    ///
    /// # Errors
    ///
    /// Returns an error if `obj` is out of range or garbage.
    pub fn live(&self, obj: Dbref) -> Result<&Object> {
        match self.get(obj) {
            Some(o) if o.kind != ObjectType::Garbage => Ok(o),
            Some(_) => Err(Error::invalid_object(obj)),
            None => Err(Error::object_not_found(obj)),
        }
    }

    /// Iterates over all live object references.
    pub fn iter_live(&self) -> impl Iterator<Item = Dbref> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.kind != ObjectType::Garbage)
            .filter_map(|(i, _)| i32::try_from(i).ok().map(Dbref::new))
    }

    /// Collects a chain starting at `head`, stopping at `NOTHING` or a repeat.
    #[must_use]
    pub fn chain(&self, head: Dbref) -> Vec<Dbref> {
        let mut items = Vec::new();
        let mut cur = head;
        while let Some(o) = self.get(cur) {
            if items.contains(&cur) {
                break;
            }
            items.push(cur);
            cur = o.next;
        }
        items
    }

    /// Links `obj` at the head of `container`'s contents (or exits) chain.
    ///
    /// # Errors
    ///
    /// Returns an error if either reference is not a live object.
    pub fn link(&mut self, obj: Dbref, container: Dbref) -> Result<()> {
        let is_exit = self.live(obj)?.kind == ObjectType::Exit;
        let head = {
            let c = self.live(container)?;
            if is_exit { c.exits } else { c.contents }
        };
        {
            let o = self.get_mut(obj)?;
            o.next = head;
            o.location = container;
        }
        let c = self.get_mut(container)?;
        if is_exit {
            c.exits = obj;
        } else {
            c.contents = obj;
        }
        Ok(())
    }

    /// Removes `obj` from its location's chain, leaving it nowhere.
    ///
    /// # Errors
    ///
    /// Returns an error if `obj` does not exist.
    pub fn unlink(&mut self, obj: Dbref) -> Result<()> {
        let (loc, next, is_exit) = {
            let o = self.get(obj).ok_or_else(|| Error::object_not_found(obj))?;
            (o.location, o.next, o.kind == ObjectType::Exit)
        };
        if let Some(container) = self.get(loc) {
            let head = if is_exit { container.exits } else { container.contents };
            if head == obj {
                let c = self.get_mut(loc)?;
                if is_exit {
                    c.exits = next;
                } else {
                    c.contents = next;
                }
            } else {
                let prev = self
                    .chain(head)
                    .into_iter()
                    .find(|d| self.get(*d).is_some_and(|o| o.next == obj));
                if let Some(prev) = prev {
                    self.get_mut(prev)?.next = next;
                }
            }
        }
        let o = self.get_mut(obj)?;
        o.next = Dbref::NOTHING;
        o.location = Dbref::NOTHING;
        Ok(())
    }

    /// Returns true if `inner` is `outer` or is (transitively) located in it.
    #[must_use]
    pub fn is_within(&self, inner: Dbref, outer: Dbref) -> bool {
        let mut cur = inner;
        // Bounded by table size; location loops are possible in a corrupt table.
        for _ in 0..=self.objects.len() {
            if cur == outer {
                return true;
            }
            match self.get(cur) {
                Some(o) => cur = o.location,
                None => return false,
            }
        }
        false
    }
}
