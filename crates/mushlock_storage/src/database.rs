//! The game database: objects, attributes, and the ambient state commands
//! run with.
//!
//! The object and attribute tables sit behind `Arc` and are copied on write,
//! so cloning a `Database` is cheap and yields an independent snapshot.

use std::sync::Arc;

use mushlock_foundation::{
    AttrDef, AttrFlags, AttrNum, AttrValue, Dbref, Error, ErrorContext, MatchResult, ObjectFlags,
    ObjectType, Result,
};

use crate::attribute::{AttrRegistry, AttrStore};
use crate::matcher::{self, MatchState};
use crate::object::{Object, ObjectStore};
use crate::softcode::{self, EvalContext, Registers};
use crate::visibility;

/// Maximum number of parent links followed when inheriting attributes.
pub const MAX_PARENT_DEPTH: usize = 10;

/// A message queued for a player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Who receives it.
    pub player: Dbref,
    /// What they are told.
    pub message: String,
}

/// In-memory game database.
#[derive(Clone, Debug, Default)]
pub struct Database {
    objects: Arc<ObjectStore>,
    registry: Arc<AttrRegistry>,
    attrs: Arc<AttrStore>,
    current_match: MatchState,
    registers: Registers,
    outbox: im::Vector<Notification>,
}

impl Database {
    /// Creates an empty database with the builtin attributes registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Objects ---

    /// Returns the object table.
    #[must_use]
    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// Returns the object at `obj`, garbage included.
    #[must_use]
    pub fn object(&self, obj: Dbref) -> Option<&Object> {
        self.objects.get(obj)
    }

    /// Returns true if `obj` is a live object.
    #[must_use]
    pub fn is_good(&self, obj: Dbref) -> bool {
        self.objects.is_good(obj)
    }

    /// Number of object slots, garbage included.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Creates an object and places it at `location` (or nowhere).
    ///
    /// Players and objects created with a `NOTHING` owner own themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if `owner` or `location` is given but not live.
    pub fn create(
        &mut self,
        name: &str,
        kind: ObjectType,
        owner: Dbref,
        location: Dbref,
    ) -> Result<Dbref> {
        let owner = if kind == ObjectType::Player {
            Dbref::NOTHING
        } else {
            owner
        };
        if !owner.is_nothing() {
            self.objects.live(owner)?;
        }
        if !location.is_nothing() {
            self.objects.live(location)?;
        }
        let obj = Arc::make_mut(&mut self.objects).allocate(name, kind, owner)?;
        if !location.is_nothing() {
            Arc::make_mut(&mut self.objects).link(obj, location)?;
        }
        tracing::debug!(%obj, %kind, name, %location, "created object");
        Ok(obj)
    }

    /// Moves `obj` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if either object is not live, or if `dest` is `obj`
    /// or lies inside it.
    pub fn move_to(&mut self, obj: Dbref, dest: Dbref) -> Result<()> {
        self.objects.live(obj)?;
        self.objects.live(dest)?;
        if self.objects.is_within(dest, obj) {
            return Err(Error::containment_cycle(obj, dest)
                .with_context(ErrorContext::new().with_actor(obj).with_operation("move")));
        }
        let objects = Arc::make_mut(&mut self.objects);
        objects.unlink(obj)?;
        objects.link(obj, dest)?;
        tracing::debug!(%obj, %dest, "moved object");
        Ok(())
    }

    /// Destroys `obj`. Its contents are left nowhere and its attributes
    /// are removed.
    ///
    /// # Errors
    ///
    /// Returns an error if `obj` is not live.
    pub fn destroy(&mut self, obj: Dbref) -> Result<()> {
        let (contents, exits) = {
            let o = self.objects.live(obj)?;
            (self.objects.chain(o.contents), self.objects.chain(o.exits))
        };
        let objects = Arc::make_mut(&mut self.objects);
        for item in contents.into_iter().chain(exits) {
            objects.unlink(item)?;
        }
        objects.unlink(obj)?;
        let o = objects.get_mut(obj)?;
        o.kind = ObjectType::Garbage;
        o.flags = ObjectFlags::empty();
        o.parent = Dbref::NOTHING;
        Arc::make_mut(&mut self.attrs).clear_object(obj);
        tracing::debug!(%obj, "destroyed object");
        Ok(())
    }

    /// Renames `obj`.
    ///
    /// # Errors
    ///
    /// Returns an error if `obj` is not live.
    pub fn set_name(&mut self, obj: Dbref, name: &str) -> Result<()> {
        self.objects.live(obj)?;
        Arc::make_mut(&mut self.objects).get_mut(obj)?.name = name.to_string();
        Ok(())
    }

    /// Changes the owner of `obj`.
    ///
    /// # Errors
    ///
    /// Returns an error if either object is not live.
    pub fn set_owner(&mut self, obj: Dbref, owner: Dbref) -> Result<()> {
        self.objects.live(obj)?;
        self.objects.live(owner)?;
        Arc::make_mut(&mut self.objects).get_mut(obj)?.owner = owner;
        Ok(())
    }

    /// Sets flags on `obj`, keeping the ones already set.
    ///
    /// # Errors
    ///
    /// Returns an error if `obj` is not live.
    pub fn add_flags(&mut self, obj: Dbref, flags: ObjectFlags) -> Result<()> {
        self.objects.live(obj)?;
        Arc::make_mut(&mut self.objects).get_mut(obj)?.flags.insert(flags);
        Ok(())
    }

    /// Clears flags on `obj`.
    ///
    /// # Errors
    ///
    /// Returns an error if `obj` is not live.
    pub fn remove_flags(&mut self, obj: Dbref, flags: ObjectFlags) -> Result<()> {
        self.objects.live(obj)?;
        Arc::make_mut(&mut self.objects).get_mut(obj)?.flags.remove(flags);
        Ok(())
    }

    /// Sets the parent of `obj`. `NOTHING` removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if an object is not live or the parent chain would
    /// loop back to `obj`.
    pub fn set_parent(&mut self, obj: Dbref, parent: Dbref) -> Result<()> {
        self.objects.live(obj)?;
        if !parent.is_nothing() {
            self.objects.live(parent)?;
            let mut cur = parent;
            for _ in 0..=self.objects.len() {
                if cur == obj {
                    return Err(Error::containment_cycle(obj, parent)
                        .with_context(ErrorContext::new().with_operation("set_parent")));
                }
                match self.objects.get(cur) {
                    Some(o) if !o.parent.is_nothing() => cur = o.parent,
                    _ => break,
                }
            }
        }
        Arc::make_mut(&mut self.objects).get_mut(obj)?.parent = parent;
        Ok(())
    }

    // --- Attributes ---

    /// Returns the attribute registry.
    #[must_use]
    pub fn registry(&self) -> &AttrRegistry {
        &self.registry
    }

    /// Defines a user attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or not usable in locks.
    pub fn define_attr(&mut self, name: &str, flags: AttrFlags) -> Result<AttrNum> {
        let number = Arc::make_mut(&mut self.registry).define(name, flags)?;
        tracing::debug!(name, %number, "defined attribute");
        Ok(number)
    }

    /// Looks up an attribute definition by number.
    #[must_use]
    pub fn attr_by_number(&self, attr: AttrNum) -> Option<&AttrDef> {
        self.registry.by_number(attr)
    }

    /// Looks up an attribute definition by name, ignoring case.
    #[must_use]
    pub fn attr_by_name(&self, name: &str) -> Option<&AttrDef> {
        self.registry.by_name(name)
    }

    /// Stores `text` in `attr` on `obj`. The value is owned by `owner`, or
    /// by the object's owner when `None`. Empty text clears the attribute.
    ///
    /// Setting `NAME` renames the object.
    ///
    /// # Errors
    ///
    /// Returns an error if `obj` is not live or `attr` is not defined.
    pub fn set_attr(
        &mut self,
        obj: Dbref,
        attr: AttrNum,
        text: &str,
        owner: Option<Dbref>,
    ) -> Result<()> {
        let object_owner = self.objects.live(obj)?.owner;
        if self.registry.by_number(attr).is_none() {
            return Err(Error::unknown_attribute(attr.to_string()));
        }
        if attr == AttrNum::NAME {
            return self.set_name(obj, text);
        }
        let flags = self
            .attrs
            .get(obj, attr)
            .map(|v| v.flags)
            .unwrap_or_default();
        let value = AttrValue::new(text, owner.unwrap_or(object_owner), flags);
        Arc::make_mut(&mut self.attrs).set(obj, attr, value);
        tracing::trace!(%obj, %attr, "set attribute");
        Ok(())
    }

    /// Replaces the per-value flags of `attr` on `obj`.
    ///
    /// # Errors
    ///
    /// Returns an error if `obj` is not live or has no value for `attr`.
    pub fn set_attr_flags(&mut self, obj: Dbref, attr: AttrNum, flags: AttrFlags) -> Result<()> {
        self.objects.live(obj)?;
        let mut value = self
            .attrs
            .get(obj, attr)
            .cloned()
            .ok_or_else(|| Error::unknown_attribute(attr.to_string()))?;
        value.flags = flags;
        Arc::make_mut(&mut self.attrs).set(obj, attr, value);
        Ok(())
    }

    /// Removes `attr` from `obj`.
    ///
    /// # Errors
    ///
    /// Returns an error if `obj` is not live.
    pub fn clear_attr(&mut self, obj: Dbref, attr: AttrNum) -> Result<()> {
        self.objects.live(obj)?;
        Arc::make_mut(&mut self.attrs).clear(obj, attr);
        Ok(())
    }

    /// Fetches `attr` as stored on `obj` itself.
    ///
    /// `NAME` always yields the object's name. Unset attributes yield an
    /// empty value.
    #[must_use]
    pub fn get_attr(&self, obj: Dbref, attr: AttrNum) -> AttrValue {
        if attr == AttrNum::NAME {
            return self.objects.get(obj).map_or_else(AttrValue::empty, |o| {
                AttrValue::new(o.name.clone(), o.owner, AttrFlags::empty())
            });
        }
        self.attrs.get(obj, attr).cloned().unwrap_or_default()
    }

    /// Fetches `attr` from `obj` or the nearest ancestor that has it.
    ///
    /// Values flagged `PRIVATE` are not inherited, and neither are values of
    /// attributes whose definition is `PRIVATE`.
    #[must_use]
    pub fn pget_attr(&self, obj: Dbref, attr: AttrNum) -> AttrValue {
        if attr == AttrNum::NAME {
            return self.get_attr(obj, attr);
        }
        let def_private = self
            .registry
            .by_number(attr)
            .is_some_and(|d| d.flags.contains(AttrFlags::PRIVATE));
        let mut cur = obj;
        for level in 0..=MAX_PARENT_DEPTH {
            if let Some(value) = self.attrs.get(cur, attr) {
                let private = def_private || value.flags.contains(AttrFlags::PRIVATE);
                if level == 0 || !private {
                    return value.clone();
                }
            }
            match self.objects.get(cur) {
                Some(o) if self.objects.is_good(o.parent) => cur = o.parent,
                _ => break,
            }
        }
        AttrValue::empty()
    }

    /// Returns true if `player` may read `value` of `def` on `thing`.
    #[must_use]
    pub fn can_read_attr(
        &self,
        player: Dbref,
        thing: Dbref,
        def: &AttrDef,
        value: &AttrValue,
    ) -> bool {
        visibility::can_read_attr(&self.objects, player, thing, def, value)
    }

    /// Returns true if `player` may see `value` of `def` on `thing`.
    #[must_use]
    pub fn can_see_attr(
        &self,
        player: Dbref,
        thing: Dbref,
        def: &AttrDef,
        value: &AttrValue,
    ) -> bool {
        visibility::can_see_attr(&self.objects, player, thing, def, value)
    }

    // --- Matching ---

    /// Resolves `name` from `player`'s point of view, recording it as the
    /// current match.
    pub fn match_everything(&mut self, player: Dbref, name: &str) -> MatchResult {
        let result = matcher::match_everything(&self.objects, player, name);
        self.current_match = MatchState {
            player,
            name: name.to_string(),
            result: Some(result),
        };
        result
    }

    /// Returns the in-progress match.
    #[must_use]
    pub fn current_match(&self) -> &MatchState {
        &self.current_match
    }

    /// Replaces the in-progress match.
    pub fn set_current_match(&mut self, state: MatchState) {
        self.current_match = state;
    }

    // --- Softcode ---

    /// Returns the global registers.
    #[must_use]
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Returns the global registers for writing.
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// Evaluates softcode `text` run by `executor` on behalf of `enactor`.
    pub fn eval_expression(
        &mut self,
        executor: Dbref,
        caller: Dbref,
        enactor: Dbref,
        text: &str,
    ) -> String {
        let ctx = EvalContext {
            executor,
            caller,
            enactor,
        };
        softcode::evaluate(&self.objects, &mut self.registers, ctx, text)
    }

    // --- Notifications ---

    /// Queues `message` for `player`.
    pub fn notify(&mut self, player: Dbref, message: &str) {
        tracing::trace!(%player, text = message, "notify");
        self.outbox.push_back(Notification {
            player,
            message: message.to_string(),
        });
    }

    /// Returns queued notifications without removing them.
    #[must_use]
    pub fn pending_notifications(&self) -> &im::Vector<Notification> {
        &self.outbox
    }

    /// Removes and returns every queued notification.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox).into_iter().collect()
    }
}
