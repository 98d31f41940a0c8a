//! Attribute visibility rules.
//!
//! `can_read_attr` decides whether a viewer may read an attribute value;
//! `can_see_attr` additionally hides lock attributes, which are only shown
//! through the lock commands.

use mushlock_foundation::{AttrDef, AttrFlags, AttrValue, Dbref, ObjectFlags};

use crate::object::ObjectStore;

fn owner_of(objects: &ObjectStore, obj: Dbref) -> Dbref {
    objects.get(obj).map_or(Dbref::NOTHING, |o| o.owner)
}

fn flags_of(objects: &ObjectStore, obj: Dbref) -> ObjectFlags {
    objects.get(obj).map(|o| o.flags).unwrap_or_default()
}

/// Returns true if `player` may examine `thing`.
#[must_use]
pub fn examinable(objects: &ObjectStore, player: Dbref, thing: Dbref) -> bool {
    flags_of(objects, thing).contains(ObjectFlags::VISUAL)
        || flags_of(objects, player).sees_all()
        || owner_of(objects, player) == owner_of(objects, thing)
}

/// Returns true if an attribute with combined `flags` and value owner
/// `value_owner` is visible to `player` on `thing`.
#[must_use]
pub fn visible_attr(
    objects: &ObjectStore,
    player: Dbref,
    thing: Dbref,
    value_owner: Dbref,
    flags: AttrFlags,
) -> bool {
    if flags.contains(AttrFlags::VISUAL) {
        return true;
    }
    let hidden = (!examinable(objects, player, thing) && owner_of(objects, player) != value_owner)
        || (flags.contains(AttrFlags::MDARK) && !flags_of(objects, player).sees_all())
        || (flags.contains(AttrFlags::DARK) && player != Dbref::GOD);
    !hidden
}

/// Returns true if `player` may read the value of `def` on `thing`.
#[must_use]
pub fn can_read_attr(
    objects: &ObjectStore,
    player: Dbref,
    thing: Dbref,
    def: &AttrDef,
    value: &AttrValue,
) -> bool {
    !def.flags.contains(AttrFlags::INTERNAL)
        && !value.flags.contains(AttrFlags::STRUCTURE)
        && visible_attr(objects, player, thing, value.owner, def.flags | value.flags)
}

/// Returns true if `player` may see `def` on `thing` in listings.
#[must_use]
pub fn can_see_attr(
    objects: &ObjectStore,
    player: Dbref,
    thing: Dbref,
    def: &AttrDef,
    value: &AttrValue,
) -> bool {
    !def.flags.contains(AttrFlags::IS_LOCK) && can_read_attr(objects, player, thing, def, value)
}
