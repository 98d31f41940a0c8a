//! What the lock engine needs from the game.
//!
//! The engine never touches a database directly. It asks the host for object
//! relationships, attribute values and their visibility, name matching,
//! player notifications, and softcode evaluation.

use std::collections::HashSet;

use mushlock_foundation::{
    AttrDef, AttrNum, AttrValue, Dbref, MatchResult, ObjectFlags, ObjectType, Result,
};

/// Read access to objects and their relationships.
pub trait ObjectGraph {
    /// Returns true if `obj` is a live object.
    fn is_good_obj(&self, obj: Dbref) -> bool;

    /// Owner of `obj`, or `NOTHING`.
    fn owner(&self, obj: Dbref) -> Dbref;

    /// Location of `obj`, or `NOTHING`.
    fn location(&self, obj: Dbref) -> Dbref;

    /// First object in `obj`'s contents chain, or `NOTHING`.
    fn contents(&self, obj: Dbref) -> Dbref;

    /// Next object in whichever chain holds `obj`, or `NOTHING`.
    fn next(&self, obj: Dbref) -> Dbref;

    /// Name of `obj`.
    fn name(&self, obj: Dbref) -> Option<&str>;

    /// Type of `obj`.
    fn object_type(&self, obj: Dbref) -> Option<ObjectType>;

    /// Flags of `obj`; empty for anything not live.
    fn flags(&self, obj: Dbref) -> ObjectFlags;

    /// Returns true for the single highest-privilege player.
    fn is_god(&self, obj: Dbref) -> bool {
        obj == Dbref::GOD
    }
}

/// Attribute lookup and visibility.
pub trait AttributeSource {
    /// Looks up a definition by number.
    fn attr_by_number(&self, attr: AttrNum) -> Option<AttrDef>;

    /// Looks up a definition by name, ignoring case.
    fn attr_by_name(&self, name: &str) -> Option<AttrDef>;

    /// Fetches `attr` as stored on `obj` itself.
    fn get_attr(&self, obj: Dbref, attr: AttrNum) -> AttrValue;

    /// Fetches `attr` from `obj` or the nearest ancestor that has it.
    fn pget_attr(&self, obj: Dbref, attr: AttrNum) -> AttrValue;

    /// Returns true if `viewer` may see `value` of `def` on `thing`.
    fn can_see_attr(&self, viewer: Dbref, thing: Dbref, def: &AttrDef, value: &AttrValue) -> bool;

    /// Returns true if `viewer` may read `value` of `def` on `thing`.
    fn can_read_attr(&self, viewer: Dbref, thing: Dbref, def: &AttrDef, value: &AttrValue)
    -> bool;
}

/// Storage for lock text.
pub trait LockStore {
    /// Stores `text` in lock attribute `attr` on `thing`.
    ///
    /// # Errors
    ///
    /// Returns an error if the object or attribute cannot hold the lock.
    fn store_lock(&mut self, thing: Dbref, attr: AttrNum, text: &str) -> Result<()>;
}

/// Resolves typed names with ambient match state.
pub trait NameMatcher {
    /// Snapshot of the in-progress match.
    type MatchState;

    /// Captures the in-progress match.
    fn save_match_state(&self) -> Self::MatchState;

    /// Reinstates a captured match.
    fn restore_match_state(&mut self, state: Self::MatchState);

    /// Resolves `name` from `player`'s point of view, replacing the
    /// in-progress match.
    fn match_everything(&mut self, player: Dbref, name: &str) -> MatchResult;
}

/// Sends messages to players.
pub trait Notifier {
    /// Tells `player` something.
    fn notify(&mut self, player: Dbref, message: &str);
}

/// Runs softcode.
pub trait ScriptEvaluator {
    /// Snapshot of the global registers.
    type Registers;

    /// Captures the global registers.
    fn save_registers(&self) -> Self::Registers;

    /// Reinstates captured registers.
    fn restore_registers(&mut self, registers: Self::Registers);

    /// Evaluates `text` as code run by `executor`, called by `caller`, on
    /// behalf of `enactor`.
    fn eval_expression(&mut self, executor: Dbref, caller: Dbref, enactor: Dbref, text: &str)
    -> String;
}

/// Everything lock parsing and evaluation needs.
pub trait LockHost: ObjectGraph + AttributeSource + NameMatcher + Notifier + ScriptEvaluator {}

impl<T> LockHost for T where T: ObjectGraph + AttributeSource + NameMatcher + Notifier + ScriptEvaluator
{}

/// Walks a contents chain.
///
/// Stops at `NOTHING`, at an object that links to itself, and at any object
/// already visited.
pub struct ContentsIter<'a, H: ObjectGraph + ?Sized> {
    host: &'a H,
    cur: Dbref,
    seen: HashSet<Dbref>,
}

impl<'a, H: ObjectGraph + ?Sized> ContentsIter<'a, H> {
    /// Iterates over the contents of `container`.
    pub fn new(host: &'a H, container: Dbref) -> Self {
        Self {
            host,
            cur: host.contents(container),
            seen: HashSet::new(),
        }
    }
}

impl<H: ObjectGraph + ?Sized> Iterator for ContentsIter<'_, H> {
    type Item = Dbref;

    fn next(&mut self) -> Option<Dbref> {
        let cur = self.cur;
        if !cur.is_valid_index() || !self.seen.insert(cur) {
            return None;
        }
        let next = self.host.next(cur);
        self.cur = if next == cur { Dbref::NOTHING } else { next };
        Some(cur)
    }
}

/// Returns true if `obj` appears in `container`'s contents.
pub fn member<H: ObjectGraph + ?Sized>(host: &H, obj: Dbref, container: Dbref) -> bool {
    ContentsIter::new(host, container).any(|item| item == obj)
}
