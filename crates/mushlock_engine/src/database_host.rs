//! Host traits for the in-memory [`Database`].

use mushlock_foundation::{
    AttrDef, AttrNum, AttrValue, Dbref, MatchResult, ObjectFlags, ObjectType, Result,
};
use mushlock_storage::{Database, MatchState, Registers};

use crate::host::{AttributeSource, LockStore, NameMatcher, Notifier, ObjectGraph, ScriptEvaluator};

impl ObjectGraph for Database {
    fn is_good_obj(&self, obj: Dbref) -> bool {
        self.is_good(obj)
    }

    fn owner(&self, obj: Dbref) -> Dbref {
        self.object(obj).map_or(Dbref::NOTHING, |o| o.owner)
    }

    fn location(&self, obj: Dbref) -> Dbref {
        self.object(obj).map_or(Dbref::NOTHING, |o| o.location)
    }

    fn contents(&self, obj: Dbref) -> Dbref {
        self.object(obj).map_or(Dbref::NOTHING, |o| o.contents)
    }

    fn next(&self, obj: Dbref) -> Dbref {
        self.object(obj).map_or(Dbref::NOTHING, |o| o.next)
    }

    fn name(&self, obj: Dbref) -> Option<&str> {
        self.object(obj).map(|o| o.name.as_str())
    }

    fn object_type(&self, obj: Dbref) -> Option<ObjectType> {
        self.object(obj).map(|o| o.kind)
    }

    fn flags(&self, obj: Dbref) -> ObjectFlags {
        self.object(obj).map(|o| o.flags).unwrap_or_default()
    }
}

impl AttributeSource for Database {
    fn attr_by_number(&self, attr: AttrNum) -> Option<AttrDef> {
        Database::attr_by_number(self, attr).cloned()
    }

    fn attr_by_name(&self, name: &str) -> Option<AttrDef> {
        Database::attr_by_name(self, name).cloned()
    }

    fn get_attr(&self, obj: Dbref, attr: AttrNum) -> AttrValue {
        Database::get_attr(self, obj, attr)
    }

    fn pget_attr(&self, obj: Dbref, attr: AttrNum) -> AttrValue {
        Database::pget_attr(self, obj, attr)
    }

    fn can_see_attr(&self, viewer: Dbref, thing: Dbref, def: &AttrDef, value: &AttrValue) -> bool {
        Database::can_see_attr(self, viewer, thing, def, value)
    }

    fn can_read_attr(
        &self,
        viewer: Dbref,
        thing: Dbref,
        def: &AttrDef,
        value: &AttrValue,
    ) -> bool {
        Database::can_read_attr(self, viewer, thing, def, value)
    }
}

impl LockStore for Database {
    fn store_lock(&mut self, thing: Dbref, attr: AttrNum, text: &str) -> Result<()> {
        self.set_attr(thing, attr, text, None)
    }
}

impl NameMatcher for Database {
    type MatchState = MatchState;

    fn save_match_state(&self) -> MatchState {
        self.current_match().clone()
    }

    fn restore_match_state(&mut self, state: MatchState) {
        self.set_current_match(state);
    }

    fn match_everything(&mut self, player: Dbref, name: &str) -> MatchResult {
        Database::match_everything(self, player, name)
    }
}

impl Notifier for Database {
    fn notify(&mut self, player: Dbref, message: &str) {
        Database::notify(self, player, message);
    }
}

impl ScriptEvaluator for Database {
    type Registers = Registers;

    fn save_registers(&self) -> Registers {
        self.registers().clone()
    }

    fn restore_registers(&mut self, registers: Registers) {
        *self.registers_mut() = registers;
    }

    fn eval_expression(
        &mut self,
        executor: Dbref,
        caller: Dbref,
        enactor: Dbref,
        text: &str,
    ) -> String {
        Database::eval_expression(self, executor, caller, enactor, text)
    }
}
