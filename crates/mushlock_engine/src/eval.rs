//! Lock evaluation.
//!
//! Evaluation is read-only except for two places: softcode run by an
//! attribute-evaluation lock, which runs with the global registers saved and
//! restored around it, and the broken-lock notice sent when indirection goes
//! wrong.

use mushlock_foundation::{AttrDef, AttrNum, Dbref, strings_equal, wild_match};

use crate::boolexp::{BoolExp, LockOperand};
use crate::config::LockConfig;
use crate::error::ParseError;
use crate::guard::RegisterGuard;
use crate::host::{ContentsIter, LockHost, member};
use crate::parser::LockParser;

const BROKEN_LOCK: &str = "Sorry, broken lock!";

/// Evaluation state for one top-level check.
pub struct Evaluator<'a, H: LockHost> {
    host: &'a mut H,
    config: &'a LockConfig,
    actor: Dbref,
    target: Dbref,
    origin: Dbref,
    nest: usize,
    depth: usize,
    originator: Option<Dbref>,
}

impl<'a, H: LockHost> Evaluator<'a, H> {
    /// Creates an evaluator checking `actor` against a lock on `target`,
    /// with attribute visibility judged from `origin`.
    pub fn new(
        host: &'a mut H,
        config: &'a LockConfig,
        actor: Dbref,
        target: Dbref,
        origin: Dbref,
    ) -> Self {
        Self {
            host,
            config,
            actor,
            target,
            origin,
            nest: 0,
            depth: 0,
            originator: None,
        }
    }

    /// Evaluates `exp`.
    pub fn eval(&mut self, exp: &BoolExp) -> bool {
        self.depth += 1;
        let result = self.eval_node(exp);
        self.depth -= 1;
        result
    }

    fn eval_node(&mut self, exp: &BoolExp) -> bool {
        match exp {
            BoolExp::True => true,
            BoolExp::And(left, right) => self.eval(left) && self.eval(right),
            BoolExp::Or(left, right) => self.eval(left) || self.eval(right),
            BoolExp::Not(inner) => !self.eval(inner),
            BoolExp::Const(obj) => *obj == self.actor || member(&*self.host, self.actor, *obj),
            BoolExp::Owner(obj) => self.host.owner(*obj) == self.host.owner(self.actor),
            BoolExp::Is(LockOperand::Object(obj)) => *obj == self.actor,
            BoolExp::Is(LockOperand::Attr { attr, pattern }) => {
                self.lookup(*attr)
                    .is_some_and(|def| self.check_attr(self.actor, &def, pattern))
            }
            BoolExp::Carry(LockOperand::Object(obj)) => member(&*self.host, *obj, self.actor),
            BoolExp::Carry(LockOperand::Attr { attr, pattern }) => {
                self.lookup(*attr)
                    .is_some_and(|def| self.inventory_has_attr(&def, pattern))
            }
            BoolExp::AttrCheck { attr, pattern } => self.lookup(*attr).is_some_and(|def| {
                self.check_attr(self.actor, &def, pattern) || self.inventory_has_attr(&def, pattern)
            }),
            BoolExp::AttrEval { attr, expected } => match self.lookup(*attr) {
                Some(def) => self.eval_attr(&def, expected),
                None => false,
            },
            BoolExp::Indirect(obj) => self.indirect(*obj),
        }
    }

    fn lookup(&self, attr: AttrNum) -> Option<AttrDef> {
        self.host.attr_by_number(attr)
    }

    /// Tests whether `attr` on `obj` is visible from the origin and matches
    /// `pattern`. Names and control locks are always visible.
    fn check_attr(&self, obj: Dbref, def: &AttrDef, pattern: &str) -> bool {
        let value = self.host.pget_attr(obj, def.number);
        let visible = def.number == AttrNum::LCONTROL
            || self.host.can_see_attr(self.origin, obj, def, &value)
            || def.number == AttrNum::NAME;
        visible && wild_match(pattern, &value.text)
    }

    fn inventory_has_attr(&self, def: &AttrDef, pattern: &str) -> bool {
        ContentsIter::new(&*self.host, self.actor).any(|item| self.check_attr(item, def, pattern))
    }

    /// Runs the attribute as softcode and compares its output.
    fn eval_attr(&mut self, def: &AttrDef, expected: &str) -> bool {
        let mut source = self.origin;
        let mut value = self.host.pget_attr(source, def.number);
        if value.is_empty() {
            source = self.target;
            value = self.host.pget_attr(source, def.number);
        }
        if value.is_empty() {
            return false;
        }
        let visible = def.number == AttrNum::NAME
            || def.number == AttrNum::LCONTROL
            || self.host.can_read_attr(source, source, def, &value);
        if !visible {
            return false;
        }
        let caller = self.originator.unwrap_or(self.actor);
        let actor = self.actor;
        let output = {
            let mut host = RegisterGuard::new(&mut *self.host);
            host.eval_expression(source, caller, actor, &value.text)
        };
        strings_equal(&output, expected, self.config.space_compress)
    }

    /// Evaluates the default lock stored on `obj` in place of this node.
    fn indirect(&mut self, obj: Dbref) -> bool {
        self.nest += 1;
        let result = self.indirect_body(obj);
        self.nest -= 1;
        result
    }

    fn indirect_body(&mut self, obj: Dbref) -> bool {
        if self.nest >= self.config.lock_nest_limit {
            self.broken_lock("lock exceeded recursion limit", obj);
            return false;
        }
        if !self.host.is_good_obj(obj) {
            self.broken_lock("lock had bad indirection", obj);
            return false;
        }
        let text = self.host.get_attr(obj, AttrNum::LOCK).text;
        let parsed = LockParser::new(&mut *self.host, self.config, self.actor, &text, true)
            .starting_depth(self.depth)
            .parse();
        match parsed {
            Ok(exp) => {
                let saved = self.originator.replace(self.target);
                let result = self.eval(&exp);
                self.originator = saved;
                result
            }
            Err(err @ ParseError::DepthExceeded { .. }) => {
                tracing::warn!(actor = %self.actor, %obj, error = %err, "lock too deeply nested");
                self.broken_lock("lock exceeded depth limit", obj);
                false
            }
            Err(err) => {
                tracing::debug!(actor = %self.actor, %obj, error = %err, "indirect lock unparseable, passing");
                true
            }
        }
    }

    fn broken_lock(&mut self, problem: &str, obj: Dbref) {
        let actor_name = self.host.name(self.actor).unwrap_or("?").to_string();
        let located = self
            .host
            .object_type(self.actor)
            .is_some_and(mushlock_foundation::ObjectType::has_location);
        if self.config.log_location && located {
            let place = self.host.location(self.actor);
            let place_name = self.host.name(place).unwrap_or("?");
            tracing::warn!(
                actor = %self.actor,
                %obj,
                nest = self.nest,
                "{actor_name}(#{}) in {place_name}(#{}): {problem}",
                self.actor.number(),
                place.number()
            );
        } else {
            tracing::warn!(
                actor = %self.actor,
                %obj,
                nest = self.nest,
                "{actor_name}(#{}): {problem}",
                self.actor.number()
            );
        }
        self.host.notify(self.actor, BROKEN_LOCK);
    }
}
