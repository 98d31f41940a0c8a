//! Rendering lock trees back to text.

use std::fmt::Write;

use mushlock_foundation::{AttrNum, Dbref, ObjectFlags, ObjectType};

use crate::boolexp::{BoolExp, LockOperand};
use crate::host::{AttributeSource, ObjectGraph};

/// How to render object references.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnparseFormat {
    /// Storage form: `(#n)`. Parses back with an internal parse.
    Quiet,
    /// Informative form for examining: `Name(#n)`, or `Name` when the
    /// viewer cannot examine the object.
    Examine,
    /// Portable form: `*Name` for players, `Name` for things, `#n`
    /// otherwise.
    Decompile,
    /// Form that a user can feed back to the lock command: `*Name` for
    /// players, `#n` otherwise.
    Function,
}

/// Which operator encloses the node being rendered.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Outer {
    Top,
    And,
    Or,
    Not,
}

/// Renders `exp` as `player` would see it.
pub fn unparse<H>(host: &H, player: Dbref, exp: &BoolExp, format: UnparseFormat) -> String
where
    H: ObjectGraph + AttributeSource + ?Sized,
{
    let mut out = String::new();
    Unparser {
        host,
        player,
        format,
        out: &mut out,
    }
    .node(exp, Outer::Top);
    out
}

struct Unparser<'a, H: ?Sized> {
    host: &'a H,
    player: Dbref,
    format: UnparseFormat,
    out: &'a mut String,
}

impl<H> Unparser<'_, H>
where
    H: ObjectGraph + AttributeSource + ?Sized,
{
    fn node(&mut self, exp: &BoolExp, outer: Outer) {
        match exp {
            BoolExp::True => {
                if self.format == UnparseFormat::Examine {
                    self.out.push_str("*UNLOCKED*");
                }
            }
            BoolExp::And(left, right) => {
                let wrap = outer == Outer::Not;
                self.binary(left, right, '&', Outer::And, wrap);
            }
            BoolExp::Or(left, right) => {
                let wrap = matches!(outer, Outer::Not | Outer::And);
                self.binary(left, right, '|', Outer::Or, wrap);
            }
            BoolExp::Not(inner) => {
                self.out.push('!');
                self.node(inner, Outer::Not);
            }
            BoolExp::Indirect(obj) => {
                self.out.push('@');
                self.object(*obj);
            }
            BoolExp::Owner(obj) => {
                self.out.push('$');
                self.object(*obj);
            }
            BoolExp::Is(operand) => {
                self.out.push('=');
                self.operand(operand);
            }
            BoolExp::Carry(operand) => {
                self.out.push('+');
                self.operand(operand);
            }
            BoolExp::Const(obj) => self.object(*obj),
            BoolExp::AttrCheck { attr, pattern } => self.attribute(*attr, ':', pattern),
            BoolExp::AttrEval { attr, expected } => self.attribute(*attr, '/', expected),
        }
    }

    fn binary(&mut self, left: &BoolExp, right: &BoolExp, op: char, this: Outer, wrap: bool) {
        if wrap {
            self.out.push('(');
        }
        self.node(left, this);
        self.out.push(op);
        self.node(right, this);
        if wrap {
            self.out.push(')');
        }
    }

    fn operand(&mut self, operand: &LockOperand) {
        match operand {
            LockOperand::Object(obj) => self.object(*obj),
            LockOperand::Attr { attr, pattern } => self.attribute(*attr, ':', pattern),
        }
    }

    fn attribute(&mut self, attr: AttrNum, sep: char, text: &str) {
        match self.host.attr_by_number(attr) {
            Some(def) => self.out.push_str(&def.name),
            None => {
                let _ = write!(self.out, "{}", attr.number());
            }
        }
        self.out.push(sep);
        self.out.push_str(text);
    }

    fn object(&mut self, obj: Dbref) {
        match self.format {
            UnparseFormat::Quiet => self.quiet(obj),
            UnparseFormat::Examine => self.examine(obj),
            UnparseFormat::Decompile => match self.host.object_type(obj) {
                Some(ObjectType::Player) => self.player_name(obj),
                Some(ObjectType::Thing) => self.name(obj),
                _ => self.dbref(obj),
            },
            UnparseFormat::Function => match self.host.object_type(obj) {
                Some(ObjectType::Player) => self.player_name(obj),
                _ => self.dbref(obj),
            },
        }
    }

    fn quiet(&mut self, obj: Dbref) {
        match obj {
            Dbref::NOTHING => self.out.push_str("-1"),
            Dbref::HOME => self.out.push_str("-3"),
            _ => {
                let _ = write!(self.out, "(#{})", obj.number());
            }
        }
    }

    fn examine(&mut self, obj: Dbref) {
        match obj {
            Dbref::NOTHING => self.out.push_str("*NOTHING*"),
            Dbref::HOME => self.out.push_str("*HOME*"),
            _ if !self.host.is_good_obj(obj) => self.out.push_str("*ILLEGAL*"),
            _ => {
                self.name(obj);
                if self.can_examine(obj) {
                    let _ = write!(self.out, "(#{})", obj.number());
                }
            }
        }
    }

    fn can_examine(&self, obj: Dbref) -> bool {
        self.host.flags(obj).contains(ObjectFlags::VISUAL)
            || self.host.flags(self.player).sees_all()
            || self.host.owner(self.player) == self.host.owner(obj)
    }

    fn player_name(&mut self, obj: Dbref) {
        self.out.push('*');
        self.name(obj);
    }

    fn name(&mut self, obj: Dbref) {
        let name = self.host.name(obj).unwrap_or_default();
        self.out.push_str(name);
    }

    fn dbref(&mut self, obj: Dbref) {
        let _ = write!(self.out, "#{}", obj.number());
    }
}
