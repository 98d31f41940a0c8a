//! A minimal softcode evaluator.
//!
//! Supports `%`-substitutions and the `setq()` function, which is enough to
//! drive attribute-evaluation locks and to observe their side effects. The
//! full scripting language lives elsewhere.

use mushlock_foundation::Dbref;

use crate::object::ObjectStore;

/// Number of global `%q` registers.
pub const REGISTER_COUNT: usize = 10;

/// The global `%q0`..`%q9` registers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers([String; REGISTER_COUNT]);

impl Registers {
    /// Creates empty registers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns register `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Sets register `index`. Returns false if there is no such register.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Empties every register.
    pub fn clear(&mut self) {
        for slot in &mut self.0 {
            slot.clear();
        }
    }
}

/// Who is running the code.
#[derive(Copy, Clone, Debug)]
pub struct EvalContext {
    /// The object whose code runs (`%!`).
    pub executor: Dbref,
    /// The object that called it (`%@`).
    pub caller: Dbref,
    /// The object that caused it (`%#`).
    pub enactor: Dbref,
}

/// Evaluates `text`, returning its output.
pub fn evaluate(
    objects: &ObjectStore,
    registers: &mut Registers,
    ctx: EvalContext,
    text: &str,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '%' => match chars.next() {
                Some((_, '#')) => out.push_str(&ctx.enactor.to_string()),
                Some((_, '!')) => out.push_str(&ctx.executor.to_string()),
                Some((_, '@')) => out.push_str(&ctx.caller.to_string()),
                Some((_, 'N' | 'n')) => {
                    if let Some(o) = objects.get(ctx.enactor) {
                        out.push_str(&o.name);
                    }
                }
                Some((_, 'q' | 'Q')) => {
                    let reg = chars
                        .next_if(|(_, d)| d.is_ascii_digit())
                        .and_then(|(_, d)| d.to_digit(10));
                    if let Some(value) = reg.and_then(|r| registers.get(r as usize)) {
                        out.push_str(value);
                    }
                }
                Some((_, other)) => out.push(other),
                None => out.push('%'),
            },
            '[' => match matching_bracket(&text[i..]) {
                Some(len) => {
                    let inner = &text[i + 1..i + len];
                    out.push_str(&call(objects, registers, ctx, inner));
                    while chars.next_if(|(j, _)| *j <= i + len).is_some() {}
                }
                None => out.push('['),
            },
            _ => out.push(c),
        }
    }
    out
}

/// Returns the byte offset of the `]` closing the `[` at the start of `text`.
fn matching_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn call(objects: &ObjectStore, registers: &mut Registers, ctx: EvalContext, inner: &str) -> String {
    let inner = inner.trim();
    let (name, args) = match inner.split_once('(') {
        Some((name, rest)) if rest.ends_with(')') => (name.trim(), &rest[..rest.len() - 1]),
        _ => return evaluate(objects, registers, ctx, inner),
    };
    if name.eq_ignore_ascii_case("setq") {
        let (reg, value) = args.split_once(',').unwrap_or((args, ""));
        let value = evaluate(objects, registers, ctx, value);
        match reg.trim().parse::<usize>() {
            Ok(r) if registers.set(r, value) => String::new(),
            _ => "#-1 REGISTER OUT OF RANGE".to_string(),
        }
    } else {
        format!("#-1 FUNCTION ({}) NOT FOUND", name.to_ascii_uppercase())
    }
}
