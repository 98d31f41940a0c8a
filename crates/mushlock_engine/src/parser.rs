//! Recursive-descent parser for lock text.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! E -> T | T '|' E
//! T -> F | F '&' T
//! F -> '!' F | '@' L | '=' L | '+' L | '$' L | L
//! L -> '(' E ')' | attr ':' pattern | attr '/' value | object
//! ```
//!
//! A leaf runs up to the next `&`, `|`, `)` or the end of input, with
//! surrounding whitespace removed. User-typed locks resolve object names
//! through the host's matcher; internal (stored) locks only accept `#n`.

use mushlock_foundation::{AttrNum, Dbref, MatchResult};

use crate::boolexp::{BoolExp, LockOperand};
use crate::config::LockConfig;
use crate::error::ParseError;
use crate::guard::MatchStateGuard;
use crate::host::LockHost;

const ESC: char = '\u{1b}';

/// Parser state for one top-level parse.
///
/// The depth counter is only unwound on success; a failed parse consumes
/// the parser. A parse nested inside an evaluation starts from the depth
/// already used, so the limit bounds the whole check.
pub struct LockParser<'a, H: LockHost> {
    host: &'a mut H,
    config: &'a LockConfig,
    actor: Dbref,
    internal: bool,
    input: &'a str,
    pos: usize,
    base: usize,
    depth: usize,
}

impl<'a, H: LockHost> LockParser<'a, H> {
    /// Creates a parser for `input` typed (or stored) on behalf of `actor`.
    pub fn new(
        host: &'a mut H,
        config: &'a LockConfig,
        actor: Dbref,
        input: &'a str,
        internal: bool,
    ) -> Self {
        Self {
            host,
            config,
            actor,
            internal,
            input,
            pos: 0,
            base: 0,
            depth: 0,
        }
    }

    /// Starts the depth count at `depth` instead of zero.
    #[must_use]
    pub fn starting_depth(mut self, depth: usize) -> Self {
        self.base = depth;
        self
    }

    /// Parses the whole input.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing the first problem found.
    pub fn parse(mut self) -> Result<BoolExp, ParseError> {
        if !self.internal {
            check_user_text(self.input)?;
        }
        if self.input.is_empty() {
            return Err(ParseError::Empty);
        }
        self.depth = self.base;
        let exp = self.parse_expression()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(ParseError::TrailingInput { offset: self.pos });
        }
        Ok(exp)
    }

    // E -> T | T '|' E
    fn parse_expression(&mut self) -> Result<BoolExp, ParseError> {
        self.descend()?;
        let mut exp = self.parse_term()?;
        self.skip_whitespace();
        if self.eat('|') {
            exp = BoolExp::or(exp, self.parse_expression()?);
        }
        self.depth -= 1;
        Ok(exp)
    }

    // T -> F | F '&' T
    fn parse_term(&mut self) -> Result<BoolExp, ParseError> {
        self.descend()?;
        let mut exp = self.parse_factor()?;
        self.skip_whitespace();
        if self.eat('&') {
            exp = BoolExp::and(exp, self.parse_term()?);
        }
        self.depth -= 1;
        Ok(exp)
    }

    // F -> '!' F | '@' L | '=' L | '+' L | '$' L | L
    fn parse_factor(&mut self) -> Result<BoolExp, ParseError> {
        self.descend()?;
        self.skip_whitespace();
        let Some(op) = self.peek() else {
            return Err(ParseError::MissingOperand { offset: self.pos });
        };
        let exp = match op {
            '!' => {
                self.pos += 1;
                BoolExp::not(self.parse_factor()?)
            }
            '@' | '$' => {
                self.pos += 1;
                match self.parse_leaf()? {
                    BoolExp::Const(obj) if op == '@' => BoolExp::Indirect(obj),
                    BoolExp::Const(obj) => BoolExp::Owner(obj),
                    _ => return Err(ParseError::InvalidOperand { operator: op }),
                }
            }
            '=' | '+' => {
                self.pos += 1;
                let operand = LockOperand::from_leaf(self.parse_leaf()?)
                    .ok_or(ParseError::InvalidOperand { operator: op })?;
                if op == '=' {
                    BoolExp::Is(operand)
                } else {
                    BoolExp::Carry(operand)
                }
            }
            _ => self.parse_leaf()?,
        };
        self.depth -= 1;
        Ok(exp)
    }

    // L -> '(' E ')' | attr-ref | object-ref
    fn parse_leaf(&mut self) -> Result<BoolExp, ParseError> {
        self.skip_whitespace();
        if self.eat('(') {
            let exp = self.parse_expression()?;
            self.skip_whitespace();
            if !self.eat(')') {
                return Err(ParseError::ExpectedCloseParen { offset: self.pos });
            }
            return Ok(exp);
        }

        let input = self.input;
        let start = self.pos;
        let rest = &input[start..];
        let len = rest.find(['&', '|', ')']).unwrap_or(rest.len());
        self.pos += len;
        let text = rest[..len].trim_end();
        if text.is_empty() {
            return Err(ParseError::MissingOperand { offset: start });
        }

        if let Some(exp) = self.attribute_ref(text) {
            return Ok(exp);
        }
        self.object_ref(text)
    }

    /// Recognizes `name:pattern` and `name/value`.
    fn attribute_ref(&self, text: &str) -> Option<BoolExp> {
        let split = text.find([':', '/'])?;
        let (name, rest) = text.split_at(split);
        let value = &rest[1..];
        let eval = rest.starts_with('/');

        let bounded: String = name.chars().take(self.config.max_attr_name_len).collect();
        let attr = match self.host.attr_by_name(&bounded.to_ascii_uppercase()) {
            Some(def) => def.number,
            None => {
                if !(self.internal || self.host.is_god(self.actor)) {
                    return None;
                }
                if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                match name.parse::<u32>() {
                    Ok(n) if n > 0 => AttrNum::new(n),
                    _ => return None,
                }
            }
        };
        Some(if eval {
            BoolExp::attr_eval(attr, value)
        } else {
            BoolExp::attr_check(attr, value)
        })
    }

    /// Resolves an object reference.
    fn object_ref(&mut self, text: &str) -> Result<BoolExp, ParseError> {
        if self.internal {
            let obj = text
                .strip_prefix('#')
                .and_then(|digits| digits.parse::<i32>().ok())
                .map(Dbref::new)
                .filter(|obj| self.host.is_good_obj(*obj))
                .ok_or_else(|| ParseError::InvalidObjectRef(text.to_string()))?;
            return Ok(BoolExp::Const(obj));
        }

        let result = {
            let mut host = MatchStateGuard::new(&mut *self.host);
            host.match_everything(self.actor, text)
        };
        match result {
            MatchResult::Found(obj) => Ok(BoolExp::Const(obj)),
            MatchResult::NotFound => {
                let err = ParseError::UnknownObject(text.to_string());
                self.host.notify(self.actor, &err.to_string());
                Err(err)
            }
            MatchResult::Ambiguous => {
                let err = ParseError::AmbiguousObject(text.to_string());
                self.host.notify(self.actor, &err.to_string());
                Err(err)
            }
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.config.max_parse_depth {
            return Err(ParseError::DepthExceeded {
                limit: self.config.max_parse_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }
}

/// Rejects control characters and unbalanced parentheses in user-typed text.
fn check_user_text(text: &str) -> Result<(), ParseError> {
    let mut open = 0usize;
    for c in text.chars() {
        match c {
            '\t' | '\r' | '\n' | ESC => return Err(ParseError::ForbiddenCharacter(c)),
            '(' => open += 1,
            ')' => {
                open = open
                    .checked_sub(1)
                    .ok_or(ParseError::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if open == 0 {
        Ok(())
    } else {
        Err(ParseError::UnbalancedParentheses)
    }
}
