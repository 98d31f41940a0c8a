//! Lock engine entry points.
//!
//! [`LockEngine`] ties the parser, evaluator, and unparser to one
//! [`LockConfig`] and exposes the operations the command layer calls:
//! parsing typed locks, checking stored locks, and rendering them back.

use mushlock_foundation::{AttrNum, Dbref, ErrorContext, ObjectFlags, ObjectType};

use crate::boolexp::BoolExp;
use crate::config::LockConfig;
use crate::error::{LockError, ParseError};
use crate::eval::Evaluator;
use crate::host::{AttributeSource, LockHost, LockStore, ObjectGraph};
use crate::parser::LockParser;
use crate::unparse::{UnparseFormat, unparse};

/// Parses, evaluates, and renders locks.
#[derive(Clone, Debug, Default)]
pub struct LockEngine {
    config: LockConfig,
}

impl LockEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: LockConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    /// Parses lock text on behalf of `actor`.
    ///
    /// Internal text is stored lock text and only accepts `#n` object
    /// references. User text may name objects, which are resolved through the
    /// host's matcher; failures to resolve notify `actor`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed or unresolvable text.
    pub fn parse<H: LockHost>(
        &self,
        host: &mut H,
        actor: Dbref,
        text: &str,
        internal: bool,
    ) -> Result<BoolExp, ParseError> {
        let result = LockParser::new(host, &self.config, actor, text, internal).parse();
        match &result {
            Ok(exp) => {
                tracing::trace!(%actor, internal, nodes = exp.node_count(), "parsed lock");
            }
            Err(err @ ParseError::DepthExceeded { .. }) => {
                tracing::warn!(%actor, internal, error = %err, "lock too deeply nested");
            }
            Err(err) => {
                tracing::debug!(%actor, internal, error = %err, "lock parse failed");
            }
        }
        result
    }

    /// Checks whether `actor` passes `exp`, a lock on `target`, with
    /// attribute visibility judged from `origin`.
    pub fn evaluate<H: LockHost>(
        &self,
        host: &mut H,
        actor: Dbref,
        target: Dbref,
        origin: Dbref,
        exp: &BoolExp,
    ) -> bool {
        Evaluator::new(host, &self.config, actor, target, origin).eval(exp)
    }

    /// Parses stored lock text and evaluates it.
    ///
    /// Text that does not parse, including empty text, passes.
    pub fn evaluate_attr<H: LockHost>(
        &self,
        host: &mut H,
        actor: Dbref,
        target: Dbref,
        origin: Dbref,
        text: &str,
    ) -> bool {
        match self.parse(host, actor, text, true) {
            Ok(exp) => self.evaluate(host, actor, target, origin, &exp),
            Err(_) => true,
        }
    }

    /// Renders `exp` for `player`.
    pub fn unparse<H>(&self, host: &H, player: Dbref, exp: &BoolExp, format: UnparseFormat) -> String
    where
        H: ObjectGraph + AttributeSource,
    {
        unparse(host, player, exp, format)
    }

    /// Returns the text of lock `lock` stored on `thing`.
    pub fn lock_text<H: AttributeSource>(&self, host: &H, thing: Dbref, lock: AttrNum) -> String {
        host.get_attr(thing, lock).text
    }

    /// Returns true if `player` passes lock `lock` on `thing`.
    ///
    /// Only players pass locks on `KEY` objects; `PASS_LOCKS` players pass
    /// everything else.
    pub fn could_doit<H: LockHost>(
        &self,
        host: &mut H,
        player: Dbref,
        thing: Dbref,
        lock: AttrNum,
    ) -> bool {
        if host.object_type(player) != Some(ObjectType::Player)
            && host.flags(thing).contains(ObjectFlags::KEY)
        {
            return false;
        }
        if host.flags(player).contains(ObjectFlags::PASS_LOCKS) {
            return true;
        }
        let text = self.lock_text(&*host, thing, lock);
        self.evaluate_attr(host, player, thing, thing, &text)
    }

    /// Parses user-typed `text` and stores it as lock `lock` on `thing`.
    ///
    /// The stored form is the quiet rendering of the parsed tree, so it
    /// reparses without name matching. Text that fails to parse, either as
    /// typed or in its stored form, is never stored.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::Parse`] if the text does not parse and
    /// [`LockError::Store`] if the host refuses the lock.
    pub fn set_lock<H: LockHost + LockStore>(
        &self,
        host: &mut H,
        player: Dbref,
        thing: Dbref,
        lock: AttrNum,
        text: &str,
    ) -> Result<BoolExp, LockError> {
        let exp = self.parse(host, player, text, false)?;
        let stored = unparse(&*host, player, &exp, UnparseFormat::Quiet);
        // The stored form can nest deeper than the typed text.
        self.parse(host, player, &stored, true)?;
        host.store_lock(thing, lock, &stored).map_err(|err| {
            err.with_context(ErrorContext::new().with_actor(player).with_operation("set_lock"))
        })?;
        tracing::debug!(%player, %thing, %lock, text = %stored, "lock set");
        Ok(exp)
    }

    /// Removes lock `lock` from `thing`.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::Store`] if the host refuses.
    pub fn clear_lock<H: LockStore>(
        &self,
        host: &mut H,
        thing: Dbref,
        lock: AttrNum,
    ) -> Result<(), LockError> {
        host.store_lock(thing, lock, "")
            .map_err(|err| err.with_context(ErrorContext::new().with_operation("clear_lock")))?;
        tracing::debug!(%thing, %lock, "lock cleared");
        Ok(())
    }
}
