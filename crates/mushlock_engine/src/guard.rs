//! Scoped save/restore of ambient host state.
//!
//! Each guard captures state when created and reinstates it when dropped,
//! on every exit path. While alive, the guard dereferences to the host.

use std::ops::{Deref, DerefMut};

use crate::host::{NameMatcher, ScriptEvaluator};

/// Restores the in-progress name match on drop.
pub struct MatchStateGuard<'a, H: NameMatcher> {
    host: &'a mut H,
    saved: Option<H::MatchState>,
}

impl<'a, H: NameMatcher> MatchStateGuard<'a, H> {
    /// Captures the host's match state.
    pub fn new(host: &'a mut H) -> Self {
        let saved = Some(host.save_match_state());
        Self { host, saved }
    }
}

impl<H: NameMatcher> Deref for MatchStateGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: NameMatcher> DerefMut for MatchStateGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: NameMatcher> Drop for MatchStateGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(state) = self.saved.take() {
            self.host.restore_match_state(state);
        }
    }
}

/// Restores the global softcode registers on drop.
pub struct RegisterGuard<'a, H: ScriptEvaluator> {
    host: &'a mut H,
    saved: Option<H::Registers>,
}

impl<'a, H: ScriptEvaluator> RegisterGuard<'a, H> {
    /// Captures the host's registers.
    pub fn new(host: &'a mut H) -> Self {
        let saved = Some(host.save_registers());
        Self { host, saved }
    }
}

impl<H: ScriptEvaluator> Deref for RegisterGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: ScriptEvaluator> DerefMut for RegisterGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: ScriptEvaluator> Drop for RegisterGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(registers) = self.saved.take() {
            self.host.restore_registers(registers);
        }
    }
}
