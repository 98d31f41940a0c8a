//! Lock parsing integration tests

use mushlock_engine::{BoolExp, LockConfig, LockEngine, LockOperand, ParseError};
use mushlock_foundation::AttrNum;

use crate::common::World;

// =============================================================================
// Names
// =============================================================================

#[test]
fn user_locks_resolve_names() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let exp = engine
        .parse(&mut w.db, w.alice, "me & !*bob & +brass key", false)
        .unwrap();
    assert_eq!(
        exp,
        BoolExp::and(
            BoolExp::Const(w.alice),
            BoolExp::and(
                BoolExp::not(BoolExp::Const(w.bob)),
                BoolExp::Carry(LockOperand::Object(w.key))
            )
        )
    );
}

#[test]
fn exits_match_by_alias() {
    let mut w = World::new();
    let engine = LockEngine::default();
    assert_eq!(
        engine.parse(&mut w.db, w.alice, "@door", false),
        Ok(BoolExp::Indirect(w.door))
    );
}

#[test]
fn bob_cannot_name_alices_key() {
    let mut w = World::new();
    let engine = LockEngine::default();
    assert_eq!(
        engine.parse(&mut w.db, w.bob, "brass key", false),
        Err(ParseError::UnknownObject("brass key".into()))
    );
    let notes = w.db.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].player, w.bob);
    assert_eq!(notes[0].message, "I don't see brass key here.");
}

#[test]
fn stored_locks_skip_matching() {
    let mut w = World::new();
    let engine = LockEngine::default();
    assert!(engine.parse(&mut w.db, w.alice, "me", true).is_err());
    assert!(w.db.take_notifications().is_empty());
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn attribute_names_ignore_case() {
    let mut w = World::new();
    let engine = LockEngine::default();
    assert_eq!(
        engine.parse(&mut w.db, w.alice, "sex:m*|UseLock/1", false),
        Ok(BoolExp::or(
            BoolExp::attr_check(AttrNum::SEX, "m*"),
            BoolExp::attr_eval(AttrNum::LUSE, "1")
        ))
    );
}

#[test]
fn long_attribute_names_truncated() {
    let mut w = World::new();
    let engine = LockEngine::new(LockConfig::default().with_max_attr_name_len(4));
    assert_eq!(
        engine.parse(&mut w.db, w.god, "NAMEPLATE:x", true),
        Ok(BoolExp::attr_check(AttrNum::NAME, "x"))
    );
}

#[test]
fn god_may_use_numbers() {
    let mut w = World::new();
    let engine = LockEngine::default();
    assert_eq!(
        engine.parse(&mut w.db, w.god, "42:x*", false),
        Ok(BoolExp::attr_check(AttrNum::LOCK, "x*"))
    );
    assert!(engine.parse(&mut w.db, w.alice, "42:x*", false).is_err());
}

// =============================================================================
// Failure Modes
// =============================================================================

#[test]
fn empty_text_is_an_error() {
    let mut w = World::new();
    let engine = LockEngine::default();
    for internal in [false, true] {
        assert_eq!(
            engine.parse(&mut w.db, w.alice, "", internal),
            Err(ParseError::Empty)
        );
    }
}

#[test]
fn nesting_bounded_for_both_modes() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let bangs = format!("{}me", "!".repeat(10_000));
    assert_eq!(
        engine.parse(&mut w.db, w.alice, &bangs, false),
        Err(ParseError::DepthExceeded { limit: 1000 })
    );
    let parens = format!("{}{}{}", "(".repeat(10_000), World::r(w.alice), ")".repeat(10_000));
    assert_eq!(
        engine.parse(&mut w.db, w.alice, &parens, true),
        Err(ParseError::DepthExceeded { limit: 1000 })
    );
}

#[test]
fn strict_limits() {
    let mut w = World::new();
    let engine = LockEngine::new(LockConfig::strict());
    let text = format!("{}me", "!".repeat(150));
    assert_eq!(
        engine.parse(&mut w.db, w.alice, &text, false),
        Err(ParseError::DepthExceeded { limit: 100 })
    );
}
