//! Lock evaluation integration tests

use mushlock_engine::{BoolExp, LockConfig, LockEngine};
use mushlock_foundation::{AttrFlags, AttrNum, Dbref, ObjectType};

use crate::common::World;

fn passes(w: &mut World, engine: &LockEngine, actor: Dbref, thing: Dbref, text: &str) -> bool {
    let exp = engine.parse(&mut w.db, w.god, text, true).unwrap();
    engine.evaluate(&mut w.db, actor, thing, thing, &exp)
}

// =============================================================================
// Objects
// =============================================================================

#[test]
fn room_lock_admits_occupants() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let text = World::r(w.hall);
    let (alice, lamp) = (w.alice, w.lamp);
    assert!(passes(&mut w, &engine, alice, lamp, &text));
    let away = w
        .db
        .create("Elsewhere", ObjectType::Room, Dbref::NOTHING, Dbref::NOTHING)
        .unwrap();
    w.db.move_to(alice, away).unwrap();
    assert!(!passes(&mut w, &engine, alice, lamp, &text));
}

#[test]
fn is_excludes_containers() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let text = format!("={}", World::r(w.hall));
    let (alice, hall, lamp) = (w.alice, w.hall, w.lamp);
    assert!(!passes(&mut w, &engine, alice, lamp, &text));
    assert!(passes(&mut w, &engine, hall, lamp, &text));
}

#[test]
fn owner_lock_follows_ownership() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let text = format!("${}", World::r(w.lamp));
    let (alice, bob, lamp, key) = (w.alice, w.bob, w.lamp, w.key);
    assert!(passes(&mut w, &engine, key, lamp, &text));
    assert!(!passes(&mut w, &engine, bob, lamp, &text));
    w.db.set_owner(lamp, bob).unwrap();
    assert!(passes(&mut w, &engine, bob, lamp, &text));
    assert!(!passes(&mut w, &engine, alice, lamp, &text));
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn visible_attributes_checked_with_inheritance() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let guild = w.db.define_attr("GUILD", AttrFlags::VISUAL).unwrap();
    let template = w
        .db
        .create("player template", ObjectType::Thing, w.god, Dbref::NOTHING)
        .unwrap();
    w.db.set_attr(template, guild, "thieves", None).unwrap();
    w.db.set_parent(w.bob, template).unwrap();
    let (alice, bob, lamp) = (w.alice, w.bob, w.lamp);
    assert!(passes(&mut w, &engine, bob, lamp, "GUILD:thie*"));
    assert!(!passes(&mut w, &engine, alice, lamp, "GUILD:thie*"));
}

#[test]
fn hidden_attributes_never_match() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let secret = w.db.define_attr("SECRET", AttrFlags::empty()).unwrap();
    w.db.set_attr(w.bob, secret, "swordfish", None).unwrap();
    let (bob, lamp) = (w.bob, w.lamp);
    // The lamp is Alice's, so Bob's unflagged attribute is hidden from it.
    assert!(!passes(&mut w, &engine, bob, lamp, "SECRET:swordfish"));
}

#[test]
fn control_lock_always_visible() {
    let mut w = World::new();
    let engine = LockEngine::default();
    w.db.set_attr(w.bob, AttrNum::LCONTROL, "zone", None).unwrap();
    let (bob, lamp) = (w.bob, w.lamp);
    assert!(passes(&mut w, &engine, bob, lamp, "CONTROLLOCK:zone"));
    assert!(!passes(&mut w, &engine, bob, lamp, "USELOCK:zone"));
}

#[test]
fn carried_attribute_checks() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let metal = w.db.define_attr("METAL", AttrFlags::VISUAL).unwrap();
    w.db.set_attr(w.key, metal, "brass", None).unwrap();
    let (alice, bob, lamp) = (w.alice, w.bob, w.lamp);
    assert!(passes(&mut w, &engine, alice, lamp, "+METAL:brass"));
    assert!(!passes(&mut w, &engine, alice, lamp, "=METAL:brass"));
    assert!(passes(&mut w, &engine, alice, lamp, "METAL:brass"));
    assert!(!passes(&mut w, &engine, bob, lamp, "METAL:brass"));
}

#[test]
fn numeric_comparison_patterns() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let level = w.db.define_attr("LEVEL", AttrFlags::VISUAL).unwrap();
    w.db.set_attr(w.alice, level, "12", None).unwrap();
    w.db.set_attr(w.bob, level, "3", None).unwrap();
    let (alice, bob, lamp) = (w.alice, w.bob, w.lamp);
    assert!(passes(&mut w, &engine, alice, lamp, "LEVEL:>9"));
    assert!(!passes(&mut w, &engine, bob, lamp, "LEVEL:>9"));
}

// =============================================================================
// Softcode
// =============================================================================

#[test]
fn evaluation_lock_sees_enactor() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let gate = w.db.define_attr("GATE", AttrFlags::empty()).unwrap();
    w.db.set_attr(w.lamp, gate, "%N", None).unwrap();
    let (alice, bob, lamp) = (w.alice, w.bob, w.lamp);
    assert!(passes(&mut w, &engine, alice, lamp, "GATE/ALICE"));
    assert!(!passes(&mut w, &engine, bob, lamp, "GATE/ALICE"));
}

#[test]
fn evaluation_lock_preserves_registers() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let gate = w.db.define_attr("GATE", AttrFlags::empty()).unwrap();
    w.db.set_attr(w.lamp, gate, "[setq(0,%#)]%q0", None).unwrap();
    w.db.registers_mut().set(0, "in flight");
    let (alice, lamp) = (w.alice, w.lamp);
    let text = format!("GATE/{}", World::r(alice));
    assert!(passes(&mut w, &engine, alice, lamp, &text));
    assert_eq!(w.db.registers().get(0), Some("in flight"));
}

#[test]
fn indirect_evaluation_lock_called_by_outer_object() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let gate = w.db.define_attr("GATE", AttrFlags::empty()).unwrap();
    w.db.set_attr(w.lamp, gate, "%@", None).unwrap();
    let proxy = w
        .db
        .create("proxy", ObjectType::Thing, w.alice, Dbref::NOTHING)
        .unwrap();
    let lamp_ref = World::r(w.lamp);
    w.db.set_attr(proxy, AttrNum::LOCK, &format!("GATE/{lamp_ref}"), None)
        .unwrap();
    let (alice, lamp) = (w.alice, w.lamp);
    assert!(passes(&mut w, &engine, alice, lamp, &format!("@{}", World::r(proxy))));
    assert!(!passes(&mut w, &engine, alice, lamp, &format!("GATE/{lamp_ref}")));
    assert!(passes(&mut w, &engine, alice, lamp, &format!("GATE/{}", World::r(alice))));
}

// =============================================================================
// Indirection
// =============================================================================

#[test]
fn indirection_reads_the_default_lock() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let badge = w
        .db
        .create("badge", ObjectType::Thing, w.alice, Dbref::NOTHING)
        .unwrap();
    w.db.set_attr(badge, AttrNum::LOCK, &World::r(w.bob), None).unwrap();
    w.db.set_attr(badge, AttrNum::LUSE, &World::r(w.alice), None).unwrap();
    let text = format!("@{}", World::r(badge));
    let (alice, bob, lamp) = (w.alice, w.bob, w.lamp);
    assert!(passes(&mut w, &engine, bob, lamp, &text));
    assert!(!passes(&mut w, &engine, alice, lamp, &text));
}

#[test]
fn mutual_indirection_fails_closed() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let a = w.db.create("a", ObjectType::Thing, w.alice, w.hall).unwrap();
    let b = w.db.create("b", ObjectType::Thing, w.alice, w.hall).unwrap();
    w.db.set_attr(a, AttrNum::LOCK, &format!("@{}", World::r(b)), None).unwrap();
    w.db.set_attr(b, AttrNum::LOCK, &format!("@{}", World::r(a)), None).unwrap();
    let alice = w.alice;
    assert!(!passes(&mut w, &engine, alice, a, &format!("@{}", World::r(a))));
    assert!(!engine.could_doit(&mut w.db, alice, a, AttrNum::LOCK));
    let notes = w.db.take_notifications();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.player == alice && n.message == "Sorry, broken lock!"));
}

#[test]
fn negated_runaway_still_fails() {
    let mut w = World::new();
    let engine = LockEngine::new(LockConfig::default().with_log_location(false));
    let a = w.db.create("a", ObjectType::Thing, w.alice, w.hall).unwrap();
    w.db.set_attr(a, AttrNum::LOCK, &format!("@{}", World::r(a)), None).unwrap();
    let alice = w.alice;
    // The broken inner lock is false, so its negation passes; only the
    // indirection itself fails closed.
    assert!(passes(&mut w, &engine, alice, a, &format!("!@{}", World::r(a))));
}

#[test]
fn sentinel_always_passes() {
    let mut w = World::new();
    let engine = LockEngine::default();
    for actor in [w.alice, w.bob, w.lamp, w.hall] {
        assert!(engine.evaluate(&mut w.db, actor, w.lamp, w.lamp, &BoolExp::True));
    }
}

#[test]
fn deep_indirection_chain_fails_closed() {
    let mut w = World::new();
    let engine = LockEngine::default();
    let alice = w.alice;
    let links: Vec<Dbref> = (0..25)
        .map(|i| {
            w.db.create(&format!("link{i}"), ObjectType::Thing, alice, w.hall)
                .unwrap()
        })
        .collect();
    for (i, link) in links.iter().enumerate() {
        let next = links.get(i + 1).unwrap_or(&alice);
        let text = format!("{}@{}", "!".repeat(996), World::r(*next));
        w.db.set_attr(*link, AttrNum::LOCK, &text, None).unwrap();
    }
    let first = links[0];
    let handle = std::thread::Builder::new()
        .stack_size(8 << 20)
        .spawn(move || {
            let passed = engine.could_doit(&mut w.db, alice, first, AttrNum::LOCK);
            (passed, w.db.take_notifications())
        })
        .unwrap();
    let (passed, notes) = handle.join().unwrap();
    assert!(!passed);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Sorry, broken lock!");
}
