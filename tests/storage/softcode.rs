//! Softcode and notification integration tests

use mushlock_foundation::{Dbref, ObjectType};
use mushlock_storage::{Database, REGISTER_COUNT};

fn world() -> (Database, Dbref, Dbref) {
    let mut db = Database::new();
    let room = db
        .create("Hall", ObjectType::Room, Dbref::NOTHING, Dbref::NOTHING)
        .unwrap();
    let alice = db.create("Alice", ObjectType::Player, Dbref::NOTHING, room).unwrap();
    let thing = db.create("widget", ObjectType::Thing, alice, room).unwrap();
    (db, alice, thing)
}

#[test]
fn substitutions() {
    let (mut db, alice, thing) = world();
    let out = db.eval_expression(thing, alice, alice, "%! ran for %N (%#)");
    assert_eq!(out, format!("#{} ran for Alice (#{})", thing.number(), alice.number()));
}

#[test]
fn setq_writes_registers() {
    let (mut db, alice, thing) = world();
    let out = db.eval_expression(thing, alice, alice, "[setq(2,hello)]%q2 world");
    assert_eq!(out, "hello world");
    assert_eq!(db.registers().get(2), Some("hello"));
    assert_eq!(db.registers().get(REGISTER_COUNT), None);
}

#[test]
fn unknown_functions_report() {
    let (mut db, alice, thing) = world();
    let out = db.eval_expression(thing, alice, alice, "[frobnicate(1)]");
    assert_eq!(out, "#-1 FUNCTION (FROBNICATE) NOT FOUND");
}

#[test]
fn notifications_queue_in_order() {
    let (mut db, alice, thing) = world();
    db.notify(alice, "one");
    db.notify(thing, "two");
    assert_eq!(db.pending_notifications().len(), 2);
    let notes = db.take_notifications();
    assert_eq!(notes[0].player, alice);
    assert_eq!(notes[1].message, "two");
    assert!(db.pending_notifications().is_empty());
}
