//! Object table integration tests
//!
//! Tests creation, movement, containment, and destruction.

use mushlock_foundation::{Dbref, ErrorKind, ObjectFlags, ObjectType};
use mushlock_storage::Database;

fn world() -> (Database, Dbref, Dbref) {
    let mut db = Database::new();
    let room = db
        .create("Limbo", ObjectType::Room, Dbref::NOTHING, Dbref::NOTHING)
        .unwrap();
    let player = db
        .create("Wizard", ObjectType::Player, Dbref::NOTHING, room)
        .unwrap();
    (db, room, player)
}

fn contents(db: &Database, obj: Dbref) -> Vec<Dbref> {
    db.objects().chain(db.object(obj).unwrap().contents)
}

// =============================================================================
// Creation
// =============================================================================

#[test]
fn objects_numbered_in_order() {
    let (mut db, room, player) = world();
    assert_eq!(room, Dbref::new(0));
    assert_eq!(player, Dbref::GOD);
    let thing = db.create("rock", ObjectType::Thing, player, room).unwrap();
    assert_eq!(thing, Dbref::new(2));
    assert_eq!(db.object_count(), 3);
}

#[test]
fn things_keep_their_owner() {
    let (mut db, room, player) = world();
    let thing = db.create("rock", ObjectType::Thing, player, room).unwrap();
    assert_eq!(db.object(thing).unwrap().owner, player);
    assert_eq!(db.object(thing).unwrap().location, room);
}

#[test]
fn create_rejects_dead_owner() {
    let (mut db, room, _) = world();
    let err = db
        .create("rock", ObjectType::Thing, Dbref::new(77), room)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ObjectNotFound(_)));
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn move_relinks_chains() {
    let (mut db, room, player) = world();
    let rock = db.create("rock", ObjectType::Thing, player, room).unwrap();
    let gem = db.create("gem", ObjectType::Thing, player, room).unwrap();
    assert_eq!(contents(&db, room), vec![gem, rock, player]);

    db.move_to(rock, player).unwrap();
    assert_eq!(contents(&db, room), vec![gem, player]);
    assert_eq!(contents(&db, player), vec![rock]);
    assert_eq!(db.object(rock).unwrap().location, player);
}

#[test]
fn move_into_self_rejected() {
    let (mut db, room, player) = world();
    let bag = db.create("bag", ObjectType::Thing, player, player).unwrap();
    let err = db.move_to(player, bag).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ContainmentCycle { .. }));
    assert_eq!(db.object(player).unwrap().location, room);
}

// =============================================================================
// Destruction
// =============================================================================

#[test]
fn destroy_empties_and_unlinks() {
    let (mut db, room, player) = world();
    let bag = db.create("bag", ObjectType::Thing, player, room).unwrap();
    let coin = db.create("coin", ObjectType::Thing, player, bag).unwrap();
    db.add_flags(bag, ObjectFlags::VISUAL).unwrap();

    db.destroy(bag).unwrap();
    assert!(!db.is_good(bag));
    assert_eq!(db.object(bag).unwrap().kind, ObjectType::Garbage);
    assert!(db.object(bag).unwrap().flags.is_empty());
    assert_eq!(db.object(coin).unwrap().location, Dbref::NOTHING);
    assert!(!contents(&db, room).contains(&bag));
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn clones_are_independent() {
    let (mut db, room, player) = world();
    let before = db.clone();
    db.create("rock", ObjectType::Thing, player, room).unwrap();
    assert_eq!(before.object_count(), 2);
    assert_eq!(db.object_count(), 3);
}
