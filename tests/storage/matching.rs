//! Name matching integration tests

use mushlock_foundation::{Dbref, MatchResult, ObjectType};
use mushlock_storage::{Database, MatchState};

struct World {
    db: Database,
    room: Dbref,
    alice: Dbref,
    bob: Dbref,
    lamp: Dbref,
    coin: Dbref,
    door: Dbref,
}

fn world() -> World {
    let mut db = Database::new();
    let room = db
        .create("Hall", ObjectType::Room, Dbref::NOTHING, Dbref::NOTHING)
        .unwrap();
    let alice = db.create("Alice", ObjectType::Player, Dbref::NOTHING, room).unwrap();
    let bob = db.create("Bob", ObjectType::Player, Dbref::NOTHING, room).unwrap();
    let lamp = db.create("brass lamp", ObjectType::Thing, alice, room).unwrap();
    let coin = db.create("coin", ObjectType::Thing, alice, alice).unwrap();
    let door = db.create("Oak Door;door;d", ObjectType::Exit, alice, room).unwrap();
    World {
        db,
        room,
        alice,
        bob,
        lamp,
        coin,
        door,
    }
}

#[test]
fn keywords() {
    let mut w = world();
    assert_eq!(w.db.match_everything(w.alice, "me"), MatchResult::Found(w.alice));
    assert_eq!(w.db.match_everything(w.alice, "HERE"), MatchResult::Found(w.room));
}

#[test]
fn absolute_and_player_references() {
    let mut w = world();
    let text = format!("#{}", w.lamp.number());
    assert_eq!(w.db.match_everything(w.bob, &text), MatchResult::Found(w.lamp));
    assert_eq!(w.db.match_everything(w.bob, "#500"), MatchResult::NotFound);
    assert_eq!(w.db.match_everything(w.bob, "*alice"), MatchResult::Found(w.alice));
}

#[test]
fn nearby_names() {
    let mut w = world();
    assert_eq!(w.db.match_everything(w.alice, "coin"), MatchResult::Found(w.coin));
    assert_eq!(w.db.match_everything(w.bob, "coin"), MatchResult::NotFound);
    assert_eq!(w.db.match_everything(w.alice, "brass"), MatchResult::Found(w.lamp));
    assert_eq!(w.db.match_everything(w.alice, "door"), MatchResult::Found(w.door));
    assert_eq!(w.db.match_everything(w.alice, "d"), MatchResult::Found(w.door));
}

#[test]
fn ambiguous_prefix() {
    let mut w = world();
    w.db.create("brass key", ObjectType::Thing, w.alice, w.alice)
        .unwrap();
    assert_eq!(w.db.match_everything(w.alice, "brass"), MatchResult::Ambiguous);
    assert_eq!(
        w.db.match_everything(w.alice, "brass key"),
        MatchResult::Found(Dbref::new(6))
    );
}

#[test]
fn current_match_recorded() {
    let mut w = world();
    w.db.match_everything(w.alice, "coin");
    assert_eq!(w.db.current_match().name, "coin");
    assert_eq!(w.db.current_match().result, Some(MatchResult::Found(w.coin)));
    w.db.set_current_match(MatchState::default());
    assert_eq!(w.db.current_match().player, Dbref::NOTHING);
}
