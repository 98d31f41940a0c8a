//! Shared fixture for unit tests.

use mushlock_foundation::{Dbref, ObjectType};
use mushlock_storage::Database;

/// A small world:
///
/// - `#0` Limbo, a room holding everyone
/// - `#1` One, the god player
/// - `alice` and `bob`, players
/// - `lamp`, Alice's, in the room
/// - `key` ("brass key"), Alice's, carried by her
/// - `box_`, Bob's, in the room
pub struct TestWorld {
    pub db: Database,
    pub room: Dbref,
    pub god: Dbref,
    pub alice: Dbref,
    pub bob: Dbref,
    pub lamp: Dbref,
    pub key: Dbref,
    pub box_: Dbref,
}

impl TestWorld {
    pub fn new() -> Self {
        let mut db = Database::new();
        let room = db
            .create("Limbo", ObjectType::Room, Dbref::NOTHING, Dbref::NOTHING)
            .unwrap();
        let god = db.create("One", ObjectType::Player, Dbref::NOTHING, room).unwrap();
        assert_eq!(god, Dbref::GOD);
        let alice = db.create("Alice", ObjectType::Player, Dbref::NOTHING, room).unwrap();
        let bob = db.create("Bob", ObjectType::Player, Dbref::NOTHING, room).unwrap();
        let lamp = db.create("lamp", ObjectType::Thing, alice, room).unwrap();
        let key = db.create("brass key", ObjectType::Thing, alice, alice).unwrap();
        let box_ = db.create("box", ObjectType::Thing, bob, room).unwrap();
        Self {
            db,
            room,
            god,
            alice,
            bob,
            lamp,
            key,
            box_,
        }
    }
}
