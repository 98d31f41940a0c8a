//! Shared world for engine tests

use mushlock_foundation::{Dbref, ObjectType};
use mushlock_storage::Database;
use tracing_subscriber::filter::LevelFilter;

/// Routes engine diagnostics to the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(LevelFilter::DEBUG)
        .try_init();
}

/// `#0` Hall, `#1` One (god), Alice and Bob in the hall, Alice's `lamp` in
/// the hall, Alice carrying a `brass key`, and a `Blue Door` exit.
pub struct World {
    pub db: Database,
    pub hall: Dbref,
    pub god: Dbref,
    pub alice: Dbref,
    pub bob: Dbref,
    pub lamp: Dbref,
    pub key: Dbref,
    pub door: Dbref,
}

impl World {
    pub fn new() -> Self {
        init_tracing();
        let mut db = Database::new();
        let hall = db
            .create("Hall", ObjectType::Room, Dbref::NOTHING, Dbref::NOTHING)
            .unwrap();
        let god = db.create("One", ObjectType::Player, Dbref::NOTHING, hall).unwrap();
        let alice = db.create("Alice", ObjectType::Player, Dbref::NOTHING, hall).unwrap();
        let bob = db.create("Bob", ObjectType::Player, Dbref::NOTHING, hall).unwrap();
        let lamp = db.create("lamp", ObjectType::Thing, alice, hall).unwrap();
        let key = db.create("brass key", ObjectType::Thing, alice, alice).unwrap();
        let door = db
            .create("Blue Door;door;bd", ObjectType::Exit, alice, hall)
            .unwrap();
        Self {
            db,
            hall,
            god,
            alice,
            bob,
            lamp,
            key,
            door,
        }
    }

    /// `#n` text for `obj`.
    pub fn r(obj: Dbref) -> String {
        format!("#{}", obj.number())
    }
}
