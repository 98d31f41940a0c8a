//! Name-to-object resolution from a player's point of view.
//!
//! Resolution order:
//! 1. `me` and `here`
//! 2. Absolute `#n` references
//! 3. `*name` player lookup
//! 4. Exact names among the room's contents, the inventory, and the room's exits
//! 5. Unique name prefixes among the same candidates (exits excluded)

use mushlock_foundation::{Dbref, MatchResult, ObjectType};

use crate::object::ObjectStore;

/// The in-progress match a command is working on.
///
/// The database keeps one of these as ambient state. Anything that matches
/// names mid-command must snapshot and restore it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchState {
    /// Who is matching.
    pub player: Dbref,
    /// The name being matched.
    pub name: String,
    /// The outcome, once known.
    pub result: Option<MatchResult>,
}

impl MatchState {
    /// Creates a pending match for `player`.
    #[must_use]
    pub fn new(player: Dbref, name: impl Into<String>) -> Self {
        Self {
            player,
            name: name.into(),
            result: None,
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(Dbref::NOTHING, String::new())
    }
}

fn exit_aliases(name: &str) -> impl Iterator<Item = &str> {
    name.split(';').map(str::trim).filter(|a| !a.is_empty())
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name
            .as_bytes()
            .iter()
            .zip(prefix.as_bytes())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

fn name_of(objects: &ObjectStore, obj: Dbref) -> &str {
    objects.get(obj).map_or("", |o| o.name.as_str())
}

fn collapse(mut found: Vec<Dbref>) -> Option<MatchResult> {
    found.sort_unstable();
    found.dedup();
    match found.len() {
        0 => None,
        1 => Some(MatchResult::Found(found[0])),
        _ => Some(MatchResult::Ambiguous),
    }
}

/// Resolves `name` against everything `player` can reach.
#[must_use]
pub fn match_everything(objects: &ObjectStore, player: Dbref, name: &str) -> MatchResult {
    let name = name.trim();
    if name.is_empty() || !objects.is_good(player) {
        return MatchResult::NotFound;
    }
    if name.eq_ignore_ascii_case("me") {
        return MatchResult::Found(player);
    }
    let location = objects.get(player).map_or(Dbref::NOTHING, |o| o.location);
    if name.eq_ignore_ascii_case("here") {
        return if objects.is_good(location) {
            MatchResult::Found(location)
        } else {
            MatchResult::NotFound
        };
    }
    if let Some(digits) = name.strip_prefix('#') {
        return match digits.parse::<i32>() {
            Ok(n) if objects.is_good(Dbref::new(n)) => MatchResult::Found(Dbref::new(n)),
            _ => MatchResult::NotFound,
        };
    }
    if let Some(wanted) = name.strip_prefix('*') {
        let found = objects
            .iter_live()
            .filter(|d| {
                objects
                    .get(*d)
                    .is_some_and(|o| o.kind == ObjectType::Player && o.name.eq_ignore_ascii_case(wanted))
            })
            .collect();
        return collapse(found).unwrap_or(MatchResult::NotFound);
    }

    let mut candidates: Vec<Dbref> = Vec::new();
    let mut exits: Vec<Dbref> = Vec::new();
    if let Some(room) = objects.get(location) {
        candidates.extend(objects.chain(room.contents));
        exits.extend(objects.chain(room.exits));
    }
    if let Some(me) = objects.get(player) {
        candidates.extend(objects.chain(me.contents));
    }

    let exact: Vec<Dbref> = candidates
        .iter()
        .copied()
        .filter(|d| name_of(objects, *d).eq_ignore_ascii_case(name))
        .chain(
            exits
                .iter()
                .copied()
                .filter(|d| exit_aliases(name_of(objects, *d)).any(|a| a.eq_ignore_ascii_case(name))),
        )
        .collect();
    if let Some(result) = collapse(exact) {
        return result;
    }

    let partial: Vec<Dbref> = candidates
        .into_iter()
        .filter(|d| starts_with_ignore_case(name_of(objects, *d), name))
        .collect();
    collapse(partial).unwrap_or(MatchResult::NotFound)
}
