//! Legality-enforcement normalization.
//!
//! Runs before any check when the ruleset carries the legality enforcement
//! key. It only rewrites the set; it never reports a problem.

use std::collections::BTreeSet;

use ladder_model::{Id, PokemonSet};
use ladder_standards::EntityLookup;
use tracing::debug;

/// What decides a species' forme.
#[derive(Debug, Clone, Copy)]
enum FormeDriver {
    /// The held item's forced forme, or the base forme without one.
    Item,
    /// `forme` when the set knows `move_id`, otherwise the base forme.
    Move {
        move_id: &'static str,
        forme: &'static str,
    },
}

/// Species whose forme follows from the set, keyed by dex number.
const FORME_RULES: &[(u16, FormeDriver)] = &[
    (487, FormeDriver::Item),
    (493, FormeDriver::Item),
    (647, FormeDriver::Move {
        move_id: "secretsword",
        forme: "Keldeo-Resolute",
    }),
    (649, FormeDriver::Item),
];

/// Normalize `set` in place.
pub fn normalize(set: &mut PokemonSet, dex: &dyn EntityLookup) {
    dedupe_moves(set);
    apply_forme(set, dex);
}

/// Keep the first occurrence of each move.
fn dedupe_moves(set: &mut PokemonSet) {
    let mut seen = BTreeSet::new();
    let before = set.moves.len();
    set.moves.retain(|name| {
        let id = Id::new(name);
        id.is_empty() || seen.insert(id)
    });
    if set.moves.len() != before {
        debug!(species = %set.species, dropped = before - set.moves.len(), "Dropped duplicate moves");
    }
}

fn apply_forme(set: &mut PokemonSet, dex: &dyn EntityLookup) {
    let Some(species) = dex.species(&set.species) else {
        return;
    };
    let Some((_, driver)) = FORME_RULES.iter().find(|(num, _)| *num == species.num) else {
        return;
    };
    let forme = match driver {
        FormeDriver::Item => set
            .item
            .as_deref()
            .and_then(|name| dex.item(name))
            .filter(|item| item.forme_of == Some(species.num))
            .and_then(|item| item.forme.clone())
            .unwrap_or_else(|| species.base_species.clone()),
        FormeDriver::Move { move_id, forme } => {
            if set.move_ids().iter().any(|id| id == move_id) {
                (*forme).to_string()
            } else {
                species.base_species.clone()
            }
        }
    };
    if Id::new(&forme) != species.id {
        debug!(from = %species.name, to = %forme, "Rewrote forme");
        set.species = forme;
    }
}
