//! Clause implementations.

use std::collections::{BTreeMap, BTreeSet};

use ladder_model::{PokemonSet, Team};
use ladder_standards::{EntityLookup, TYPES};
use tracing::debug;

use crate::context::ValidationContext;
use crate::hooks::{MatchState, Status, StatusDecision, StatusEvent};
use crate::problem::Problem;

const FOCUS_SASH: &str = "focussash";

/// No species number may appear twice.
pub(super) fn species_clause(team: &Team, ctx: &ValidationContext<'_>) -> Vec<Problem> {
    let mut counts: BTreeMap<u16, usize> = BTreeMap::new();
    let mut problems = Vec::new();
    for set in team {
        let Some(species) = ctx.dex.species(&set.species) else {
            continue;
        };
        let count = counts.entry(species.num).or_default();
        *count += 1;
        if *count == 2 {
            problems.push(Problem::SpeciesClause {
                species: species.base_species.clone(),
            });
        }
    }
    problems
}

/// No held item may appear twice. Sets without an item are ignored.
pub(super) fn item_clause(team: &Team, ctx: &ValidationContext<'_>) -> Vec<Problem> {
    let mut counts = BTreeMap::new();
    let mut problems = Vec::new();
    for set in team {
        let Some(item_id) = set.item_id() else {
            continue;
        };
        let count: &mut usize = counts.entry(item_id).or_default();
        *count += 1;
        if *count == 2 {
            let item = set.item.as_deref().unwrap_or_default();
            let name = ctx.dex.item(item).map_or(item, |i| i.name.as_str());
            problems.push(Problem::ItemClause {
                item: name.to_string(),
            });
        }
    }
    problems
}

/// Some type must be shared by every member.
pub(super) fn same_type_clause(team: &Team, ctx: &ValidationContext<'_>) -> Vec<Problem> {
    if team.is_empty() || !common_types(team, ctx.dex).is_empty() {
        return Vec::new();
    }
    vec![Problem::SameTypeClause]
}

/// Item-forced formes must keep a type the whole team shares.
pub(super) fn strict_formes(team: &Team, ctx: &ValidationContext<'_>) -> Vec<Problem> {
    let dex = ctx.dex;
    let mut shared = common_types(team, dex);
    for set in team {
        let Some(species) = dex.species(&set.species) else {
            continue;
        };
        let Some(item) = set.item.as_deref().and_then(|name| dex.item(name)) else {
            continue;
        };
        if item.forme_of != Some(species.num) {
            continue;
        }
        let Some(forme) = item.forme.as_deref().and_then(|name| dex.species(name)) else {
            continue;
        };
        shared.retain(|t| forme.has_type(t));
        if shared.is_empty() {
            return vec![Problem::StrictSameTypeClause {
                set: set.display_name().to_string(),
                forme: forme.name.clone(),
            }];
        }
    }
    Vec::new()
}

/// At most one Focus Sash per team.
pub(super) fn sash_clause(team: &Team) -> Vec<Problem> {
    let count = team
        .iter()
        .filter(|set| set.item_id().is_some_and(|id| id == FOCUS_SASH))
        .count();
    if count > 1 {
        vec![Problem::SashClause { count }]
    } else {
        Vec::new()
    }
}

/// Every OHKO move is banned on its own.
pub(super) fn ohko_clause(set: &PokemonSet, ctx: &ValidationContext<'_>) -> Vec<Problem> {
    let mut seen = BTreeSet::new();
    set.moves
        .iter()
        .filter_map(|name| ctx.dex.move_data(name))
        .filter(|m| m.ohko && seen.insert(m.id.clone()))
        .map(|m| Problem::OhkoClause {
            name: m.name.clone(),
        })
        .collect()
}

/// The opponent may keep only one of a side's members asleep at a time.
pub(super) fn sleep_clause(state: &mut MatchState, event: &StatusEvent) -> StatusDecision {
    if event.status != Status::Sleep || !event.caused_by_opponent() {
        return StatusDecision::Allow;
    }
    let slots = state.slept_by_opponent.entry(event.side).or_default();
    if slots.iter().any(|&slot| slot != event.slot) {
        debug!(side = event.side, slot = event.slot, "Sleep Clause Mod blocked sleep");
        return StatusDecision::Block("Sleep Clause Mod activated.".to_string());
    }
    slots.insert(event.slot);
    StatusDecision::Allow
}

/// Types held by every member of the team.
fn common_types(team: &Team, dex: &dyn EntityLookup) -> Vec<&'static str> {
    let species: Vec<_> = team.iter().map(|set| dex.species(&set.species)).collect();
    TYPES
        .iter()
        .copied()
        .filter(|t| {
            species
                .iter()
                .filter(|s| s.is_some_and(|s| s.has_type(t)))
                .count()
                == team.len()
        })
        .collect()
}
