//! Point System: a weighted team budget.
//!
//! Each set costs the sum of its tier, ability, move, and item weights.
//! Ids missing from a table weigh 0.

use ladder_model::{Id, PokemonSet, Team};
use tracing::debug;

use crate::context::ValidationContext;
use crate::problem::Problem;

/// Team budget.
pub const MAX_POINTS: u32 = 2000;

/// Zero-power moves allowed across all top-tier sets.
pub const MAX_UBER_ZERO_POWER_MOVES: usize = 1;

pub const TIER_WEIGHTS: &[(&str, u32)] = &[
    ("uber", 400),
    ("ou", 300),
    ("uubl", 250),
    ("uu", 200),
    ("rubl", 175),
    ("ru", 150),
    ("nubl", 125),
    ("nu", 100),
    ("pu", 75),
    ("nfe", 50),
    ("lc", 25),
];

pub const ABILITY_WEIGHTS: &[(&str, u32)] = &[
    ("hugepower", 100),
    ("purepower", 100),
    ("speedboost", 80),
    ("protean", 70),
    ("drizzle", 60),
    ("drought", 60),
    ("magicguard", 50),
    ("regenerator", 40),
    ("intimidate", 30),
    ("levitate", 20),
    ("technician", 20),
    ("swiftswim", 20),
];

pub const MOVE_WEIGHTS: &[(&str, u32)] = &[
    ("shellsmash", 60),
    ("spore", 50),
    ("batonpass", 40),
    ("dragondance", 40),
    ("quiverdance", 40),
    ("swordsdance", 30),
    ("nastyplot", 30),
    ("calmmind", 20),
    ("stealthrock", 20),
    ("recover", 20),
    ("roost", 20),
    ("willowisp", 10),
    ("earthquake", 10),
    ("uturn", 10),
    ("knockoff", 10),
];

pub const ITEM_WEIGHTS: &[(&str, u32)] = &[
    ("choicescarf", 40),
    ("choiceband", 40),
    ("choicespecs", 40),
    ("lifeorb", 30),
    ("focussash", 30),
    ("leftovers", 20),
    ("assaultvest", 20),
    ("heavydutyboots", 10),
];

fn weight(table: &[(&str, u32)], id: &str) -> u32 {
    table
        .iter()
        .find(|(key, _)| *key == id)
        .map_or(0, |(_, weight)| *weight)
}

fn max_tier_weight() -> u32 {
    TIER_WEIGHTS.iter().map(|(_, w)| *w).max().unwrap_or(0)
}

/// Weight of the set's derived tier.
pub fn tier_weight(set: &PokemonSet) -> u32 {
    set.tier
        .as_deref()
        .map_or(0, |tier| weight(TIER_WEIGHTS, Id::new(tier).as_str()))
}

/// Cost of one set.
pub fn set_cost(set: &PokemonSet) -> u32 {
    let ability = set
        .ability_id()
        .map_or(0, |id| weight(ABILITY_WEIGHTS, id.as_str()));
    let item = set
        .item_id()
        .map_or(0, |id| weight(ITEM_WEIGHTS, id.as_str()));
    let moves: u32 = set
        .distinct_move_ids()
        .iter()
        .map(|id| weight(MOVE_WEIGHTS, id.as_str()))
        .sum();
    tier_weight(set) + ability + moves + item
}

/// Cost of the whole team.
pub fn team_cost(team: &Team) -> u32 {
    team.iter().map(set_cost).sum()
}

pub(super) fn validate_team(team: &Team, ctx: &mut ValidationContext<'_>) -> Vec<Problem> {
    let mut problems = Vec::new();

    let used = team_cost(team);
    debug!(used, max = MAX_POINTS, "Point System cost");
    if used > MAX_POINTS {
        problems.push(Problem::PointBudget {
            used,
            max: MAX_POINTS,
        });
    }

    let top = max_tier_weight();
    for set in team {
        if tier_weight(set) != top {
            continue;
        }
        let zero_power = set
            .distinct_move_ids()
            .iter()
            .filter_map(|id| ctx.dex.move_data(id.as_str()))
            .filter(|m| m.base_power == 0)
            .count();
        ctx.uber_zero_power_moves += zero_power;
        if ctx.uber_zero_power_moves > MAX_UBER_ZERO_POWER_MOVES {
            problems.push(Problem::UberZeroPowerMoves {
                set: set.display_name().to_string(),
            });
            break;
        }
    }

    problems
}
