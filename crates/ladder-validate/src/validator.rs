//! Team legality validation.
//!
//! Problems are produced in four phases, each appending to one list:
//!
//! 1. generic per-set checks (after enforcement normalization)
//! 2. `validate_set` dispatch, per set in team order
//! 3. banlist and compound-ban checks
//! 4. `validate_team` dispatch
//!
//! No phase short-circuits; a team with one bad set still gets every other
//! problem reported.

use std::collections::BTreeSet;

use ladder_model::{Id, MAX_MOVES, PokemonSet, Team};
use ladder_standards::{EntityKind, EntityLookup};
use tracing::{info_span, trace};

use crate::context::ValidationContext;
use crate::enforcement;
use crate::problem::Problem;
use crate::registry::Format;
use crate::resolver::EffectiveRuleset;
use crate::rules::Capabilities;

/// Validates sets and teams against one resolved format.
pub struct Validator<'a> {
    format: &'a Format,
    ruleset: &'a EffectiveRuleset,
    dex: &'a dyn EntityLookup,
}

impl<'a> Validator<'a> {
    pub fn new(
        format: &'a Format,
        ruleset: &'a EffectiveRuleset,
        dex: &'a dyn EntityLookup,
    ) -> Self {
        Self {
            format,
            ruleset,
            dex,
        }
    }

    /// Validate a whole team. Sets are normalized in place.
    pub fn validate_team(&self, team: &mut Team) -> Vec<Problem> {
        let span = info_span!("validate", format = %self.format.id, sets = team.len());
        let _enter = span.enter();

        let mut problems = Vec::new();
        if team.is_empty() {
            problems.push(Problem::TeamEmpty);
        } else if team.len() > self.format.team_size {
            problems.push(Problem::TeamTooLarge {
                size: team.len(),
                max: self.format.team_size,
            });
        }

        for set in &mut team.sets {
            self.prepare(set);
            problems.extend(self.check_generic(set));
        }

        let team: &Team = team;
        let mut ctx = ValidationContext::new(self.format, self.ruleset, self.dex);
        for set in team {
            for rule in self.ruleset.rules_with(Capabilities::VALIDATE_SET) {
                trace!(rule = %rule.name(), species = %set.species, "validate_set");
                problems.extend(rule.validate_set(set, &mut ctx));
            }
        }

        for set in team {
            problems.extend(self.check_bans(set));
        }

        for rule in self.ruleset.rules_with(Capabilities::VALIDATE_TEAM) {
            trace!(rule = %rule.name(), "validate_team");
            problems.extend(rule.validate_team(team, &mut ctx));
        }

        problems
    }

    /// Validate a single set, without team-level rules.
    pub fn validate_set(&self, set: &mut PokemonSet) -> Vec<Problem> {
        let span = info_span!("validate_set", format = %self.format.id, species = %set.species);
        let _enter = span.enter();

        self.prepare(set);
        let mut problems = self.check_generic(set);

        let set: &PokemonSet = set;
        let mut ctx = ValidationContext::new(self.format, self.ruleset, self.dex);
        for rule in self.ruleset.rules_with(Capabilities::VALIDATE_SET) {
            problems.extend(rule.validate_set(set, &mut ctx));
        }
        problems.extend(self.check_bans(set));
        problems
    }

    /// Normalize under enforcement, then derive `tier` and `forced_level`.
    fn prepare(&self, set: &mut PokemonSet) {
        if self.ruleset.enforces_legality() {
            enforcement::normalize(set, self.dex);
        }
        set.tier = self.dex.species(&set.species).map(|s| s.tier.clone());
        set.forced_level = self.format.forced_level;
    }

    fn check_generic(&self, set: &PokemonSet) -> Vec<Problem> {
        let mut problems = Vec::new();
        let holder = set.display_name();

        match self.dex.species(&set.species) {
            Some(_) => self.check_entity(EntityKind::Species, &set.species, holder, &mut problems),
            None => problems.push(Problem::UnknownSpecies {
                name: set.species.clone(),
            }),
        }
        if let Some(ability) = set.ability.as_deref().filter(|a| !a.trim().is_empty()) {
            self.check_entity(EntityKind::Ability, ability, holder, &mut problems);
        }
        let mut seen = BTreeSet::new();
        for name in &set.moves {
            let id = Id::new(name);
            if !id.is_empty() && seen.insert(id) {
                self.check_entity(EntityKind::Move, name, holder, &mut problems);
            }
        }
        if let Some(item) = set.item.as_deref().filter(|i| !i.trim().is_empty()) {
            self.check_entity(EntityKind::Item, item, holder, &mut problems);
        }

        let count = set.distinct_move_count();
        if count > MAX_MOVES {
            problems.push(Problem::TooManyMoves {
                set: holder.to_string(),
                count,
            });
        }
        match set.effective_level() {
            Some(0) => problems.push(Problem::LevelTooLow {
                set: holder.to_string(),
                level: 0,
            }),
            Some(level) if level > self.format.max_level => problems.push(Problem::LevelTooHigh {
                set: holder.to_string(),
                level,
                max: self.format.max_level,
            }),
            _ => {}
        }
        problems
    }

    fn check_entity(&self, kind: EntityKind, name: &str, holder: &str, problems: &mut Vec<Problem>) {
        let Some(entity) = self.dex.lookup(kind, name) else {
            problems.push(Problem::UnknownEntity {
                set: holder.to_string(),
                kind,
                name: name.to_string(),
            });
            return;
        };
        if entity.generation() > self.format.generation {
            problems.push(Problem::NotInGen {
                name: entity.name().to_string(),
                generation: self.format.generation,
            });
        }
        if entity.is_nonstandard() {
            problems.push(Problem::Nonstandard {
                kind,
                name: entity.name().to_string(),
            });
        }
    }

    fn check_bans(&self, set: &PokemonSet) -> Vec<Problem> {
        let ruleset = self.ruleset;
        let mut problems = Vec::new();
        let mut keys: BTreeSet<Id> = BTreeSet::new();

        if let Some(species) = self.dex.species(&set.species) {
            let base = species.base_species_id();
            keys.insert(species.id.clone());
            keys.insert(base.clone());

            let banned = ruleset.is_banned(&species.id);
            let allowed = ruleset.is_allowed(&species.id);
            if banned {
                problems.push(Problem::Banned {
                    name: species.name.clone(),
                });
            } else if !allowed && !species.is_base_forme() && ruleset.is_banned(&base) {
                problems.push(Problem::Banned {
                    name: species.name.clone(),
                });
            }

            // Tag keys always feed compound bans; an unban only lifts the tag ban itself.
            let tier = set.tier.as_deref().unwrap_or(&species.tier);
            for tag in std::iter::once(tier).chain(species.tags.iter().map(String::as_str)) {
                let tag_id = Id::new(tag);
                if !banned && !allowed && ruleset.is_banned(&tag_id) {
                    problems.push(Problem::BannedTag {
                        species: species.name.clone(),
                        tag: tag.to_string(),
                    });
                }
                keys.insert(tag_id);
            }
        }

        let ability = set.ability.as_deref().map(|name| (EntityKind::Ability, name));
        let item = set.item.as_deref().map(|name| (EntityKind::Item, name));
        let moves = set.moves.iter().map(|name| (EntityKind::Move, name.as_str()));
        for (kind, name) in ability.into_iter().chain(moves).chain(item) {
            let id = Id::new(name);
            if id.is_empty() || !keys.insert(id.clone()) {
                continue;
            }
            if ruleset.is_banned(&id) {
                problems.push(Problem::Banned {
                    name: self.display_name(kind, name),
                });
            }
        }

        for pair in &ruleset.complex_bans {
            if keys.contains(pair.first()) && keys.contains(pair.second()) {
                problems.push(Problem::ComplexBanned {
                    set: set.display_name().to_string(),
                    first: self.id_name(pair.first()),
                    second: self.id_name(pair.second()),
                });
            }
        }
        problems
    }

    fn display_name(&self, kind: EntityKind, name: &str) -> String {
        self.dex
            .lookup(kind, name)
            .map_or_else(|| name.to_string(), |entity| entity.name().to_string())
    }

    /// Display name for a bare id, trying each entity kind.
    fn id_name(&self, id: &Id) -> String {
        [
            EntityKind::Species,
            EntityKind::Ability,
            EntityKind::Move,
            EntityKind::Item,
        ]
        .into_iter()
        .find_map(|kind| self.dex.lookup(kind, id.as_str()))
        .map_or_else(|| id.to_string(), |entity| entity.name().to_string())
    }
}
