//! Rule and clause library.
//!
//! Rules are keyed by [`RuleKind`] and advertise their hooks through a
//! [`Capabilities`] set, so dispatch never probes for a hook by name. A
//! derived rule holds its base rule directly and calls it.

mod clauses;
mod library;
pub mod points;

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use ladder_model::{Id, PokemonSet, Team};

pub use library::RuleLibrary;

use crate::context::ValidationContext;
use crate::hooks::{MatchState, MessageKind, MessageSink, StatusDecision, StatusEvent};
use crate::problem::Problem;

bitflags! {
    /// Hooks a rule implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Capabilities: u8 {
        const ON_START = 1 << 0;
        const VALIDATE_SET = 1 << 1;
        const VALIDATE_TEAM = 1 << 2;
        const ON_SET_STATUS = 1 << 3;
    }
}

/// Every rule the library knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleKind {
    LegalityEnforcement,
    SpeciesClause,
    ItemClause,
    SameTypeClause,
    StrictSameTypeClause,
    SashClause,
    OhkoClause,
    SleepClauseMod,
    PointSystem,
}

impl RuleKind {
    pub const ALL: [RuleKind; 9] = [
        RuleKind::LegalityEnforcement,
        RuleKind::SpeciesClause,
        RuleKind::ItemClause,
        RuleKind::SameTypeClause,
        RuleKind::StrictSameTypeClause,
        RuleKind::SashClause,
        RuleKind::OhkoClause,
        RuleKind::SleepClauseMod,
        RuleKind::PointSystem,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::LegalityEnforcement => "Legality Enforcement",
            RuleKind::SpeciesClause => "Species Clause",
            RuleKind::ItemClause => "Item Clause",
            RuleKind::SameTypeClause => "Same Type Clause",
            RuleKind::StrictSameTypeClause => "Strict Same Type Clause",
            RuleKind::SashClause => "Sash Clause",
            RuleKind::OhkoClause => "OHKO Clause",
            RuleKind::SleepClauseMod => "Sleep Clause Mod",
            RuleKind::PointSystem => "Point System",
        }
    }

    /// Announcement text shown at match start.
    pub fn description(&self) -> &'static str {
        match self {
            RuleKind::LegalityEnforcement => "Sets must be legal in the active generation",
            RuleKind::SpeciesClause => "Limit one of each Pokemon",
            RuleKind::ItemClause => "Limit one of each item",
            RuleKind::SameTypeClause => "Pokemon in a team must share a type",
            RuleKind::StrictSameTypeClause => {
                "Pokemon in a team must share a type, including forme changes"
            }
            RuleKind::SashClause => "Limit one Focus Sash",
            RuleKind::OhkoClause => "OHKO moves are banned",
            RuleKind::SleepClauseMod => "Limit one foe put to sleep",
            RuleKind::PointSystem => "Teams are limited to 2000 points",
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            RuleKind::LegalityEnforcement => Capabilities::empty(),
            RuleKind::OhkoClause => Capabilities::ON_START | Capabilities::VALIDATE_SET,
            RuleKind::SleepClauseMod => Capabilities::ON_START | Capabilities::ON_SET_STATUS,
            RuleKind::SpeciesClause
            | RuleKind::ItemClause
            | RuleKind::SameTypeClause
            | RuleKind::StrictSameTypeClause
            | RuleKind::SashClause
            | RuleKind::PointSystem => Capabilities::ON_START | Capabilities::VALIDATE_TEAM,
        }
    }
}

/// A library rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    kind: RuleKind,
    /// Rule this one extends; invoked explicitly before the extra pass.
    base: Option<Arc<Rule>>,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        Self { kind, base: None }
    }

    /// A rule that runs `base` and then its own checks.
    pub fn derived(kind: RuleKind, base: Arc<Rule>) -> Self {
        Self {
            kind,
            base: Some(base),
        }
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn id(&self) -> Id {
        Id::new(self.kind.name())
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn base(&self) -> Option<&Arc<Rule>> {
        self.base.as_ref()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    pub fn has(&self, capability: Capabilities) -> bool {
        self.capabilities().contains(capability)
    }

    pub fn on_start(&self, sink: &mut dyn MessageSink) {
        if self.has(Capabilities::ON_START) {
            let text = format!("{}: {}", self.name(), self.kind.description());
            sink.emit(MessageKind::Rule, &text);
        }
    }

    pub fn validate_set(&self, set: &PokemonSet, ctx: &mut ValidationContext<'_>) -> Vec<Problem> {
        match self.kind {
            RuleKind::OhkoClause => clauses::ohko_clause(set, ctx),
            _ => Vec::new(),
        }
    }

    pub fn validate_team(&self, team: &Team, ctx: &mut ValidationContext<'_>) -> Vec<Problem> {
        match self.kind {
            RuleKind::SpeciesClause => clauses::species_clause(team, ctx),
            RuleKind::ItemClause => clauses::item_clause(team, ctx),
            RuleKind::SameTypeClause => clauses::same_type_clause(team, ctx),
            RuleKind::StrictSameTypeClause => {
                let mut problems = match &self.base {
                    Some(base) => base.validate_team(team, ctx),
                    None => Vec::new(),
                };
                if problems.is_empty() {
                    problems.extend(clauses::strict_formes(team, ctx));
                }
                problems
            }
            RuleKind::SashClause => clauses::sash_clause(team),
            RuleKind::PointSystem => points::validate_team(team, ctx),
            _ => Vec::new(),
        }
    }

    pub fn on_set_status(&self, state: &mut MatchState, event: &StatusEvent) -> StatusDecision {
        match self.kind {
            RuleKind::SleepClauseMod => clauses::sleep_clause(state, event),
            _ => StatusDecision::Allow,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
