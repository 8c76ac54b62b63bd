//! Legality problems.
//!
//! A [`Problem`] is one violated constraint. Validation returns them as an
//! ordered list; an empty list means the team is accepted. Each variant
//! carries only the data its message needs.

use std::fmt;

use ladder_standards::EntityKind;
use serde::{Deserialize, Serialize};

/// One legality violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum Problem {
    // Team shape
    /// The team has no members.
    TeamEmpty,
    /// The team has more members than the format allows.
    TeamTooLarge { size: usize, max: usize },

    // Generic per-set checks
    /// The species does not resolve.
    UnknownSpecies { name: String },
    /// A move, item, or ability does not resolve.
    UnknownEntity {
        set: String,
        kind: EntityKind,
        name: String,
    },
    /// The entity was introduced after the active generation.
    NotInGen { name: String, generation: u8 },
    /// The entity exists but is not part of standard play.
    Nonstandard { kind: EntityKind, name: String },
    /// More than four distinct moves.
    TooManyMoves { set: String, count: usize },
    /// Level above the format maximum.
    LevelTooHigh { set: String, level: u32, max: u32 },
    /// Level below 1.
    LevelTooLow { set: String, level: u32 },

    // Banlist
    /// A banned species, ability, move, or item.
    Banned { name: String },
    /// The species belongs to a banned tier or category tag.
    BannedTag { species: String, tag: String },
    /// One set carries both halves of a compound ban.
    ComplexBanned {
        set: String,
        first: String,
        second: String,
    },

    // Clauses
    SpeciesClause { species: String },
    ItemClause { item: String },
    SameTypeClause,
    StrictSameTypeClause { set: String, forme: String },
    SashClause { count: usize },
    OhkoClause { name: String },

    // Point system
    /// Team cost above the budget.
    PointBudget { used: u32, max: u32 },
    /// Uber-weighted members carry too many zero-power moves between them.
    UberZeroPowerMoves { set: String },
}

impl Problem {
    /// Name of the rule that raised this problem, if any.
    pub fn rule(&self) -> Option<&'static str> {
        match self {
            Problem::SpeciesClause { .. } => Some("Species Clause"),
            Problem::ItemClause { .. } => Some("Item Clause"),
            Problem::SameTypeClause => Some("Same Type Clause"),
            Problem::StrictSameTypeClause { .. } => Some("Strict Same Type Clause"),
            Problem::SashClause { .. } => Some("Sash Clause"),
            Problem::OhkoClause { .. } => Some("OHKO Clause"),
            Problem::PointBudget { .. } | Problem::UberZeroPowerMoves { .. } => {
                Some("Point System")
            }
            _ => None,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::TeamEmpty => write!(f, "Your team has no Pokemon."),
            Problem::TeamTooLarge { size, max } => {
                write!(f, "Your team has {size} Pokemon, but the limit is {max}.")
            }
            Problem::UnknownSpecies { name } => {
                write!(f, "The Pokemon \"{name}\" does not exist.")
            }
            Problem::UnknownEntity { set, kind, name } => {
                write!(f, "{set}'s {kind} \"{name}\" does not exist.")
            }
            Problem::NotInGen { name, generation } => {
                write!(f, "{name} does not exist in gen {generation}.")
            },
            Problem::Nonstandard { kind, name } => write!(f, "{name} is not a real {kind}."),
            Problem::TooManyMoves { set, count } => {
                write!(f, "{set} has more than four moves ({count}).")
            }
            Problem::LevelTooHigh { set, level, max } => {
                write!(f, "{set} is level {level}, but the maximum level is {max}.")
            }
            Problem::LevelTooLow { set, level } => {
                write!(f, "{set} is level {level}, but the minimum level is 1.")
            }
            Problem::Banned { name } => write!(f, "{name} is banned."),
            Problem::BannedTag { species, tag } => {
                write!(f, "{species} is in {tag}, which is banned.")
            }
            Problem::ComplexBanned { set, first, second } => {
                write!(f, "{set} has the combination of {first} + {second}, which is banned.")
            }
            Problem::SpeciesClause { species } => {
                write!(f, "Species Clause: You cannot have more than one {species}.")
            }
            Problem::ItemClause { item } => {
                write!(f, "Item Clause: You cannot have more than one {item}.")
            }
            Problem::SameTypeClause => {
                write!(f, "Same Type Clause: Your team does not share a common type.")
            }
            Problem::StrictSameTypeClause { set, forme } => write!(
                f,
                "Strict Same Type Clause: {set} becomes {forme}, which does not share the team's type."
            ),
            Problem::SashClause { count } => {
                write!(f, "Sash Clause: Limit one Focus Sash (your team has {count}).")
            }
            Problem::OhkoClause { name } => write!(f, "OHKO Clause: {name} is banned."),
            Problem::PointBudget { used, max } => {
                write!(f, "Point System: Your team used {used}/{max} Points.")
            }
            Problem::UberZeroPowerMoves { set } => write!(
                f,
                "Point System: {set} pushes your Uber Pokemon past one zero-power move between them."
            ),
        }
    }
}
