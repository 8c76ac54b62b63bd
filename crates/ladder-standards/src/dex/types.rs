//! Dex record types.

use ladder_model::Id;
use serde::{Deserialize, Serialize};

/// The eighteen elemental types.
pub const TYPES: &[&str] = &[
    "Normal", "Fire", "Water", "Electric", "Grass", "Ice", "Fighting", "Poison", "Ground",
    "Flying", "Psychic", "Bug", "Rock", "Ghost", "Dragon", "Dark", "Steel", "Fairy",
];

/// Usage tiers, strongest first. Always valid ban targets even when no
/// loaded species sits in them.
pub const TIERS: &[&str] = &[
    "Uber", "OU", "UUBL", "UU", "RUBL", "RU", "NUBL", "NU", "PUBL", "PU", "NFE", "LC",
];

/// A species or forme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: Id,
    /// National dex number, shared by every forme of a species.
    pub num: u16,
    pub name: String,
    /// Display name of the base forme ("Giratina" for "Giratina-Origin").
    pub base_species: String,
    /// Generation the forme was introduced in.
    pub generation: u8,
    pub types: Vec<String>,
    /// Tier tag ("Uber", "OU", ...).
    pub tier: String,
    /// Extra category tags ("Mythical", "Restricted Legendary").
    pub tags: Vec<String>,
    /// Set when the forme is not obtainable in standard play.
    pub nonstandard: Option<String>,
}

impl Species {
    pub fn base_species_id(&self) -> Id {
        Id::new(&self.base_species)
    }

    pub fn is_base_forme(&self) -> bool {
        self.id == self.base_species_id()
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(type_name))
    }
}

/// Damage category of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "physical" => Some(Self::Physical),
            "special" => Some(Self::Special),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// A move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub id: Id,
    pub name: String,
    pub generation: u8,
    pub move_type: String,
    pub category: MoveCategory,
    /// Base power; 0 for status moves and fixed-damage OHKO moves.
    pub base_power: u32,
    pub ohko: bool,
    pub nonstandard: Option<String>,
}

/// A held item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    pub name: String,
    pub generation: u8,
    /// Dex number of the species this item forces into a forme.
    pub forme_of: Option<u16>,
    /// Forme display name forced by this item.
    pub forme: Option<String>,
    pub nonstandard: Option<String>,
}

/// An ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: Id,
    pub name: String,
    pub generation: u8,
    pub nonstandard: Option<String>,
}
