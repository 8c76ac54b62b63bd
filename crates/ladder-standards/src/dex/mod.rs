//! Dex: in-memory entity metadata.
//!
//! All lookups are by normalized id, so "Will-O-Wisp", "will o wisp" and
//! "willowisp" resolve to the same record.

mod loader;
mod types;

use std::collections::{BTreeMap, BTreeSet};

use ladder_model::{Id, to_id};

pub use loader::{load_abilities, load_items, load_moves, load_species};
pub use types::{Ability, Item, Move, MoveCategory, Species, TIERS, TYPES};

use crate::embedded;
use crate::error::Result;
use crate::traits::EntityLookup;

/// Species, move, item, and ability tables.
#[derive(Debug, Clone, Default)]
pub struct Dex {
    species: BTreeMap<Id, Species>,
    moves: BTreeMap<Id, Move>,
    items: BTreeMap<Id, Item>,
    abilities: BTreeMap<Id, Ability>,
    /// Normalized tier and tag names seen on any species.
    tags: BTreeSet<Id>,
}

impl Dex {
    /// Build a dex from already-parsed tables.
    pub fn new(
        species: BTreeMap<Id, Species>,
        moves: BTreeMap<Id, Move>,
        items: BTreeMap<Id, Item>,
        abilities: BTreeMap<Id, Ability>,
    ) -> Self {
        let tags = species
            .values()
            .flat_map(|s| std::iter::once(s.tier.as_str()).chain(s.tags.iter().map(String::as_str)))
            .chain(TIERS.iter().copied())
            .map(Id::new)
            .filter(|id| !id.is_empty())
            .collect();
        Self {
            species,
            moves,
            items,
            abilities,
            tags,
        }
    }

    /// Parse a dex from CSV content.
    pub fn from_csv(species: &str, moves: &str, items: &str, abilities: &str) -> Result<Self> {
        Ok(Self::new(
            load_species(species, "species.csv")?,
            load_moves(moves, "moves.csv")?,
            load_items(items, "items.csv")?,
            load_abilities(abilities, "abilities.csv")?,
        ))
    }

    /// Load the embedded dex.
    pub fn embedded() -> Result<Self> {
        Self::from_csv(
            embedded::SPECIES,
            embedded::MOVES,
            embedded::ITEMS,
            embedded::ABILITIES,
        )
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// All formes sharing a dex number, in id order.
    pub fn formes_of(&self, num: u16) -> impl Iterator<Item = &Species> {
        self.species.values().filter(move |s| s.num == num)
    }
}

impl EntityLookup for Dex {
    fn species(&self, name: &str) -> Option<&Species> {
        self.species.get(to_id(name).as_str())
    }

    fn move_data(&self, name: &str) -> Option<&Move> {
        self.moves.get(to_id(name).as_str())
    }

    fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(to_id(name).as_str())
    }

    fn ability(&self, name: &str) -> Option<&Ability> {
        self.abilities.get(to_id(name).as_str())
    }

    fn is_tag(&self, name: &str) -> bool {
        self.tags.contains(to_id(name).as_str())
    }
}
