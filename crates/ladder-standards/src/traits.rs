//! Entity lookup abstraction.
//!
//! The validator never touches dex tables directly; it resolves names through
//! [`EntityLookup`], so tests and embedders can supply their own metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dex::{Ability, Item, Move, Species, TYPES};

/// The kinds of entity a name can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Species,
    Move,
    Item,
    Ability,
    Type,
}

impl EntityKind {
    /// Noun used in messages ("is not a real Pokemon").
    pub fn noun(&self) -> &'static str {
        match self {
            EntityKind::Species => "Pokemon",
            EntityKind::Move => "move",
            EntityKind::Item => "item",
            EntityKind::Ability => "ability",
            EntityKind::Type => "type",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// A kind-generic view over one looked-up record.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Species(&'a Species),
    Move(&'a Move),
    Item(&'a Item),
    Ability(&'a Ability),
    Type(&'static str),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Species(_) => EntityKind::Species,
            EntityRef::Move(_) => EntityKind::Move,
            EntityRef::Item(_) => EntityKind::Item,
            EntityRef::Ability(_) => EntityKind::Ability,
            EntityRef::Type(_) => EntityKind::Type,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EntityRef::Species(s) => &s.name,
            EntityRef::Move(m) => &m.name,
            EntityRef::Item(i) => &i.name,
            EntityRef::Ability(a) => &a.name,
            EntityRef::Type(t) => t,
        }
    }

    /// Generation of introduction; types exist in every generation.
    pub fn generation(&self) -> u8 {
        match self {
            EntityRef::Species(s) => s.generation,
            EntityRef::Move(m) => m.generation,
            EntityRef::Item(i) => i.generation,
            EntityRef::Ability(a) => a.generation,
            EntityRef::Type(_) => 1,
        }
    }

    pub fn is_nonstandard(&self) -> bool {
        match self {
            EntityRef::Species(s) => s.nonstandard.is_some(),
            EntityRef::Move(m) => m.nonstandard.is_some(),
            EntityRef::Item(i) => i.nonstandard.is_some(),
            EntityRef::Ability(a) => a.nonstandard.is_some(),
            EntityRef::Type(_) => false,
        }
    }
}

/// Resolves names to entity records.
///
/// Implementations must be pure in-memory lookups: validation calls these on
/// every request and never expects I/O.
pub trait EntityLookup: Send + Sync {
    fn species(&self, name: &str) -> Option<&Species>;

    fn move_data(&self, name: &str) -> Option<&Move>;

    fn item(&self, name: &str) -> Option<&Item>;

    fn ability(&self, name: &str) -> Option<&Ability>;

    /// True when `name` is a category tag (tier or species tag).
    fn is_tag(&self, name: &str) -> bool;

    /// Resolve an elemental type name to its canonical spelling.
    fn type_name(&self, name: &str) -> Option<&'static str> {
        TYPES
            .iter()
            .copied()
            .find(|t| t.eq_ignore_ascii_case(name.trim()))
    }

    /// Kind-generic lookup.
    fn lookup(&self, kind: EntityKind, name: &str) -> Option<EntityRef<'_>> {
        match kind {
            EntityKind::Species => self.species(name).map(EntityRef::Species),
            EntityKind::Move => self.move_data(name).map(EntityRef::Move),
            EntityKind::Item => self.item(name).map(EntityRef::Item),
            EntityKind::Ability => self.ability(name).map(EntityRef::Ability),
            EntityKind::Type => self.type_name(name).map(EntityRef::Type),
        }
    }

    /// True when `name` resolves to anything a banlist may name.
    fn is_known(&self, name: &str) -> bool {
        self.species(name).is_some()
            || self.move_data(name).is_some()
            || self.item(name).is_some()
            || self.ability(name).is_some()
            || self.is_tag(name)
    }
}
