//! Roster entries and teams.

use serde::{Deserialize, Serialize};

use crate::id::Id;

/// Maximum number of distinct moves a set may carry.
pub const MAX_MOVES: usize = 4;

/// One roster entry.
///
/// Fields the submitter left out stay `None` (or empty) and simply skip the
/// checks that would need them. `forced_level` and `tier` are derived by the
/// validator and never read from input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokemonSet {
    /// Optional nickname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Species display name.
    pub species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    /// Move display names, in submission order.
    pub moves: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Level imposed by the format, filled in during validation.
    #[serde(skip)]
    pub forced_level: Option<u32>,
    /// Tier of the species, filled in during validation.
    #[serde(skip)]
    pub tier: Option<String>,
}

impl PokemonSet {
    /// Create a set with only a species.
    pub fn new(species: impl Into<String>) -> Self {
        Self {
            species: species.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    #[must_use]
    pub fn with_moves<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moves = moves.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn species_id(&self) -> Id {
        Id::new(&self.species)
    }

    /// Normalized item id; `None` when no item (or a blank one) is held.
    pub fn item_id(&self) -> Option<Id> {
        self.item
            .as_deref()
            .map(Id::new)
            .filter(|id| !id.is_empty())
    }

    /// Normalized ability id; `None` when absent or blank.
    pub fn ability_id(&self) -> Option<Id> {
        self.ability
            .as_deref()
            .map(Id::new)
            .filter(|id| !id.is_empty())
    }

    /// Normalized move ids in submission order, blanks skipped.
    pub fn move_ids(&self) -> Vec<Id> {
        self.moves
            .iter()
            .map(|m| Id::new(m))
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// Normalized move ids with repeats dropped, first occurrence kept.
    pub fn distinct_move_ids(&self) -> Vec<Id> {
        let mut ids = self.move_ids();
        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(id.clone()));
        ids
    }

    /// Number of distinct non-blank moves.
    pub fn distinct_move_count(&self) -> usize {
        self.distinct_move_ids().len()
    }

    /// The level this set battles at: forced level, then explicit level.
    pub fn effective_level(&self) -> Option<u32> {
        self.forced_level.or(self.level)
    }

    /// Name used in messages: nickname when set, otherwise the species.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.species,
        }
    }
}

/// An ordered roster submitted for validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    pub sets: Vec<PokemonSet>,
}

impl Team {
    pub fn new(sets: Vec<PokemonSet>) -> Self {
        Self { sets }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PokemonSet> {
        self.sets.iter()
    }
}

impl FromIterator<PokemonSet> for Team {
    fn from_iter<T: IntoIterator<Item = PokemonSet>>(iter: T) -> Self {
        Self {
            sets: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Team {
    type Item = &'a PokemonSet;
    type IntoIter = std::slice::Iter<'a, PokemonSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_moves_ignore_duplicates_and_blanks() {
        let set = PokemonSet::new("Pikachu").with_moves(["Tackle", "tackle", "", "Scratch"]);
        assert_eq!(set.distinct_move_count(), 2);
        assert_eq!(set.move_ids(), vec![Id::new("Tackle"), Id::new("Tackle"), Id::new("Scratch")]);
        assert_eq!(set.distinct_move_ids(), vec![Id::new("Tackle"), Id::new("Scratch")]);
    }

    #[test]
    fn blank_item_is_absent() {
        let set = PokemonSet::new("Pikachu").with_item("  ");
        assert_eq!(set.item_id(), None);
    }

    #[test]
    fn forced_level_wins() {
        let mut set = PokemonSet::new("Pikachu").with_level(100);
        set.forced_level = Some(50);
        assert_eq!(set.effective_level(), Some(50));
    }
}
