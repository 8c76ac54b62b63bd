//! Dex CSV loading.
//!
//! Each table is parsed from string content so the same code serves the
//! embedded data and files read from a data directory.

use std::collections::BTreeMap;
use std::io::Cursor;

use ladder_model::Id;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::types::{Ability, Item, Move, MoveCategory, Species};
use crate::error::{Result, StandardsError};

// =============================================================================
// Public Loading Functions
// =============================================================================

/// Load species rows, keyed by normalized name.
pub fn load_species(content: &str, file: &str) -> Result<BTreeMap<Id, Species>> {
    let mut out = BTreeMap::new();
    for row in read_rows::<SpeciesRow>(content, file)? {
        let name = row.name.trim().to_string();
        let types: Vec<String> = split_list(&row.types, '/');
        if types.is_empty() {
            return Err(invalid("Types", &row.types, file));
        }
        let base_species = match row.base_species.trim() {
            "" => name.clone(),
            base => base.to_string(),
        };
        let species = Species {
            id: Id::new(&name),
            num: parse_num(&row.num, "Num", file)?,
            base_species,
            generation: parse_num(&row.generation, "Gen", file)?,
            types,
            tier: row.tier.trim().to_string(),
            tags: split_list(&row.tags, ';'),
            nonstandard: non_empty(&row.nonstandard),
            name,
        };
        insert_unique(&mut out, species.id.clone(), species, file)?;
    }
    Ok(out)
}

/// Load move rows, keyed by normalized name.
pub fn load_moves(content: &str, file: &str) -> Result<BTreeMap<Id, Move>> {
    let mut out = BTreeMap::new();
    for row in read_rows::<MoveRow>(content, file)? {
        let category = MoveCategory::parse(&row.category)
            .ok_or_else(|| invalid("Category", &row.category, file))?;
        let name = row.name.trim().to_string();
        let record = Move {
            id: Id::new(&name),
            generation: parse_num(&row.generation, "Gen", file)?,
            move_type: row.move_type.trim().to_string(),
            category,
            base_power: parse_num(&row.base_power, "Base Power", file)?,
            ohko: is_yes(&row.ohko),
            nonstandard: non_empty(&row.nonstandard),
            name,
        };
        insert_unique(&mut out, record.id.clone(), record, file)?;
    }
    Ok(out)
}

/// Load item rows, keyed by normalized name.
pub fn load_items(content: &str, file: &str) -> Result<BTreeMap<Id, Item>> {
    let mut out = BTreeMap::new();
    for row in read_rows::<ItemRow>(content, file)? {
        let forme_of = match row.forme_of.trim() {
            "" => None,
            value => Some(parse_num(value, "Forme Of", file)?),
        };
        let forme = non_empty(&row.forme);
        if forme_of.is_some() != forme.is_some() {
            return Err(invalid("Forme", &row.forme, file));
        }
        let name = row.name.trim().to_string();
        let item = Item {
            id: Id::new(&name),
            generation: parse_num(&row.generation, "Gen", file)?,
            forme_of,
            forme,
            nonstandard: non_empty(&row.nonstandard),
            name,
        };
        insert_unique(&mut out, item.id.clone(), item, file)?;
    }
    Ok(out)
}

/// Load ability rows, keyed by normalized name.
pub fn load_abilities(content: &str, file: &str) -> Result<BTreeMap<Id, Ability>> {
    let mut out = BTreeMap::new();
    for row in read_rows::<AbilityRow>(content, file)? {
        let name = row.name.trim().to_string();
        let ability = Ability {
            id: Id::new(&name),
            generation: parse_num(&row.generation, "Gen", file)?,
            nonstandard: non_empty(&row.nonstandard),
            name,
        };
        insert_unique(&mut out, ability.id.clone(), ability, file)?;
    }
    Ok(out)
}

// =============================================================================
// CSV Row Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SpeciesRow {
    #[serde(rename = "Num")]
    num: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Base Species")]
    base_species: String,
    #[serde(rename = "Gen")]
    generation: String,
    #[serde(rename = "Types")]
    types: String,
    #[serde(rename = "Tier")]
    tier: String,
    #[serde(rename = "Tags")]
    tags: String,
    #[serde(rename = "Nonstandard")]
    nonstandard: String,
}

#[derive(Debug, Deserialize)]
struct MoveRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Gen")]
    generation: String,
    #[serde(rename = "Type")]
    move_type: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Base Power")]
    base_power: String,
    #[serde(rename = "OHKO")]
    ohko: String,
    #[serde(rename = "Nonstandard")]
    nonstandard: String,
}

#[derive(Debug, Deserialize)]
struct ItemRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Gen")]
    generation: String,
    #[serde(rename = "Forme Of")]
    forme_of: String,
    #[serde(rename = "Forme")]
    forme: String,
    #[serde(rename = "Nonstandard")]
    nonstandard: String,
}

#[derive(Debug, Deserialize)]
struct AbilityRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Gen")]
    generation: String,
    #[serde(rename = "Nonstandard")]
    nonstandard: String,
}

// =============================================================================
// Helpers
// =============================================================================

fn read_rows<T: DeserializeOwned>(content: &str, file: &str) -> Result<Vec<T>> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(cursor);

    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        let row = result.map_err(|source| StandardsError::CsvRead {
            file: file.to_string(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn insert_unique<T>(map: &mut BTreeMap<Id, T>, id: Id, value: T, file: &str) -> Result<()> {
    if id.is_empty() || map.contains_key(&id) {
        return Err(StandardsError::DuplicateEntry {
            id: id.to_string(),
            file: file.to_string(),
        });
    }
    map.insert(id, value);
    Ok(())
}

fn parse_num<T: std::str::FromStr>(value: &str, field: &'static str, file: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| invalid(field, value, file))
}

fn invalid(field: &'static str, value: &str, file: &str) -> StandardsError {
    StandardsError::InvalidValue {
        field,
        value: value.to_string(),
        file: file.to_string(),
    }
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_yes(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "yes" | "y" | "true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_species_row() {
        let csv = "Num,Name,Base Species,Gen,Types,Tier,Tags,Nonstandard\n\
                   487,Giratina-Origin,Giratina,4,Ghost/Dragon,Uber,Restricted Legendary,\n";
        let species = load_species(csv, "species.csv").unwrap();
        let origin = species.get("giratinaorigin").unwrap();
        assert_eq!(origin.num, 487);
        assert_eq!(origin.types, vec!["Ghost", "Dragon"]);
        assert_eq!(origin.base_species_id(), Id::new("Giratina"));
        assert!(!origin.is_base_forme());
        assert_eq!(origin.nonstandard, None);
    }

    #[test]
    fn blank_base_species_defaults_to_name() {
        let csv = "Num,Name,Base Species,Gen,Types,Tier,Tags,Nonstandard\n\
                   25,Pikachu,,1,Electric,NU,,\n";
        let species = load_species(csv, "species.csv").unwrap();
        assert!(species.get("pikachu").unwrap().is_base_forme());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let csv = "Name,Gen,Nonstandard\nLevitate,3,\nlevitate,3,\n";
        let err = load_abilities(csv, "abilities.csv").unwrap_err();
        assert!(matches!(err, StandardsError::DuplicateEntry { .. }));
    }

    #[test]
    fn rejects_unknown_category() {
        let csv = "Name,Gen,Type,Category,Base Power,OHKO,Nonstandard\n\
                   Tackle,1,Normal,Melee,40,,\n";
        let err = load_moves(csv, "moves.csv").unwrap_err();
        assert!(matches!(err, StandardsError::InvalidValue { field: "Category", .. }));
    }

    #[test]
    fn item_forme_columns_come_in_pairs() {
        let csv = "Name,Gen,Forme Of,Forme,Nonstandard\nGriseous Orb,4,487,,\n";
        assert!(load_items(csv, "items.csv").is_err());
    }
}
