//! Team parsers.
//!
//! Two input shapes are accepted:
//!
//! - JSON: an array of set objects (`species`, `item`, `ability`, `moves`, `level`)
//! - Export text: blocks separated by blank lines, e.g.
//!
//! ```text
//! Sparky (Pikachu) (M) @ Light Ball
//! Ability: Static
//! Level: 50
//! - Thunderbolt
//! - Quick Attack
//! ```
//!
//! Lines the validator has no use for (EVs, IVs, natures, Tera types) are
//! accepted and ignored.

use crate::error::{ImportError, Result};
use crate::set::{PokemonSet, Team};

/// Parse a team, picking the format from the first non-blank character.
pub fn parse_team(input: &str) -> Result<Team> {
    match input.trim_start().chars().next() {
        Some('[') => parse_json(input),
        _ => parse_export(input),
    }
}

/// Parse a JSON array of sets.
pub fn parse_json(input: &str) -> Result<Team> {
    serde_json::from_str(input).map_err(|source| ImportError::Json { source })
}

/// Parse export text.
pub fn parse_export(input: &str) -> Result<Team> {
    let mut sets = Vec::new();
    let mut current: Option<PokemonSet> = None;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            if let Some(set) = current.take() {
                sets.push(set);
            }
            continue;
        }

        if current.is_none() {
            current = Some(parse_header(line, line_no)?);
            continue;
        }
        let Some(set) = current.as_mut() else {
            continue;
        };

        if let Some(name) = line.strip_prefix('-').or_else(|| line.strip_prefix('~')) {
            let name = name.trim();
            if !name.is_empty() {
                set.moves.push(name.to_string());
            }
        } else if let Some(value) = line.strip_prefix("Ability:") {
            set.ability = non_empty(value);
        } else if let Some(value) = line.strip_prefix("Level:") {
            let value = value.trim();
            let level = value.parse::<u32>().map_err(|_| ImportError::Export {
                line: line_no,
                message: format!("Invalid level '{value}'"),
            })?;
            set.level = Some(level);
        }
    }

    if let Some(set) = current {
        sets.push(set);
    }
    Ok(Team::new(sets))
}

/// Parse `Nickname (Species) (G) @ Item`.
fn parse_header(line: &str, line_no: usize) -> Result<PokemonSet> {
    let (left, item) = match line.rsplit_once(" @ ") {
        Some((left, item)) => (left.trim(), non_empty(item)),
        None => (line, None),
    };

    let left = left
        .strip_suffix("(M)")
        .or_else(|| left.strip_suffix("(F)"))
        .unwrap_or(left)
        .trim();

    let (name, species) = match (left.rfind(" ("), left.ends_with(')')) {
        (Some(open), true) => {
            let nickname = left[..open].trim();
            let species = left[open + 2..left.len() - 1].trim();
            (non_empty(nickname), species)
        }
        _ => (None, left),
    };

    if species.is_empty() {
        return Err(ImportError::Export {
            line: line_no,
            message: "Missing species".to_string(),
        });
    }

    Ok(PokemonSet {
        name,
        species: species.to_string(),
        item,
        ..PokemonSet::default()
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
