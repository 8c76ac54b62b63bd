//! Embedded data files.
//!
//! The default dex and format table are embedded at compile time using
//! `include_str!()`, so a validator can start without touching the disk.
//! A data directory (see [`crate::paths`]) replaces them wholesale.

/// species.csv
pub const SPECIES: &str = include_str!("../data/species.csv");

/// moves.csv
pub const MOVES: &str = include_str!("../data/moves.csv");

/// items.csv
pub const ITEMS: &str = include_str!("../data/items.csv");

/// abilities.csv
pub const ABILITIES: &str = include_str!("../data/abilities.csv");

/// formats.toml
pub const FORMATS: &str = include_str!("../data/formats.toml");

/// File names expected inside a data directory.
pub const FILE_NAMES: [&str; 5] = [
    "species.csv",
    "moves.csv",
    "items.csv",
    "abilities.csv",
    "formats.toml",
];

/// File names paired with their embedded fallback.
pub const FILES: &[(&str, &str)] = &[
    ("species.csv", SPECIES),
    ("moves.csv", MOVES),
    ("items.csv", ITEMS),
    ("abilities.csv", ABILITIES),
    ("formats.toml", FORMATS),
];
