//! Entity metadata and format definitions.
//!
//! This crate provides:
//!
//! - **Dex data** for species, moves, items, and abilities, loaded from CSV
//! - **The [`EntityLookup`] trait** the validator resolves names through
//! - **Format definitions** loaded from a TOML table, with a version fingerprint
//!
//! # Module Organization
//!
//! - [`traits`]: Lookup trait and the kind-generic entity view
//! - [`dex`]: Dex record types and CSV loaders
//! - [`formats`]: Raw format definitions and their TOML loader
//! - [`registry`]: Bundled loading with [`StandardsConfig`]
//! - [`embedded`]: Compiled-in data files
//! - [`paths`]: Data directory resolution
//!
//! # Data Directory Structure
//!
//! ```text
//! data/
//! ├── species.csv
//! ├── moves.csv
//! ├── items.csv
//! ├── abilities.csv
//! └── formats.toml
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ladder_standards::{EntityLookup, Standards, StandardsConfig};
//!
//! let standards = Standards::load(&StandardsConfig::default())?;
//! let chomp = standards.dex.species("Garchomp").unwrap();
//! assert_eq!(chomp.tier, "OU");
//! ```

pub mod dex;
pub mod embedded;
pub mod error;
pub mod formats;
pub mod hash;
pub mod paths;
pub mod registry;
pub mod traits;

pub use error::{Result, StandardsError};

pub use paths::{DATA_ENV_VAR, data_dir};

pub use registry::{Standards, StandardsConfig};

pub use dex::{Ability, Dex, Item, Move, MoveCategory, Species, TIERS, TYPES};

pub use formats::{FormatDefinition, FormatKind, FormatTable};

pub use traits::{EntityKind, EntityLookup, EntityRef};
