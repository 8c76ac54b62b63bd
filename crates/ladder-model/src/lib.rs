//! Shared value types for format resolution and team validation.
//!
//! This crate provides the transient data that flows through a validation
//! request:
//!
//! - **Identifiers**: [`Id`], the normalized (lowercase, alphanumeric) key used
//!   for every lookup, ban, and rule reference
//! - **Rosters**: [`PokemonSet`] entries collected into a [`Team`]
//! - **Import**: parsing teams from JSON or the common export text format
//!
//! # Module Organization
//!
//! - [`id`]: Identifier normalization
//! - [`set`]: Set and team types
//! - [`import`]: Team parsers
//! - [`error`]: Import errors
//!
//! # Example
//!
//! ```
//! use ladder_model::{Id, PokemonSet};
//!
//! let set = PokemonSet::new("Pikachu").with_moves(["Thunderbolt", "Quick Attack"]);
//! assert_eq!(set.species_id(), Id::new("pikachu"));
//! assert_eq!(set.moves.len(), 2);
//! ```

pub mod error;
pub mod id;
pub mod import;
pub mod set;

pub use error::{ImportError, Result};
pub use id::{Id, to_id};
pub use import::{parse_export, parse_json, parse_team};
pub use set::{MAX_MOVES, PokemonSet, Team};
