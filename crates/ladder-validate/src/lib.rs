//! Format resolution and team legality validation.
//!
//! This crate provides:
//!
//! - **Format registry**: named formats, rulesets, and banlists whose entries
//!   are classified once at registration
//! - **Ruleset resolver**: expands a format into a deduplicated, cycle-checked
//!   [`EffectiveRuleset`]
//! - **Rule library**: enum-keyed clauses with explicit capability flags
//! - **Validator**: generic checks, rule dispatch, and banlist checks
//! - **Catalog**: cached resolution with atomic hot reload
//!
//! # Module Organization
//!
//! - [`registry`]: [`Format`], [`RuleRef`], and [`FormatRegistry`]
//! - [`resolver`]: Depth-first ruleset expansion
//! - [`rules`]: Rule library, clauses, and the point system
//! - [`validator`]: Per-set and per-team validation phases
//! - [`enforcement`]: Legality-enforcement normalization
//! - [`hooks`]: Match lifecycle hooks and the message sink
//! - [`catalog`]: Snapshots, ruleset cache, and reload
//! - [`problem`]: Legality problems
//! - [`error`]: Configuration errors
//!
//! # Example
//!
//! ```rust,ignore
//! use ladder_model::{PokemonSet, Team};
//! use ladder_validate::FormatCatalog;
//!
//! let catalog = FormatCatalog::load(&Default::default())?;
//! let mut team = Team::new(vec![PokemonSet::new("Garchomp").with_moves(["Earthquake"])]);
//! let problems = catalog.validate_team(&mut team, "[Gen 9] OU")?;
//! assert!(problems.is_empty());
//! ```

pub mod catalog;
pub mod context;
pub mod enforcement;
pub mod error;
pub mod hooks;
pub mod problem;
pub mod registry;
pub mod resolver;
pub mod rules;
pub mod validator;

pub use catalog::{FormatCatalog, Snapshot};
pub use context::ValidationContext;
pub use error::{RegistryError, Result, RulesetError};
pub use hooks::{
    MatchContext, MatchState, MessageKind, MessageSink, Status, StatusDecision, StatusEvent,
    TracingSink,
};
pub use problem::Problem;
pub use registry::{BanKey, ComplexBan, Format, FormatRegistry, RuleRef};
pub use resolver::{EffectiveRuleset, LEGALITY_ENFORCEMENT_KEY, RuleEntry, resolve};
pub use rules::{Capabilities, Rule, RuleKind, RuleLibrary};
pub use validator::Validator;
