//! Format catalog: registry snapshot, ruleset cache, and hot reload.
//!
//! Callers hold an `Arc<Snapshot>` for the duration of a request, so a
//! reload never changes the registry or cache under an in-flight call.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use ladder_model::{Id, PokemonSet, Team};
use ladder_standards::{EntityLookup, Standards, StandardsConfig, hash};
use parking_lot::RwLock;
use tracing::{debug, error, info};

use crate::error::{Result, RulesetError};
use crate::hooks::{MatchContext, MessageSink};
use crate::problem::Problem;
use crate::registry::{Format, FormatRegistry};
use crate::resolver::{self, EffectiveRuleset};
use crate::rules::RuleLibrary;
use crate::validator::Validator;

/// One consistent view: registry, dex, and the rulesets resolved from them.
pub struct Snapshot {
    registry: FormatRegistry,
    dex: Arc<dyn EntityLookup>,
    cache: DashMap<Id, Arc<EffectiveRuleset>>,
    rejected: BTreeMap<Id, RulesetError>,
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("formats", &self.registry.len())
            .field("cached", &self.cache.len())
            .field("rejected", &self.rejected.len())
            .field("version", &self.registry.fingerprint())
            .finish()
    }
}

impl Snapshot {
    /// Build a snapshot and resolve every format eagerly.
    ///
    /// Defective formats are logged and remembered; they never fail the
    /// snapshot.
    pub fn new(registry: FormatRegistry, dex: Arc<dyn EntityLookup>) -> Self {
        let cache = DashMap::new();
        let mut rejected = BTreeMap::new();
        for format in registry.iter() {
            match resolver::resolve(&registry, format.id.as_str()) {
                Ok(ruleset) => {
                    cache.insert(format.id.clone(), Arc::new(ruleset));
                }
                Err(err) => {
                    error!(format = %format.name, error = %err, "Rejected format");
                    rejected.insert(format.id.clone(), err);
                }
            }
        }
        info!(
            formats = registry.len(),
            rejected = rejected.len(),
            version = %hash::short(registry.fingerprint()),
            "Loaded format registry"
        );
        Self {
            registry,
            dex,
            cache,
            rejected,
        }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn dex(&self) -> &dyn EntityLookup {
        self.dex.as_ref()
    }

    /// Formats that failed resolution, with their errors.
    pub fn rejected(&self) -> impl Iterator<Item = (&Id, &RulesetError)> {
        self.rejected.iter()
    }

    pub fn rejection(&self, format: &str) -> Option<&RulesetError> {
        self.rejected.get(Id::new(format).as_str())
    }

    /// Resolved ruleset for `format`, from cache when present.
    ///
    /// Concurrent first resolutions of the same format may both compute;
    /// the first insert wins and both callers get that value.
    pub fn resolve(&self, format: &str) -> std::result::Result<Arc<EffectiveRuleset>, RulesetError> {
        let id = Id::new(format);
        if let Some(err) = self.rejected.get(&id) {
            return Err(err.clone());
        }
        if let Some(cached) = self.cache.get(&id) {
            return Ok(Arc::clone(cached.value()));
        }
        debug!(format = %id, "Ruleset cache miss");
        let resolved = Arc::new(resolver::resolve(&self.registry, id.as_str())?);
        let entry = self.cache.entry(id).or_insert(resolved);
        Ok(Arc::clone(entry.value()))
    }

    fn format(&self, format: &str) -> std::result::Result<&Arc<Format>, RulesetError> {
        self.registry
            .get(format)
            .ok_or_else(|| RulesetError::UnknownFormat {
                id: Id::new(format).to_string(),
            })
    }

    pub fn validate_team(
        &self,
        team: &mut Team,
        format: &str,
    ) -> std::result::Result<Vec<Problem>, RulesetError> {
        let definition = self.format(format)?;
        let ruleset = self.resolve(format)?;
        Ok(Validator::new(definition, &ruleset, self.dex()).validate_team(team))
    }

    pub fn validate_set(
        &self,
        set: &mut PokemonSet,
        format: &str,
    ) -> std::result::Result<Vec<Problem>, RulesetError> {
        let definition = self.format(format)?;
        let ruleset = self.resolve(format)?;
        Ok(Validator::new(definition, &ruleset, self.dex()).validate_set(set))
    }

    /// Selectable formats that resolved, in definition order.
    pub fn selectable_formats(&self) -> Vec<Arc<Format>> {
        self.registry
            .iter()
            .filter(|format| format.is_selectable() && !self.rejected.contains_key(&format.id))
            .cloned()
            .collect()
    }

    pub fn start_match(
        &self,
        format: &str,
        sink: &mut dyn MessageSink,
    ) -> std::result::Result<MatchContext, RulesetError> {
        let definition = self.format(format)?;
        let ruleset = self.resolve(format)?;
        Ok(MatchContext::start(&definition.name, ruleset, sink))
    }
}

/// Thread-safe entry point holding the current snapshot.
#[derive(Debug)]
pub struct FormatCatalog {
    current: RwLock<Arc<Snapshot>>,
}

impl FormatCatalog {
    pub fn new(registry: FormatRegistry, dex: Arc<dyn EntityLookup>) -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::new(registry, dex))),
        }
    }

    /// Build a catalog from loaded data with the standard rule library.
    pub fn from_standards(standards: Standards) -> Result<Self> {
        let (registry, dex) = build(standards)?;
        Ok(Self::new(registry, dex))
    }

    /// Load data per `config` and build a catalog.
    pub fn load(config: &StandardsConfig) -> Result<Self> {
        Self::from_standards(Standards::load(config)?)
    }

    /// The current snapshot. Hold it for the whole of one request.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Swap in a new registry and dex with an empty cache.
    pub fn reload(&self, registry: FormatRegistry, dex: Arc<dyn EntityLookup>) {
        let next = Arc::new(Snapshot::new(registry, dex));
        *self.current.write() = next;
        info!("Reloaded format catalog");
    }

    /// Reload from data per `config`. On error the current snapshot stays.
    pub fn reload_from(&self, config: &StandardsConfig) -> Result<()> {
        let (registry, dex) = build(Standards::load(config)?)?;
        self.reload(registry, dex);
        Ok(())
    }

    pub fn version(&self) -> String {
        self.snapshot().registry().fingerprint().to_string()
    }

    pub fn resolve(&self, format: &str) -> std::result::Result<Arc<EffectiveRuleset>, RulesetError> {
        self.snapshot().resolve(format)
    }

    pub fn validate_team(
        &self,
        team: &mut Team,
        format: &str,
    ) -> std::result::Result<Vec<Problem>, RulesetError> {
        self.snapshot().validate_team(team, format)
    }

    pub fn validate_set(
        &self,
        set: &mut PokemonSet,
        format: &str,
    ) -> std::result::Result<Vec<Problem>, RulesetError> {
        self.snapshot().validate_set(set, format)
    }

    pub fn selectable_formats(&self) -> Vec<Arc<Format>> {
        self.snapshot().selectable_formats()
    }

    pub fn start_match(
        &self,
        format: &str,
        sink: &mut dyn MessageSink,
    ) -> std::result::Result<MatchContext, RulesetError> {
        self.snapshot().start_match(format, sink)
    }
}

fn build(standards: Standards) -> Result<(FormatRegistry, Arc<dyn EntityLookup>)> {
    let dex: Arc<dyn EntityLookup> = Arc::new(standards.dex);
    let registry = FormatRegistry::build(&standards.formats, RuleLibrary::shared(), dex.as_ref())?;
    Ok((registry, dex))
}
