//! Ruleset resolution.
//!
//! A depth-first walk over a format's references, in listed order. Every
//! referenced format is resolved once per walk; revisiting an id that is
//! still on the walk's stack is a cycle and fails immediately.
//!
//! Within one format, references and bans apply in listed order, then
//! unbans, then removals. Children are resolved in full before their parent
//! applies its own unbans, so a parent can always override a child.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use ladder_model::Id;
use tracing::debug;

use crate::error::RulesetError;
use crate::registry::{BanKey, ComplexBan, Format, FormatRegistry, RuleRef};
use crate::rules::{Capabilities, Rule};

/// Ban-set key prefix marking an active rule.
pub const RULE_KEY_PREFIX: &str = "rule:";

/// Ban-set key present when legality enforcement is active.
pub const LEGALITY_ENFORCEMENT_KEY: &str = "rule:legalityenforcement";

/// Ban-set key for a rule id.
pub fn rule_key(id: &Id) -> String {
    format!("{RULE_KEY_PREFIX}{id}")
}

/// One entry of an effective ruleset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleEntry {
    /// A library rule with hooks.
    Clause(Arc<Rule>),
    /// A referenced format, ruleset, or banlist.
    Definition { id: Id, name: String },
}

impl RuleEntry {
    pub fn id(&self) -> Id {
        match self {
            RuleEntry::Clause(rule) => rule.id(),
            RuleEntry::Definition { id, .. } => id.clone(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RuleEntry::Clause(rule) => rule.name(),
            RuleEntry::Definition { name, .. } => name,
        }
    }
}

/// The fully expanded policy of one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRuleset {
    pub format_id: Id,
    /// Deduplicated rules in first-seen order.
    pub ordered_rules: Vec<RuleEntry>,
    /// Normalized entity ids, category tags, and `rule:` keys.
    pub ban_set: BTreeSet<String>,
    pub complex_bans: BTreeSet<ComplexBan>,
    /// Entities explicitly unbanned; an allowed species ignores tag bans.
    pub allowed: BTreeSet<Id>,
}

impl EffectiveRuleset {
    fn empty(format_id: Id) -> Self {
        Self {
            format_id,
            ordered_rules: Vec::new(),
            ban_set: BTreeSet::new(),
            complex_bans: BTreeSet::new(),
            allowed: BTreeSet::new(),
        }
    }

    pub fn is_banned(&self, id: &Id) -> bool {
        self.ban_set.contains(id.as_str())
    }

    pub fn is_allowed(&self, id: &Id) -> bool {
        self.allowed.contains(id)
    }

    pub fn has_rule(&self, id: &Id) -> bool {
        self.ban_set.contains(&rule_key(id))
    }

    pub fn enforces_legality(&self) -> bool {
        self.ban_set.contains(LEGALITY_ENFORCEMENT_KEY)
    }

    /// Library rules exposing `capability`, in order.
    pub fn rules_with(&self, capability: Capabilities) -> impl Iterator<Item = &Arc<Rule>> {
        self.ordered_rules.iter().filter_map(move |entry| match entry {
            RuleEntry::Clause(rule) if rule.has(capability) => Some(rule),
            _ => None,
        })
    }

    fn push_rule(&mut self, entry: RuleEntry) {
        let id = entry.id();
        self.ban_set.insert(rule_key(&id));
        if !self.ordered_rules.iter().any(|e| e.id() == id) {
            self.ordered_rules.push(entry);
        }
    }

    fn splice(&mut self, child: &EffectiveRuleset) {
        for entry in &child.ordered_rules {
            self.push_rule(entry.clone());
        }
        self.ban_set.extend(child.ban_set.iter().cloned());
        self.complex_bans.extend(child.complex_bans.iter().cloned());
        self.allowed.extend(child.allowed.iter().cloned());
    }

    fn ban(&mut self, key: &BanKey) {
        match key {
            BanKey::Entity(id) => {
                self.ban_set.insert(id.to_string());
                self.allowed.remove(id);
            }
            BanKey::Complex(pair) => {
                self.complex_bans.insert(pair.clone());
            }
        }
    }

    fn unban(&mut self, key: &BanKey) {
        match key {
            BanKey::Entity(id) => {
                self.ban_set.remove(id.as_str());
                self.allowed.insert(id.clone());
            }
            BanKey::Complex(pair) => {
                self.complex_bans.remove(pair);
            }
        }
    }

    fn remove_rule(&mut self, id: &Id) {
        self.ordered_rules.retain(|entry| entry.id() != *id);
        self.ban_set.remove(&rule_key(id));
    }
}

/// Resolve `format_id` against `registry`.
///
/// # Errors
///
/// Returns the format's own classification defect, the defect of any format
/// it references, or a [`RulesetError::Cycle`].
pub fn resolve(registry: &FormatRegistry, format_id: &str) -> Result<EffectiveRuleset, RulesetError> {
    let format = registry
        .get(format_id)
        .ok_or_else(|| RulesetError::UnknownFormat {
            id: Id::new(format_id).to_string(),
        })?;
    let mut resolver = Resolver::new(registry);
    let ruleset = resolver.resolve_format(format)?;
    Ok(Arc::unwrap_or_clone(ruleset))
}

struct Resolver<'a> {
    registry: &'a FormatRegistry,
    stack: Vec<Id>,
    done: HashMap<Id, Arc<EffectiveRuleset>>,
}

impl<'a> Resolver<'a> {
    fn new(registry: &'a FormatRegistry) -> Self {
        Self {
            registry,
            stack: Vec::new(),
            done: HashMap::new(),
        }
    }

    fn resolve_format(&mut self, format: &Format) -> Result<Arc<EffectiveRuleset>, RulesetError> {
        if let Some(done) = self.done.get(&format.id) {
            return Ok(Arc::clone(done));
        }
        if let Some(start) = self.stack.iter().position(|id| *id == format.id) {
            let mut path: Vec<String> = self.stack[start..].iter().map(Id::to_string).collect();
            path.push(format.id.to_string());
            return Err(RulesetError::Cycle { path });
        }
        if let Some(defect) = &format.defect {
            return Err(defect.clone());
        }

        self.stack.push(format.id.clone());
        let expanded = self.expand(format);
        self.stack.pop();

        let ruleset = Arc::new(expanded?);
        self.done.insert(format.id.clone(), Arc::clone(&ruleset));
        Ok(ruleset)
    }

    fn expand(&mut self, format: &Format) -> Result<EffectiveRuleset, RulesetError> {
        let mut out = EffectiveRuleset::empty(format.id.clone());
        let mut unbans = Vec::new();
        let mut removals = Vec::new();

        for entry in format.entries() {
            match entry {
                RuleRef::Reference(id) => self.reference(&mut out, format, id)?,
                RuleRef::Ban(key) => out.ban(key),
                RuleRef::Unban(key) => unbans.push(key),
                RuleRef::Remove(id) => removals.push(id),
            }
        }
        for key in unbans {
            out.unban(key);
        }
        for id in removals {
            out.remove_rule(id);
        }

        debug!(
            format = %format.id,
            rules = out.ordered_rules.len(),
            bans = out.ban_set.len(),
            "Resolved ruleset"
        );
        Ok(out)
    }

    fn reference(
        &mut self,
        out: &mut EffectiveRuleset,
        parent: &Format,
        id: &Id,
    ) -> Result<(), RulesetError> {
        if let Some(rule) = self.registry.library().get(id) {
            out.push_rule(RuleEntry::Clause(Arc::clone(rule)));
            return Ok(());
        }
        let Some(child) = self.registry.get(id.as_str()) else {
            return Err(RulesetError::UnknownReference {
                format: parent.name.clone(),
                entry: id.to_string(),
            });
        };
        let child = Arc::clone(child);
        let resolved = self.resolve_format(&child)?;
        out.push_rule(RuleEntry::Definition {
            id: child.id.clone(),
            name: child.name.clone(),
        });
        out.splice(&resolved);
        Ok(())
    }
}
