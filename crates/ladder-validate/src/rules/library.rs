//! The rule library.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use ladder_model::Id;

use super::{Rule, RuleKind};

static SHARED: OnceLock<Arc<RuleLibrary>> = OnceLock::new();

/// Every rule a format may reference, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLibrary {
    rules: BTreeMap<Id, Arc<Rule>>,
}

impl RuleLibrary {
    /// Build the standard library.
    pub fn standard() -> Self {
        let mut rules = BTreeMap::new();
        let same_type = Arc::new(Rule::new(RuleKind::SameTypeClause));
        for kind in RuleKind::ALL {
            let rule = match kind {
                RuleKind::SameTypeClause => Arc::clone(&same_type),
                RuleKind::StrictSameTypeClause => {
                    Arc::new(Rule::derived(kind, Arc::clone(&same_type)))
                }
                _ => Arc::new(Rule::new(kind)),
            };
            rules.insert(rule.id(), rule);
        }
        Self { rules }
    }

    /// Process-wide standard library.
    pub fn shared() -> Arc<RuleLibrary> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::standard())))
    }

    pub fn get(&self, id: &Id) -> Option<&Arc<Rule>> {
        self.rules.get(id)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.rules.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleLibrary {
    fn default() -> Self {
        Self::standard()
    }
}
