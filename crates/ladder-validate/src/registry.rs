//! Format registry.
//!
//! Every ruleset and banlist string is classified exactly once, when the
//! registry is built, into a [`RuleRef`]. Formats are immutable afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use ladder_model::Id;
use ladder_standards::{EntityLookup, FormatDefinition, FormatKind, FormatTable};
use serde::Serialize;
use tracing::debug;

use crate::error::{RegistryError, Result, RulesetError};
use crate::rules::RuleLibrary;

// =============================================================================
// Entry grammar
// =============================================================================

/// Separator of the two halves of a compound ban. An entry holding `++` in
/// any other spacing is malformed.
pub const COMPLEX_SEPARATOR: &str = " ++ ";

const COMPLEX_MARK: &str = "++";

/// An unordered pair of ids that may not appear together on one set.
///
/// Halves are stored sorted so `A ++ B` and `B ++ A` are the same ban.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ComplexBan {
    first: Id,
    second: Id,
}

impl ComplexBan {
    pub fn new(a: Id, b: Id) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &Id {
        &self.first
    }

    pub fn second(&self) -> &Id {
        &self.second
    }
}

impl fmt::Display for ComplexBan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ++ {}", self.first, self.second)
    }
}

/// What a ban or unban targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BanKey {
    /// A species, move, item, ability, or category tag.
    Entity(Id),
    Complex(ComplexBan),
}

/// One classified ruleset or banlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleRef {
    /// A registered format, ruleset, banlist, or library rule.
    Reference(Id),
    /// `Name`, `-Name`, or `A ++ B`.
    Ban(BanKey),
    /// `+Name` or `+A ++ B`.
    Unban(BanKey),
    /// `!Name`: drop a rule spliced in by a reference.
    Remove(Id),
}

// =============================================================================
// Format
// =============================================================================

/// A registered format, ruleset, or banlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub id: Id,
    pub name: String,
    pub kind: FormatKind,
    pub description: Option<String>,
    /// Active generation.
    pub generation: u8,
    pub team_size: usize,
    pub max_level: u32,
    pub forced_level: Option<u32>,
    /// Classified `ruleset` entries, in listed order.
    pub ruleset: Vec<RuleRef>,
    /// Classified `banlist` entries, in listed order.
    pub banlist: Vec<RuleRef>,
    /// First classification failure; rejects the format on resolution.
    pub defect: Option<RulesetError>,
}

impl Format {
    /// All entries, ruleset first.
    pub fn entries(&self) -> impl Iterator<Item = &RuleRef> {
        self.ruleset.iter().chain(self.banlist.iter())
    }

    pub fn is_selectable(&self) -> bool {
        self.kind.is_selectable()
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Immutable set of registered formats.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: BTreeMap<Id, Arc<Format>>,
    /// Ids in definition order.
    order: Vec<Id>,
    library: Arc<RuleLibrary>,
    fingerprint: String,
}

impl FormatRegistry {
    /// Register every definition in `table`.
    ///
    /// # Errors
    ///
    /// Fails on duplicate ids, empty names, or names that shadow a library
    /// rule. Defective entries do not fail the build; they are recorded on
    /// the affected [`Format`].
    pub fn build(
        table: &FormatTable,
        library: Arc<RuleLibrary>,
        dex: &dyn EntityLookup,
    ) -> Result<Self> {
        let mut names: BTreeMap<Id, &str> = BTreeMap::new();
        let mut order = Vec::with_capacity(table.len());
        for definition in &table.definitions {
            let id = Id::new(&definition.name);
            if id.is_empty() {
                return Err(RegistryError::EmptyName {
                    name: definition.name.clone(),
                });
            }
            if library.contains(&id) {
                return Err(RegistryError::RuleCollision {
                    name: definition.name.clone(),
                });
            }
            if let Some(first) = names.insert(id.clone(), &definition.name) {
                return Err(RegistryError::DuplicateId {
                    id: id.to_string(),
                    first: first.to_string(),
                    second: definition.name.clone(),
                });
            }
            order.push(id);
        }

        let classifier = Classifier {
            registered: &names,
            library: &library,
            dex,
        };
        let formats = table
            .definitions
            .iter()
            .zip(&order)
            .map(|(definition, id)| {
                let format = classifier.format(id.clone(), definition);
                (id.clone(), Arc::new(format))
            })
            .collect();

        Ok(Self {
            formats,
            order,
            library,
            fingerprint: table.fingerprint.clone(),
        })
    }

    /// Look up a format by name or id.
    pub fn get(&self, name: &str) -> Option<&Arc<Format>> {
        self.formats.get(Id::new(name).as_str())
    }

    /// Formats in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Format>> {
        self.order.iter().filter_map(|id| self.formats.get(id))
    }

    pub fn library(&self) -> &Arc<RuleLibrary> {
        &self.library
    }

    /// Version fingerprint of the source table.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

// =============================================================================
// Classification
// =============================================================================

#[derive(Clone, Copy)]
enum Marker {
    Bare,
    Ban,
    Unban,
    Remove,
}

struct Classifier<'a> {
    registered: &'a BTreeMap<Id, &'a str>,
    library: &'a RuleLibrary,
    dex: &'a dyn EntityLookup,
}

impl Classifier<'_> {
    fn format(&self, id: Id, definition: &FormatDefinition) -> Format {
        let mut defect = None;
        let mut classify_all = |entries: &[String]| -> Vec<RuleRef> {
            entries
                .iter()
                .filter_map(|entry| match self.classify(&definition.name, entry) {
                    Ok(rule_ref) => Some(rule_ref),
                    Err(err) => {
                        debug!(format = %definition.name, entry, error = %err, "Rejected entry");
                        defect.get_or_insert(err);
                        None
                    }
                })
                .collect()
        };
        let ruleset = classify_all(&definition.ruleset);
        let banlist = classify_all(&definition.banlist);

        Format {
            id,
            name: definition.name.clone(),
            kind: definition.kind,
            description: definition.description.clone(),
            generation: definition.generation,
            team_size: definition.team_size,
            max_level: definition.max_level,
            forced_level: definition.forced_level,
            ruleset,
            banlist,
            defect,
        }
    }

    fn classify(&self, format: &str, entry: &str) -> std::result::Result<RuleRef, RulesetError> {
        let unknown = |entry: &str| RulesetError::UnknownReference {
            format: format.to_string(),
            entry: entry.to_string(),
        };

        let trimmed = entry.trim();
        let (marker, body) = match trimmed.chars().next() {
            Some('-') => (Marker::Ban, &trimmed[1..]),
            Some('+') => (Marker::Unban, &trimmed[1..]),
            Some('!') => (Marker::Remove, &trimmed[1..]),
            _ => (Marker::Bare, trimmed),
        };
        let body = body.trim();

        if body.contains(COMPLEX_MARK) {
            let malformed = || RulesetError::MalformedComplexBan {
                format: format.to_string(),
                entry: entry.to_string(),
            };
            let halves: Vec<&str> = body.split(COMPLEX_SEPARATOR).map(str::trim).collect();
            let [a, b] = halves.as_slice() else {
                return Err(malformed());
            };
            if a.is_empty() || b.is_empty() || a.contains(COMPLEX_MARK) || b.contains(COMPLEX_MARK) {
                return Err(malformed());
            }
            for half in [a, b] {
                if !self.dex.is_known(half) {
                    return Err(unknown(half));
                }
            }
            let key = BanKey::Complex(ComplexBan::new(Id::new(a), Id::new(b)));
            return match marker {
                Marker::Bare | Marker::Ban => Ok(RuleRef::Ban(key)),
                Marker::Unban => Ok(RuleRef::Unban(key)),
                Marker::Remove => Err(malformed()),
            };
        }

        let id = Id::new(body);
        if id.is_empty() {
            return Err(unknown(entry));
        }
        let is_rule = self.registered.contains_key(&id) || self.library.contains(&id);
        match marker {
            Marker::Bare if is_rule => Ok(RuleRef::Reference(id)),
            Marker::Remove if is_rule => Ok(RuleRef::Remove(id)),
            Marker::Bare | Marker::Ban if self.dex.is_known(body) => {
                Ok(RuleRef::Ban(BanKey::Entity(id)))
            }
            Marker::Unban if self.dex.is_known(body) => Ok(RuleRef::Unban(BanKey::Entity(id))),
            _ => Err(unknown(entry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_standards::Dex;

    fn registry(definitions: Vec<FormatDefinition>) -> Result<FormatRegistry> {
        let dex = Dex::embedded().unwrap();
        FormatRegistry::build(
            &FormatTable::from_definitions(definitions),
            RuleLibrary::shared(),
            &dex,
        )
    }

    #[test]
    fn classifies_entry_grammar() {
        let registry = registry(vec![
            FormatDefinition::new("Evasion").with_kind(FormatKind::Banlist),
            FormatDefinition::new("Test")
                .with_ruleset(["Evasion", "Species Clause", "!OHKO Clause"])
                .with_banlist(["Uber", "-Moody", "+Shadow Tag", "Drizzle ++ Swift Swim"]),
        ])
        .unwrap();

        let format = registry.get("test").unwrap();
        assert_eq!(format.defect, None);
        assert_eq!(
            format.ruleset,
            vec![
                RuleRef::Reference(Id::new("Evasion")),
                RuleRef::Reference(Id::new("Species Clause")),
                RuleRef::Remove(Id::new("OHKO Clause")),
            ]
        );
        assert_eq!(
            format.banlist,
            vec![
                RuleRef::Ban(BanKey::Entity(Id::new("uber"))),
                RuleRef::Ban(BanKey::Entity(Id::new("moody"))),
                RuleRef::Unban(BanKey::Entity(Id::new("shadowtag"))),
                RuleRef::Ban(BanKey::Complex(ComplexBan::new(
                    Id::new("swiftswim"),
                    Id::new("drizzle")
                ))),
            ]
        );
    }

    #[test]
    fn unknown_entry_marks_format_defective() {
        let registry =
            registry(vec![FormatDefinition::new("Test").with_banlist(["Agumon", "Moody"])]).unwrap();
        let format = registry.get("Test").unwrap();
        assert!(matches!(
            format.defect,
            Some(RulesetError::UnknownReference { ref entry, .. }) if entry == "Agumon"
        ));
        assert_eq!(format.banlist.len(), 1);
    }

    #[test]
    fn compound_ban_needs_two_halves() {
        let registry = registry(vec![
            FormatDefinition::new("Test").with_banlist(["Drizzle ++ Swift Swim ++ Moody"]),
        ])
        .unwrap();
        assert!(matches!(
            registry.get("Test").unwrap().defect,
            Some(RulesetError::MalformedComplexBan { .. })
        ));
    }

    #[test]
    fn compound_ban_needs_spaced_separator() {
        for entry in ["Drizzle++Swift Swim", "Drizzle ++Swift Swim", "Drizzle++ Swift Swim"] {
            let registry =
                registry(vec![FormatDefinition::new("Test").with_banlist([entry])]).unwrap();
            assert!(
                matches!(
                    registry.get("Test").unwrap().defect,
                    Some(RulesetError::MalformedComplexBan { .. })
                ),
                "{entry}"
            );
        }

        let registry = registry(vec![
            FormatDefinition::new("Test").with_banlist(["  Drizzle ++ Swift Swim  "]),
        ])
        .unwrap();
        assert!(registry.get("Test").unwrap().defect.is_none());
    }

    #[test]
    fn duplicate_ids_fail_the_build() {
        let err = registry(vec![
            FormatDefinition::new("[Gen 9] OU"),
            FormatDefinition::new("gen9ou"),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { .. }));
    }

    #[test]
    fn library_names_are_reserved() {
        let err = registry(vec![FormatDefinition::new("Species Clause")]).unwrap_err();
        assert!(matches!(err, RegistryError::RuleCollision { .. }));
    }

    #[test]
    fn iterates_in_definition_order() {
        let registry = registry(vec![
            FormatDefinition::new("Zeta"),
            FormatDefinition::new("Alpha"),
        ])
        .unwrap();
        let names: Vec<_> = registry.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
    }
}
