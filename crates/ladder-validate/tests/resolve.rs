//! Ruleset resolution over the embedded registry and generated graphs.

use ladder_model::Id;
use ladder_standards::{Dex, FormatDefinition, FormatTable, Standards};
use ladder_validate::{
    FormatCatalog, FormatRegistry, RegistryError, RuleEntry, RuleLibrary, RulesetError, resolve,
};
use proptest::prelude::*;

fn embedded_registry() -> FormatRegistry {
    let standards = Standards::embedded().unwrap();
    FormatRegistry::build(&standards.formats, RuleLibrary::shared(), &standards.dex).unwrap()
}

fn build(definitions: Vec<FormatDefinition>) -> Result<FormatRegistry, RegistryError> {
    let dex = Dex::embedded().unwrap();
    FormatRegistry::build(
        &FormatTable::from_definitions(definitions),
        RuleLibrary::shared(),
        &dex,
    )
}

fn rule_names(registry: &FormatRegistry, format: &str) -> Vec<String> {
    resolve(registry, format)
        .unwrap()
        .ordered_rules
        .iter()
        .map(|entry| entry.name().to_string())
        .collect()
}

// --- Embedded formats ---

#[test]
fn every_embedded_format_resolves() {
    let catalog = FormatCatalog::from_standards(Standards::embedded().unwrap()).unwrap();
    let snapshot = catalog.snapshot();
    let rejected: Vec<_> = snapshot.rejected().collect();
    assert!(rejected.is_empty(), "{rejected:?}");
    assert_eq!(snapshot.registry().len(), 12);
}

#[test]
fn ou_rules_in_first_seen_order() {
    let registry = embedded_registry();
    assert_eq!(
        rule_names(&registry, "[Gen 9] OU"),
        [
            "Standard",
            "Legality Enforcement",
            "Species Clause",
            "OHKO Clause",
            "Sleep Clause Mod",
            "Evasion Moves",
        ]
    );
}

#[test]
fn uu_inherits_ou_bans() {
    let registry = embedded_registry();
    let ruleset = resolve(&registry, "[Gen 9] UU").unwrap();
    for banned in ["Uber", "OU", "UUBL", "Moody", "Double Team", "Drizzle"] {
        assert!(ruleset.is_banned(&Id::new(banned)), "{banned}");
    }
    assert_eq!(ruleset.complex_bans.len(), 2);
    assert_eq!(ruleset.ordered_rules[0].name(), "[Gen 9] OU");
}

#[test]
fn anything_goes_unbans_and_removes() {
    let registry = embedded_registry();
    let ruleset = resolve(&registry, "[Gen 9] Anything Goes").unwrap();
    assert_eq!(
        rule_names(&registry, "[Gen 9] Anything Goes"),
        [
            "[Gen 9] Ubers",
            "Standard",
            "Legality Enforcement",
            "Evasion Moves",
        ]
    );
    for unbanned in ["Moody", "Shadow Tag", "Baton Pass", "Double Team", "Minimize"] {
        assert!(!ruleset.is_banned(&Id::new(unbanned)), "{unbanned}");
        assert!(ruleset.is_allowed(&Id::new(unbanned)), "{unbanned}");
    }
    assert!(!ruleset.has_rule(&Id::new("Species Clause")));
    assert!(ruleset.enforces_legality());
}

#[test]
fn rule_keys_mark_active_rules() {
    let registry = embedded_registry();
    let ruleset = resolve(&registry, "[Gen 9] Monotype").unwrap();
    assert!(ruleset.has_rule(&Id::new("Strict Same Type Clause")));
    assert!(ruleset.has_rule(&Id::new("Standard")));
    assert!(!ruleset.has_rule(&Id::new("Same Type Clause")));
    assert!(
        ruleset
            .ordered_rules
            .iter()
            .any(|entry| matches!(entry, RuleEntry::Clause(rule) if rule.base().is_some()))
    );
}

#[test]
fn custom_game_is_empty() {
    let registry = embedded_registry();
    let ruleset = resolve(&registry, "[Gen 9] Custom Game").unwrap();
    assert!(ruleset.ordered_rules.is_empty());
    assert!(ruleset.ban_set.is_empty());
    assert!(!ruleset.enforces_legality());
}

#[test]
fn resolution_is_idempotent() {
    let registry = embedded_registry();
    for format in registry.iter() {
        let first = resolve(&registry, format.id.as_str()).unwrap();
        let second = resolve(&registry, &format.name).unwrap();
        assert_eq!(first, second, "{}", format.name);
    }
}

// --- Registration errors ---

#[test]
fn duplicate_ids_fail_the_build() {
    let err = build(vec![
        FormatDefinition::new("[Gen 9] OU"),
        FormatDefinition::new("gen9ou"),
    ])
    .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateId { ref id, .. } if id == "gen9ou"));
}

#[test]
fn empty_and_colliding_names_fail_the_build() {
    assert!(matches!(
        build(vec![FormatDefinition::new("[ ]")]),
        Err(RegistryError::EmptyName { .. })
    ));
    assert!(matches!(
        build(vec![FormatDefinition::new("Species Clause")]),
        Err(RegistryError::RuleCollision { .. })
    ));
}

#[test]
fn defective_entries_reject_only_their_format() {
    let registry = build(vec![
        FormatDefinition::new("Typo").with_banlist(["Garchmop"]),
        FormatDefinition::new("Half").with_banlist(["Drizzle ++ "]),
        FormatDefinition::new("Fine").with_banlist(["Garchomp"]),
    ])
    .unwrap();
    assert_eq!(
        resolve(&registry, "Typo"),
        Err(RulesetError::UnknownReference {
            format: "Typo".into(),
            entry: "Garchmop".into()
        })
    );
    assert!(matches!(
        resolve(&registry, "Half"),
        Err(RulesetError::MalformedComplexBan { .. })
    ));
    assert!(resolve(&registry, "Fine").is_ok());
}

// --- Generated graphs ---

const NODES: usize = 5;

/// Whether a cycle is reachable from `start` in `edges`.
fn reaches_cycle(edges: &[Vec<usize>], start: usize) -> bool {
    fn visit(edges: &[Vec<usize>], node: usize, on_path: &mut [bool], done: &mut [bool]) -> bool {
        if on_path[node] {
            return true;
        }
        if done[node] {
            return false;
        }
        on_path[node] = true;
        let found = edges[node]
            .iter()
            .any(|&next| visit(edges, next, on_path, done));
        on_path[node] = false;
        done[node] = true;
        found
    }
    visit(edges, start, &mut vec![false; edges.len()], &mut vec![false; edges.len()])
}

fn graph_registry(edges: &[Vec<usize>]) -> FormatRegistry {
    let definitions = edges
        .iter()
        .enumerate()
        .map(|(node, targets)| {
            FormatDefinition::new(format!("F{node}"))
                .with_ruleset(targets.iter().map(|t| format!("F{t}")))
                .with_banlist(["Moody"])
        })
        .collect();
    build(definitions).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_graphs_resolve_or_report_cycles(
        edges in prop::collection::vec(prop::collection::vec(0..NODES, 0..3), NODES)
    ) {
        let registry = graph_registry(&edges);
        for node in 0..NODES {
            let name = format!("F{node}");
            let first = resolve(&registry, &name);
            let second = resolve(&registry, &name);
            prop_assert_eq!(&first, &second);
            match first {
                Ok(ruleset) => {
                    prop_assert!(!reaches_cycle(&edges, node));
                    prop_assert!(ruleset.is_banned(&Id::new("Moody")));
                }
                Err(RulesetError::Cycle { path }) => {
                    prop_assert!(reaches_cycle(&edges, node));
                    prop_assert_eq!(path.first(), path.last());
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }
}
