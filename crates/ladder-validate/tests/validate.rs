//! Team validation against the embedded formats.

use ladder_model::{PokemonSet, Team};
use ladder_standards::{Dex, EntityKind, FormatDefinition, FormatTable, Standards};
use ladder_validate::{FormatCatalog, FormatRegistry, Problem, RuleLibrary};
use proptest::prelude::*;

fn catalog() -> FormatCatalog {
    FormatCatalog::from_standards(Standards::embedded().unwrap()).unwrap()
}

fn validate(catalog: &FormatCatalog, format: &str, sets: Vec<PokemonSet>) -> Vec<Problem> {
    let mut team = Team::new(sets);
    catalog.validate_team(&mut team, format).unwrap()
}

fn messages(problems: &[Problem]) -> Vec<String> {
    problems.iter().map(ToString::to_string).collect()
}

fn custom_catalog(definitions: Vec<FormatDefinition>) -> FormatCatalog {
    let dex = Dex::embedded().unwrap();
    let registry = FormatRegistry::build(
        &FormatTable::from_definitions(definitions),
        RuleLibrary::shared(),
        &dex,
    )
    .unwrap();
    FormatCatalog::new(registry, std::sync::Arc::new(dex))
}

// --- Compound bans ---

#[test]
fn compound_ban_needs_both_halves_on_one_set() {
    let catalog = catalog();
    let ninjask = PokemonSet::new("Ninjask")
        .with_ability("Speed Boost")
        .with_moves(["Tackle"]);
    assert!(validate(&catalog, "[Gen 9] OU", vec![ninjask.clone()]).is_empty());

    let passer = ninjask.with_moves(["Tackle", "Baton Pass"]);
    let problems = validate(&catalog, "[Gen 9] OU", vec![passer]);
    assert_eq!(
        problems,
        vec![Problem::ComplexBanned {
            set: "Ninjask".into(),
            first: "Baton Pass".into(),
            second: "Speed Boost".into(),
        }]
    );
    assert_eq!(
        problems[0].to_string(),
        "Ninjask has the combination of Baton Pass + Speed Boost, which is banned."
    );
}

#[test]
fn compound_ban_halves_on_different_sets_do_not_fire() {
    let catalog = catalog();
    let problems = validate(
        &catalog,
        "[Gen 9] OU",
        vec![
            PokemonSet::new("Ninjask").with_ability("Speed Boost"),
            PokemonSet::new("Gengar").with_moves(["Baton Pass"]),
        ],
    );
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn drizzle_alone_is_not_a_compound_ban() {
    let catalog = catalog();
    let pelipper = PokemonSet::new("Pelipper")
        .with_ability("Drizzle")
        .with_moves(["Surf", "Roost"]);
    assert!(validate(&catalog, "[Gen 9] OU", vec![pelipper]).is_empty());
}

#[test]
fn drizzle_swift_swim_fires_once_when_both_are_on_one_set() {
    let catalog = catalog();
    let pelipper = PokemonSet::new("Pelipper")
        .with_ability("Drizzle")
        .with_moves(["Surf", "Swift Swim"]);
    let problems = validate(&catalog, "[Gen 9] OU", vec![pelipper]);
    let combos: Vec<_> = problems
        .iter()
        .filter(|p| matches!(p, Problem::ComplexBanned { .. }))
        .collect();
    assert_eq!(
        combos,
        [&Problem::ComplexBanned {
            set: "Pelipper".into(),
            first: "Drizzle".into(),
            second: "Swift Swim".into(),
        }]
    );
}

// --- Species Clause ---

#[test]
fn species_clause_flags_repeated_species() {
    let catalog = catalog();
    let names = ["Pikachu", "Pikachu", "Garchomp", "Tyranitar", "Gengar", "Starmie"];
    let problems = validate(
        &catalog,
        "[Gen 9] OU",
        names.into_iter().map(PokemonSet::new).collect(),
    );
    assert_eq!(
        problems,
        vec![Problem::SpeciesClause {
            species: "Pikachu".into()
        }]
    );
}

#[test]
fn species_clause_accepts_distinct_team() {
    let catalog = catalog();
    let names = ["Pikachu", "Garchomp", "Tyranitar", "Gengar", "Starmie", "Swampert"];
    let problems = validate(
        &catalog,
        "[Gen 9] OU",
        names.into_iter().map(PokemonSet::new).collect(),
    );
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn species_clause_counts_formes_as_one_species() {
    let catalog = catalog();
    let problems = validate(
        &catalog,
        "[Gen 9] Ubers",
        vec![
            PokemonSet::new("Arceus-Fire").with_item("Flame Plate"),
            PokemonSet::new("Arceus-Water").with_item("Splash Plate"),
        ],
    );
    assert_eq!(
        problems,
        vec![Problem::SpeciesClause {
            species: "Arceus".into()
        }]
    );
}

// --- Generic checks ---

#[test]
fn more_than_four_moves() {
    let catalog = catalog();
    let five = PokemonSet::new("Garchomp").with_moves([
        "Earthquake",
        "Outrage",
        "Stone Edge",
        "Swords Dance",
        "Dragon Claw",
    ]);
    assert_eq!(
        validate(&catalog, "[Gen 9] OU", vec![five.clone()]),
        vec![Problem::TooManyMoves {
            set: "Garchomp".into(),
            count: 5
        }]
    );

    let mut four = five;
    four.moves.pop();
    assert!(validate(&catalog, "[Gen 9] OU", vec![four]).is_empty());
}

#[test]
fn enforcement_drops_duplicate_moves_silently() {
    let catalog = catalog();
    let mut team = Team::new(vec![
        PokemonSet::new("Pikachu").with_moves(["Tackle", "Tackle", "Scratch"]),
    ]);
    let problems = catalog.validate_team(&mut team, "[Gen 9] OU").unwrap();
    assert!(problems.is_empty());
    assert_eq!(team.sets[0].moves, vec!["Tackle", "Scratch"]);
}

#[test]
fn no_enforcement_keeps_moves_as_submitted() {
    let catalog = catalog();
    let mut team = Team::new(vec![
        PokemonSet::new("Pikachu").with_moves(["Tackle", "Tackle", "Scratch"]),
    ]);
    catalog.validate_team(&mut team, "[Gen 9] Custom Game").unwrap();
    assert_eq!(team.sets[0].moves, vec!["Tackle", "Tackle", "Scratch"]);
}

#[test]
fn generation_and_existence_checks() {
    let catalog = catalog();
    let problems = validate(
        &catalog,
        "[Gen 4] OU",
        vec![PokemonSet::new("Gholdengo").with_moves(["Make It Rain"])],
    );
    assert_eq!(
        problems,
        vec![
            Problem::NotInGen {
                name: "Gholdengo".into(),
                generation: 4
            },
            Problem::NotInGen {
                name: "Make It Rain".into(),
                generation: 4
            },
        ]
    );

    let problems = validate(
        &catalog,
        "[Gen 9] Custom Game",
        vec![
            PokemonSet::new("Agumon"),
            PokemonSet::new("Missingno.")
                .with_item("Berserk Gene")
                .with_moves(["Pepper Breath"]),
        ],
    );
    assert_eq!(
        messages(&problems),
        vec![
            "The Pokemon \"Agumon\" does not exist.",
            "Missingno. is not a real Pokemon.",
            "Missingno.'s move \"Pepper Breath\" does not exist.",
            "Berserk Gene is not a real item.",
        ]
    );
}

#[test]
fn nonstandard_checks_apply_per_field() {
    let catalog = catalog();
    let problems = validate(
        &catalog,
        "[Gen 9] Custom Game",
        vec![
            PokemonSet::new("Pikachu-Starter")
                .with_ability("Mountaineer")
                .with_moves(["Baddy Bad"]),
        ],
    );
    assert_eq!(
        problems,
        vec![
            Problem::Nonstandard {
                kind: EntityKind::Species,
                name: "Pikachu-Starter".into()
            },
            Problem::Nonstandard {
                kind: EntityKind::Ability,
                name: "Mountaineer".into()
            },
            Problem::Nonstandard {
                kind: EntityKind::Move,
                name: "Baddy Bad".into()
            },
        ]
    );
}

#[test]
fn level_limits() {
    let catalog = catalog();
    let problems = validate(
        &catalog,
        "[Gen 9] OU",
        vec![
            PokemonSet::new("Pikachu").with_level(101),
            PokemonSet::new("Garchomp").with_level(0),
            PokemonSet::new("Gengar").with_level(100),
        ],
    );
    assert_eq!(
        problems,
        vec![
            Problem::LevelTooHigh {
                set: "Pikachu".into(),
                level: 101,
                max: 100
            },
            Problem::LevelTooLow {
                set: "Garchomp".into(),
                level: 0
            },
        ]
    );
}

#[test]
fn forced_level_overrides_submitted_level() {
    let catalog = catalog();
    let mut team = Team::new(vec![PokemonSet::new("Magikarp").with_level(100)]);
    let problems = catalog
        .validate_team(&mut team, "[Gen 9] Little Cup")
        .unwrap();
    assert!(problems.is_empty(), "{problems:?}");
    assert_eq!(team.sets[0].forced_level, Some(5));
    assert_eq!(team.sets[0].tier.as_deref(), Some("LC"));
}

#[test]
fn team_size_limits() {
    let catalog = catalog();
    assert_eq!(validate(&catalog, "[Gen 9] OU", Vec::new()), vec![Problem::TeamEmpty]);

    let names = ["Pikachu", "Garchomp", "Tyranitar", "Gengar"];
    let problems = validate(
        &catalog,
        "[Gen 9] 1v1",
        names.into_iter().map(PokemonSet::new).collect(),
    );
    assert_eq!(problems, vec![Problem::TeamTooLarge { size: 4, max: 3 }]);
}

// --- Banlist ---

#[test]
fn problems_follow_phase_order() {
    let catalog = catalog();
    let problems = validate(
        &catalog,
        "[Gen 9] OU",
        vec![
            PokemonSet::new("Mewtwo")
                .with_ability("Moody")
                .with_moves(["Fissure", "Psychic"]),
        ],
    );
    insta::assert_snapshot!(messages(&problems).join("\n"), @r"
    OHKO Clause: Fissure is banned.
    Mewtwo is in Uber, which is banned.
    Moody is banned.
    ");
}

#[test]
fn banned_species_and_tags() {
    let catalog = catalog();
    assert_eq!(
        validate(&catalog, "[Gen 4] OU", vec![PokemonSet::new("Garchomp")]),
        vec![Problem::Banned {
            name: "Garchomp".into()
        }]
    );
    assert_eq!(
        validate(&catalog, "[Gen 9] 1v1", vec![PokemonSet::new("Mew")]),
        vec![Problem::BannedTag {
            species: "Mew".into(),
            tag: "Mythical".into()
        }]
    );
    assert_eq!(
        validate(
            &catalog,
            "[Gen 9] OU",
            vec![PokemonSet::new("Gengar").with_item("King's Rock")]
        ),
        vec![Problem::Banned {
            name: "King's Rock".into()
        }]
    );
}

#[test]
fn inherited_bans_apply() {
    let catalog = catalog();
    let problems = validate(
        &catalog,
        "[Gen 9] UU",
        vec![
            PokemonSet::new("Garchomp"),
            PokemonSet::new("Politoed").with_ability("Drizzle"),
        ],
    );
    assert_eq!(
        problems,
        vec![
            Problem::BannedTag {
                species: "Garchomp".into(),
                tag: "OU".into()
            },
            Problem::Banned {
                name: "Drizzle".into()
            },
        ]
    );
}

#[test]
fn unbans_and_removed_clauses() {
    let catalog = catalog();
    let mewtwo = PokemonSet::new("Mewtwo")
        .with_ability("Moody")
        .with_moves(["Fissure", "Baton Pass", "Double Team"]);
    let problems = validate(&catalog, "[Gen 9] Anything Goes", vec![mewtwo.clone(), mewtwo]);
    assert!(problems.is_empty(), "{problems:?}");
}

#[test]
fn base_species_ban_covers_formes() {
    let catalog = custom_catalog(vec![
        FormatDefinition::new("No Giratina").with_banlist(["Giratina"]),
    ]);
    assert_eq!(
        validate(&catalog, "No Giratina", vec![PokemonSet::new("Giratina-Origin")]),
        vec![Problem::Banned {
            name: "Giratina-Origin".into()
        }]
    );
}

#[test]
fn explicit_unban_beats_tag_ban() {
    let catalog = custom_catalog(vec![
        FormatDefinition::new("Mewtwo Cup").with_banlist(["Uber", "+Mewtwo"]),
    ]);
    let problems = validate(
        &catalog,
        "Mewtwo Cup",
        vec![PokemonSet::new("Mewtwo"), PokemonSet::new("Lugia")],
    );
    assert_eq!(
        problems,
        vec![Problem::BannedTag {
            species: "Lugia".into(),
            tag: "Uber".into()
        }]
    );
}

#[test]
fn unbanned_species_still_carries_its_tags_into_compound_bans() {
    let catalog = custom_catalog(vec![
        FormatDefinition::new("Passer Cup").with_banlist(["Uber", "+Mewtwo", "Uber ++ Baton Pass"]),
    ]);
    let passer = PokemonSet::new("Mewtwo").with_moves(["Baton Pass"]);
    assert_eq!(
        validate(&catalog, "Passer Cup", vec![passer]),
        vec![Problem::ComplexBanned {
            set: "Mewtwo".into(),
            first: "Baton Pass".into(),
            second: "uber".into(),
        }]
    );

    let plain = PokemonSet::new("Mewtwo").with_moves(["Psychic"]);
    assert!(validate(&catalog, "Passer Cup", vec![plain]).is_empty());
}

#[test]
fn enforcement_rewrites_formes_before_ban_checks() {
    let catalog = custom_catalog(vec![
        FormatDefinition::new("No Origin")
            .with_ruleset(["Legality Enforcement"])
            .with_banlist(["Giratina-Origin"]),
    ]);
    let mut team = Team::new(vec![PokemonSet::new("Giratina").with_item("Griseous Orb")]);
    let problems = catalog.validate_team(&mut team, "No Origin").unwrap();
    assert_eq!(team.sets[0].species, "Giratina-Origin");
    assert_eq!(
        problems,
        vec![Problem::Banned {
            name: "Giratina-Origin".into()
        }]
    );
}

// --- Clauses ---

#[test]
fn item_and_sash_clauses() {
    let catalog = catalog();
    let problems = validate(
        &catalog,
        "[Gen 9] Point Budget",
        vec![
            PokemonSet::new("Pikachu").with_item("Focus Sash"),
            PokemonSet::new("Garchomp").with_item("Focus Sash"),
        ],
    );
    assert_eq!(
        problems,
        vec![
            Problem::ItemClause {
                item: "Focus Sash".into()
            },
            Problem::SashClause { count: 2 },
        ]
    );
}

#[test]
fn strict_same_type_checks_forced_formes() {
    let catalog = catalog();
    let flying = ["Charizard", "Dragonite", "Gyarados"];

    let plain: Vec<_> = flying.into_iter().map(PokemonSet::new).collect();
    assert!(validate(&catalog, "[Gen 9] Monotype", plain.clone()).is_empty());

    let mut mega = plain;
    mega[0] = PokemonSet::new("Charizard").with_item("Charizardite X");
    assert_eq!(
        validate(&catalog, "[Gen 9] Monotype", mega),
        vec![Problem::StrictSameTypeClause {
            set: "Charizard".into(),
            forme: "Charizard-Mega-X".into()
        }]
    );
}

#[test]
fn strict_same_type_runs_the_base_clause() {
    let catalog = catalog();
    let problems = validate(
        &catalog,
        "[Gen 9] Monotype",
        vec![PokemonSet::new("Pikachu"), PokemonSet::new("Garchomp")],
    );
    assert_eq!(problems, vec![Problem::SameTypeClause]);
}

#[test]
fn validate_set_skips_team_rules() {
    let catalog = catalog();
    let mut set = PokemonSet::new("Garchomp").with_moves(["Fissure", "Fissure", "Earthquake"]);
    let problems = catalog.validate_set(&mut set, "[Gen 9] OU").unwrap();
    assert_eq!(
        problems,
        vec![Problem::OhkoClause {
            name: "Fissure".into()
        }]
    );
    assert_eq!(set.moves, vec!["Fissure", "Earthquake"]);
    assert_eq!(set.tier.as_deref(), Some("OU"));
}

#[test]
fn problems_serialize_with_problem_tag() {
    let value = serde_json::to_value(Problem::Banned {
        name: "Moody".into(),
    })
    .unwrap();
    assert_eq!(value, serde_json::json!({"problem": "banned", "name": "Moody"}));
}

// --- Determinism ---

const SPECIES: &[&str] = &[
    "Pikachu", "Garchomp", "Mewtwo", "Ninjask", "Gengar", "Giratina", "Keldeo", "Agumon",
];
const MOVES: &[&str] = &[
    "Tackle", "Baton Pass", "Fissure", "Secret Sword", "Spore", "Earthquake", "Nothing",
];
const ITEMS: &[&str] = &["", "Focus Sash", "Griseous Orb", "King's Rock", "Leftovers"];
const ABILITIES: &[&str] = &["", "Speed Boost", "Moody", "Levitate"];

fn arb_set() -> impl Strategy<Value = PokemonSet> {
    (
        prop::sample::select(SPECIES),
        prop::collection::vec(prop::sample::select(MOVES), 0..7),
        prop::sample::select(ITEMS),
        prop::sample::select(ABILITIES),
        prop::option::of(0u32..120),
    )
        .prop_map(|(species, moves, item, ability, level)| {
            let mut set = PokemonSet::new(species)
                .with_moves(moves)
                .with_item(item)
                .with_ability(ability);
            set.level = level;
            set
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn validation_is_deterministic(sets in prop::collection::vec(arb_set(), 0..8)) {
        let catalog = catalog();
        for format in ["[Gen 9] OU", "[Gen 9] Point Budget", "[Gen 9] Monotype"] {
            let mut first = Team::new(sets.clone());
            let mut second = Team::new(sets.clone());
            let a = catalog.validate_team(&mut first, format).unwrap();
            let b = catalog.validate_team(&mut second, format).unwrap();
            prop_assert_eq!(a, b);
            prop_assert_eq!(first, second);
        }
    }
}
