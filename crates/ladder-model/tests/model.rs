use ladder_model::{Id, PokemonSet, Team, parse_team, to_id};
use proptest::prelude::*;

#[test]
fn team_json_roundtrip_skips_derived_fields() {
    let mut set = PokemonSet::new("Garchomp")
        .with_item("Choice Scarf")
        .with_ability("Rough Skin")
        .with_moves(["Earthquake", "Outrage"]);
    set.tier = Some("OU".to_string());
    set.forced_level = Some(50);

    let json = serde_json::to_string(&Team::new(vec![set])).unwrap();
    assert!(!json.contains("tier"));
    assert!(!json.contains("forced_level"));

    let back = parse_team(&json).unwrap();
    assert_eq!(back.sets[0].tier, None);
    assert_eq!(back.sets[0].item_id(), Some(Id::new("choicescarf")));
}

#[test]
fn missing_fields_default_to_absent() {
    let team = parse_team(r#"[{"species": "Pikachu"}]"#).unwrap();
    let set = &team.sets[0];
    assert!(set.moves.is_empty());
    assert_eq!(set.ability, None);
    assert_eq!(set.level, None);
}

#[test]
fn export_and_json_agree() {
    let text = "Keldeo-Resolute @ Choice Specs\nAbility: Justified\n- Secret Sword\n- Hydro Pump\n";
    let json = r#"[{"species": "Keldeo-Resolute", "item": "Choice Specs", "ability": "Justified",
                   "moves": ["Secret Sword", "Hydro Pump"]}]"#;
    assert_eq!(parse_team(text).unwrap(), parse_team(json).unwrap());
}

proptest! {
    #[test]
    fn to_id_is_idempotent(name in ".{0,40}") {
        let once = to_id(&name);
        prop_assert_eq!(to_id(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
