use wavecast_core::{
    resolve_description, resolve_stats, Caster, DistinctModifiers, RngState, SpellBuilder,
    MAX_MODIFIERS,
};
use wavecast_data::{load_catalog, load_reward_config, load_spell_catalog, SPELLS_FILE};
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

#[test]
fn bundled_assets_load_and_validate() {
    let config = load_reward_config(&assets_root()).expect("load reward config");
    let catalog = load_spell_catalog(&assets_root().join(SPELLS_FILE)).expect("load catalog");
    assert!(!config.base_spells.is_empty());
    assert!(!catalog.is_empty());
}

#[test]
fn every_configured_piece_has_a_description() {
    let config = load_reward_config(&assets_root()).expect("load reward config");
    let catalog = load_catalog(&assets_root());
    for base in &config.base_spells {
        assert!(
            catalog.find_by_name(&base.name).is_some(),
            "missing catalog entry for base {}",
            base.name
        );
    }
    for modifier in &config.modifiers {
        assert!(
            catalog.find_by_name(&modifier.word).is_some(),
            "missing catalog entry for modifier {}",
            modifier.word
        );
    }
}

#[test]
fn built_rewards_describe_every_layer() {
    let config = load_reward_config(&assets_root()).expect("load reward config");
    let catalog = load_catalog(&assets_root());
    let builder = SpellBuilder::new(&config, &DistinctModifiers);
    let caster = Caster::default();
    let mut rng = RngState::from_seed(0xC0FFEE);
    for _ in 0..200 {
        let spell = builder.build(&caster, &mut rng).expect("build");
        assert!(spell.modifier_count() <= MAX_MODIFIERS);
        let lines = resolve_description(&spell, &catalog);
        assert_eq!(lines.len(), spell.node_count());
        let base_line = format!("{}:", spell.base().display_name);
        assert!(lines.last().is_some_and(|line| line.starts_with(&base_line)));
        for (line, modifier) in lines.iter().zip(spell.modifiers()) {
            assert!(line.starts_with(&format!("{}:", modifier.word())));
        }
        let stats = resolve_stats(&spell);
        assert!(stats.damage >= 0.0 && stats.mana >= 0.0);
    }
}

#[test]
fn missing_asset_dir_yields_empty_catalog() {
    let catalog = load_catalog(&assets_root().join("does_not_exist"));
    assert!(catalog.is_empty());
}
