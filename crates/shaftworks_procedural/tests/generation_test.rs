//! # Growth Integration Tests
//!
//! Proves that growth is deterministic, terminates for any budget and never
//! places overlapping pieces.

use shaftworks_procedural::{
    Biome, BiomeTags, GeneratorConfig, MineshaftStructure, PieceTag, ThemeRepository, ThemeVariant,
    WorldSeed,
};
use shaftworks_shared::ChunkCoord;

fn generate(seed: u64, config: &GeneratorConfig) -> MineshaftStructure {
    MineshaftStructure::generate(
        WorldSeed::new(seed),
        ChunkCoord::new(0, 0),
        &ThemeRepository::builtin(),
        &Biome::Plains,
        config,
    )
}

/// Test: Same seed, same config, same biome gives the same pieces.
#[test]
fn test_generation_is_deterministic() {
    let config = GeneratorConfig::default();
    for seed in [0, 1, 42, 12345, u64::MAX] {
        let a = generate(seed, &config);
        let b = generate(seed, &config);
        assert_eq!(a.pieces(), b.pieces(), "seed {seed} diverged");
        assert_eq!(a.theme().name, b.theme().name);
    }
}

/// Test: Different seeds explore different layouts.
#[test]
fn test_seeds_vary_layout() {
    let config = GeneratorConfig::default();
    let layouts: Vec<_> = (0..16).map(|seed| generate(seed, &config).pieces().to_vec()).collect();
    let distinct = layouts
        .iter()
        .enumerate()
        .filter(|(i, layout)| layouts[..*i].iter().all(|other| other != *layout))
        .count();
    assert!(distinct > 8, "only {distinct} distinct layouts out of 16");
}

/// Test: No two placed boxes intersect, for many seeds and budgets.
#[test]
fn test_pieces_never_overlap() {
    for budget in [4, 12, 24] {
        let config = GeneratorConfig {
            chain_budget: budget,
            ..GeneratorConfig::default()
        };
        for seed in 0..40 {
            let shaft = generate(seed, &config);
            let pieces = shaft.pieces();
            for (i, a) in pieces.iter().enumerate() {
                for b in &pieces[i + 1..] {
                    assert!(
                        !a.bounding_box.intersects(&b.bounding_box),
                        "seed {seed}, budget {budget}: {} overlaps {}",
                        a.bounding_box,
                        b.bounding_box
                    );
                }
            }
        }
    }
}

/// Test: Growth terminates for every budget, and budget 0 leaves only the
/// entrance.
#[test]
fn test_growth_terminates_for_any_budget() {
    for budget in [0, 1, 2, 8, 40] {
        let config = GeneratorConfig {
            chain_budget: budget,
            ..GeneratorConfig::default()
        };
        let shaft = generate(7, &config);
        assert!(!shaft.pieces().is_empty());
        assert_eq!(shaft.pieces()[0].tag(), PieceTag::Entrance);
        if budget == 0 {
            assert_eq!(shaft.pieces().len(), 1);
        }
    }
}

/// Test: Every piece stays inside the vertical and horizontal bounds.
#[test]
fn test_pieces_stay_in_bounds() {
    let config = GeneratorConfig {
        chain_budget: 30,
        max_extent: 48,
        ..GeneratorConfig::default()
    };
    for seed in 0..20 {
        let shaft = generate(seed, &config);
        let bounds = config.bounds(shaft.pieces()[0].bounding_box.center());
        for piece in shaft.pieces() {
            assert!(bounds.admits(&piece.bounding_box), "seed {seed}: {}", piece.bounding_box);
        }
    }
}

/// Test: Only the start piece carries the full chain budget.
#[test]
fn test_chain_lengths_shrink() {
    let config = GeneratorConfig::default();
    for seed in 0..20 {
        let shaft = generate(seed, &config);
        let (start, rest) = shaft.pieces().split_first().unwrap();
        assert_eq!(start.chain_length, config.chain_budget);
        assert!(rest.iter().all(|p| p.chain_length < config.chain_budget));
    }
}

/// Test: Theme resolution is first-match over tag groups, else default.
#[test]
fn test_theme_resolution_first_match() {
    let mut first = ThemeVariant::oak();
    first.name = "first".into();
    first.biome_tags = vec![vec!["A".into(), "B".into()]];
    let mut second = ThemeVariant::oak();
    second.name = "second".into();
    second.biome_tags = vec![vec!["C".into()], vec!["A".into()]];
    let mut fallback = ThemeVariant::oak();
    fallback.name = "fallback".into();
    let themes = ThemeRepository::new(vec![first, second], fallback);

    let resolve = |tags: &[&str]| {
        let tags: BiomeTags = tags.iter().copied().collect();
        MineshaftStructure::generate(
            WorldSeed::new(1),
            ChunkCoord::new(0, 0),
            &themes,
            &tags,
            &GeneratorConfig::default(),
        )
        .theme()
        .name
        .clone()
    };

    assert_eq!(resolve(&["A", "B"]), "first");
    assert_eq!(resolve(&["A", "B", "C"]), "first");
    assert_eq!(resolve(&["C"]), "second");
    assert_eq!(resolve(&["A"]), "second");
    assert_eq!(resolve(&["B"]), "fallback");
    assert_eq!(resolve(&[]), "fallback");
}

/// Test: Built-in themes follow the biome at the entrance.
#[test]
fn test_builtin_themes_by_biome() {
    let themes = ThemeRepository::builtin();
    let config = GeneratorConfig::default();
    let theme_for = |biome: Biome| {
        MineshaftStructure::generate(WorldSeed::new(3), ChunkCoord::new(1, 1), &themes, &biome, &config)
            .theme()
            .name
            .clone()
    };
    assert_eq!(theme_for(Biome::Plains), "oak");
    assert_eq!(theme_for(Biome::Desert), "desert");
    assert_eq!(theme_for(Biome::DesertLakes), "red_desert");
    assert_eq!(theme_for(Biome::Badlands), "mesa");
}

/// Test: Forcing every corridor to a dead end stops growth after one ring.
#[test]
fn test_dead_end_only_corridors() {
    let mut config = GeneratorConfig::default();
    config.corridor_weights.turn = 0.0;
    config.corridor_weights.stairs = 0.0;
    config.corridor_weights.crossing = 0.0;
    config.corridor_weights.dead_end = 1.0;
    for seed in 0..10 {
        let shaft = generate(seed, &config);
        assert_eq!(shaft.pieces().len(), 5, "seed {seed}");
        assert!(shaft.pieces()[1..].iter().all(|p| p.tag() == PieceTag::DeadEnd));
    }
}
