//! # Carving Integration Tests
//!
//! Proves that carving is deterministic, honours the liquid and ocean vetoes,
//! lays turn rails towards the open side and only grows cacti on sand.

use shaftworks_procedural::pieces::uses_left_layout;
use shaftworks_procedural::{
    Biome, CarveOutcome, GeneratorConfig, MemoryWorld, MineshaftStructure, Piece, PieceVariant,
    StructureRandom, ThemeRepository, ThemeVariant, TurnSide, VetoReason, WorldAccess, WorldSeed,
};
use shaftworks_shared::{BlockId, BlockPos, ChunkCoord, Direction, RailShape};

fn generate(seed: u64, themes: &ThemeRepository, biome: Biome) -> MineshaftStructure {
    MineshaftStructure::generate(
        WorldSeed::new(seed),
        ChunkCoord::new(-1, 2),
        themes,
        &biome,
        &GeneratorConfig::default(),
    )
}

/// Test: Carving the same structure into identical worlds gives identical
/// blocks.
#[test]
fn test_carving_is_deterministic() {
    let themes = ThemeRepository::builtin();
    for (seed, biome) in [(1, Biome::Plains), (2, Biome::Desert), (3, Biome::Jungle), (4, Biome::Tundra)] {
        let mut a = generate(seed, &themes, biome);
        let mut b = generate(seed, &themes, biome);
        let mut world_a = MemoryWorld::stone().with_biome(biome);
        let mut world_b = MemoryWorld::stone().with_biome(biome);

        let summary_a = a.carve(&mut world_a);
        let summary_b = b.carve(&mut world_b);

        assert_eq!(summary_a, summary_b);
        assert_eq!(world_a.writes(), world_b.writes());
        assert_eq!(world_a.sorted_blocks(), world_b.sorted_blocks(), "seed {seed} diverged");
    }
}

/// Test: Carving in solid stone places every piece and opens air.
#[test]
fn test_carving_in_stone_places_everything() {
    let mut shaft = generate(9, &ThemeRepository::builtin(), Biome::Plains);
    let mut world = MemoryWorld::stone();
    let summary = shaft.carve(&mut world);

    assert_eq!(summary.placed as usize, shaft.pieces().len());
    assert_eq!(summary.vetoed(), 0);
    assert!(world.count("minecraft:air") > 0);
    assert!(world.count("minecraft:rail") > 0);
}

/// Test: A world full of water vetoes every piece and writes nothing.
#[test]
fn test_liquid_vetoes_every_piece() {
    let mut shaft = generate(5, &ThemeRepository::builtin(), Biome::Plains);
    let mut world = MemoryWorld::new(BlockId::WATER);
    let summary = shaft.carve(&mut world);

    assert_eq!(summary.liquid_vetoes as usize, shaft.pieces().len());
    assert_eq!(summary.placed, 0);
    assert_eq!(world.writes(), 0);
}

/// Test: An all-ocean world vetoes every piece.
#[test]
fn test_ocean_vetoes_every_piece() {
    let mut shaft = generate(6, &ThemeRepository::builtin(), Biome::Ocean);
    let mut world = MemoryWorld::stone().with_biome(Biome::Ocean);
    let summary = shaft.carve(&mut world);

    assert_eq!(summary.ocean_vetoes as usize, shaft.pieces().len());
    assert_eq!(world.writes(), 0);
}

/// Test: A north-facing crossing whose local floor corners are ocean is
/// vetoed, even though its world-space min/max corners are not.
#[test]
fn test_north_crossing_ocean_corners_veto() {
    let piece = Piece::new(PieceVariant::Crossing, BlockPos::new(0, 30, 0), Direction::North, 2);
    let bb = piece.bounding_box;
    let mut world = MemoryWorld::stone().with_biome(Biome::Plains);
    world.set_column_biome(bb.min.x, bb.max.z, Biome::Ocean);
    world.set_column_biome(bb.max.x, bb.min.z, Biome::Ocean);

    let mut rng = StructureRandom::new(WorldSeed::new(1));
    let outcome = piece.carve(&mut world, &ThemeVariant::oak(), &mut rng);

    assert_eq!(outcome, CarveOutcome::Vetoed(VetoReason::Ocean));
    assert_eq!(world.writes(), 0);
}

/// Test: A restored structure never carves.
#[test]
fn test_restored_structure_does_not_carve() {
    let themes = ThemeRepository::builtin();
    let shaft = generate(11, &themes, Biome::Forest);
    let mut restored = MineshaftStructure::from_bytes(&shaft.to_bytes(), &themes).unwrap();

    let mut world = MemoryWorld::stone();
    let summary = restored.carve(&mut world);
    assert_eq!(summary.placed, 0);
    assert_eq!(world.writes(), 0);
}

/// Test: Carving twice writes only once.
#[test]
fn test_second_carve_is_noop() {
    let mut shaft = generate(12, &ThemeRepository::builtin(), Biome::Plains);
    let mut world = MemoryWorld::stone();
    shaft.carve(&mut world);
    let snapshot = world.clone();
    shaft.carve(&mut world);
    assert_eq!(world, snapshot);
}

/// Test: For every facing and side, a turn opens the wall it turns towards
/// and curves its rail from the entry to that wall.
#[test]
fn test_turn_rails_follow_turn_direction() {
    let theme = ThemeVariant::oak();
    for facing in Direction::ALL {
        for side in [TurnSide::Left, TurnSide::Right] {
            let piece = Piece::new(PieceVariant::Turn { side }, BlockPos::new(0, 30, 0), facing, 0);
            let mut world = MemoryWorld::stone();
            let mut rng = StructureRandom::new(WorldSeed::new(1));
            piece.carve(&mut world, &theme, &mut rng);

            let bb = piece.bounding_box;
            let turn_to = side.apply(facing);
            let rail_y = bb.min.y + 1;

            let curve = BlockPos::new(bb.center().x, rail_y, bb.center().z);
            assert_eq!(
                world.block(curve),
                BlockId::rail(RailShape::from_connections(facing.opposite(), turn_to)),
                "{facing:?} {side:?} (left layout: {})",
                uses_left_layout(side, facing)
            );

            let open_wall = bb.exit_point(turn_to, rail_y).step(turn_to.opposite(), 1);
            assert_eq!(
                world.block(open_wall),
                BlockId::rail(RailShape::from_connections(turn_to, turn_to.opposite())),
                "{facing:?} {side:?}"
            );

            let closed_wall = bb.exit_point(turn_to.opposite(), rail_y).step(turn_to, 1);
            assert_ne!(world.block(closed_wall).base_name(), "minecraft:rail", "{facing:?} {side:?}");
        }
    }
}

/// Test: Cacti only grow on sand or red sand.
#[test]
fn test_cactus_needs_sand() {
    let mut cactus_theme = ThemeVariant::oak();
    cactus_theme.name = "cactus".into();
    cactus_theme.cactus_chance = 1.0;
    let themes = ThemeRepository::new(Vec::new(), cactus_theme);

    let mut shaft = generate(21, &themes, Biome::Plains);
    let mut stone = MemoryWorld::stone();
    shaft.carve(&mut stone);
    assert_eq!(stone.count("minecraft:cactus"), 0);

    let mut shaft = generate(21, &themes, Biome::Plains);
    let mut sand = MemoryWorld::new(BlockId::from_static("minecraft:sand"));
    shaft.carve(&mut sand);
    assert!(sand.count("minecraft:cactus") > 0);
}
