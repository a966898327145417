//! # World Access
//!
//! Carving reads and writes blocks through [`WorldAccess`], which the host
//! implements over its own chunk storage. [`MemoryWorld`] is a sparse
//! in-memory implementation for tests, benchmarks and headless tools.

use std::collections::HashMap;

use shaftworks_shared::{BlockId, BlockPos, BoundingBox};

use crate::biome::{BiomeSource, BiomeTags};

/// Block and biome access used while carving.
pub trait WorldAccess {
    /// Block currently at `pos`.
    fn block(&self, pos: BlockPos) -> BlockId;

    /// Replaces the block at `pos`.
    fn set_block(&mut self, pos: BlockPos, block: BlockId);

    /// Returns true if `pos` holds water or lava.
    fn is_liquid(&self, pos: BlockPos) -> bool {
        self.block(pos).is_liquid()
    }

    /// Biome tags at `pos`.
    fn biome_at(&self, pos: BlockPos) -> BiomeTags;
}

/// Sparse in-memory world.
///
/// Every position not explicitly written holds the fill block. Biome tags are
/// uniform unless a column override is set.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryWorld {
    blocks: HashMap<BlockPos, BlockId>,
    fill: BlockId,
    biome: BiomeTags,
    column_biomes: HashMap<(i32, i32), BiomeTags>,
    writes: u64,
}

impl MemoryWorld {
    /// Creates a world made entirely of `fill` with no biome tags.
    #[must_use]
    pub fn new(fill: BlockId) -> Self {
        Self {
            blocks: HashMap::new(),
            fill,
            biome: BiomeTags::new(),
            column_biomes: HashMap::new(),
            writes: 0,
        }
    }

    /// Solid stone world.
    #[must_use]
    pub fn stone() -> Self {
        Self::new(BlockId::STONE)
    }

    /// Sets the uniform biome tags (builder style).
    #[must_use]
    pub fn with_biome(mut self, tags: impl Into<BiomeTags>) -> Self {
        self.biome = tags.into();
        self
    }

    /// Overrides biome tags for one `(x, z)` column.
    pub fn set_column_biome(&mut self, x: i32, z: i32, tags: impl Into<BiomeTags>) {
        self.column_biomes.insert((x, z), tags.into());
    }

    /// Writes `block` to every position inside `area`.
    pub fn fill_box(&mut self, area: &BoundingBox, block: &BlockId) {
        for x in area.min.x..=area.max.x {
            for y in area.min.y..=area.max.y {
                for z in area.min.z..=area.max.z {
                    self.set_block(BlockPos::new(x, y, z), block.clone());
                }
            }
        }
    }

    /// Number of `set_block` calls made so far.
    #[must_use]
    pub const fn writes(&self) -> u64 {
        self.writes
    }

    /// Number of explicitly stored positions.
    #[must_use]
    pub fn stored(&self) -> usize {
        self.blocks.len()
    }

    /// Counts stored positions whose base name equals `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.blocks.values().filter(|b| b.base_name() == name).count()
    }

    /// Stored positions in a stable order.
    #[must_use]
    pub fn sorted_blocks(&self) -> Vec<(BlockPos, &BlockId)> {
        let mut out: Vec<_> = self.blocks.iter().map(|(pos, b)| (*pos, b)).collect();
        out.sort_by_key(|(pos, _)| *pos);
        out
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::stone()
    }
}

impl WorldAccess for MemoryWorld {
    fn block(&self, pos: BlockPos) -> BlockId {
        self.blocks.get(&pos).cloned().unwrap_or_else(|| self.fill.clone())
    }

    fn set_block(&mut self, pos: BlockPos, block: BlockId) {
        self.writes += 1;
        self.blocks.insert(pos, block);
    }

    fn biome_at(&self, pos: BlockPos) -> BiomeTags {
        self.column_biomes
            .get(&(pos.x, pos.z))
            .unwrap_or(&self.biome)
            .clone()
    }
}

impl BiomeSource for MemoryWorld {
    fn biome_tags(&self, pos: BlockPos) -> BiomeTags {
        self.biome_at(pos)
    }
}
