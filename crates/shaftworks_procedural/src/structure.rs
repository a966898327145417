//! # Mineshaft Structure
//!
//! One generated mineshaft: its seed, chunk origin, theme and placed pieces.
//!
//! ## Lifecycle
//!
//! ```text
//! generate ──► pieces (no world writes) ──► carve(world) ──► materialized
//!                                                              ▲
//! from_bytes ──────────────────────────────────────────────────┘
//! ```
//!
//! Growth and carving draw from separate streams derived from the structure
//! seed, so changing how many draws carving makes never changes the layout.
//! A restored structure is already materialized: its blocks live in the host
//! world, and carving it again is a no-op.

use shaftworks_shared::{BoundingBox, ChunkCoord, Direction};

use crate::biome::BiomeSource;
use crate::config::GeneratorConfig;
use crate::error::{PersistenceError, PersistenceResult};
use crate::generator::PieceGenerator;
use crate::persistence::{decode_frame, encode_frame, ByteReader, ByteWriter};
use crate::pieces::{CarveOutcome, Piece, PieceTag, PieceVariant, VetoReason};
use crate::random::{StructureRandom, WorldSeed};
use crate::theme::{ThemeRepository, ThemeVariant};
use crate::world::WorldAccess;

/// Stream id for growth draws.
const GROWTH_STREAM: u64 = 0x6772_6f77;
/// Stream id for carving draws.
const CARVE_STREAM: u64 = 0x6361_7276;

/// Tag, box, facing and chain length of a piece record.
const MIN_PIECE_RECORD: usize = 1 + 6 * 4 + 1 + 4;

/// Counts from one carve pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveSummary {
    /// Pieces written to the world.
    pub placed: u32,
    /// Pieces skipped because they touched water or lava.
    pub liquid_vetoes: u32,
    /// Pieces skipped because they sat in an ocean.
    pub ocean_vetoes: u32,
}

impl CarveSummary {
    /// Total vetoed pieces.
    #[must_use]
    pub const fn vetoed(&self) -> u32 {
        self.liquid_vetoes + self.ocean_vetoes
    }
}

/// A generated (or restored) mineshaft.
#[derive(Clone, Debug, PartialEq)]
pub struct MineshaftStructure {
    seed: WorldSeed,
    origin: ChunkCoord,
    theme: ThemeVariant,
    chain_budget: u32,
    pieces: Vec<Piece>,
    materialized: bool,
}

impl MineshaftStructure {
    /// Grows a mineshaft rooted in chunk `origin`.
    ///
    /// The theme is resolved from the biome at the start piece's centre.
    /// No blocks are written; call [`Self::carve`] for that.
    pub fn generate<B: BiomeSource + ?Sized>(
        seed: WorldSeed,
        origin: ChunkCoord,
        themes: &ThemeRepository,
        biomes: &B,
        config: &GeneratorConfig,
    ) -> Self {
        let mut rng = StructureRandom::new(seed.derive(GROWTH_STREAM));

        let (lowest, highest) = config.start_floor_range();
        let start_y = rng.next_in_range(lowest, highest);
        let center = origin.center(start_y);
        let tags = biomes.biome_tags(center);
        let theme = themes.resolve(&tags).clone();
        let facing = rng.next_direction();

        let (width, height, length) = PieceTag::Entrance.dimensions();
        let entrance_box = BoundingBox::new(
            center.offset(-width / 2, 0, -length / 2),
            center.offset(width / 2, height - 1, length / 2),
        );
        let start = Piece::with_box(PieceVariant::Entrance, entrance_box, facing, config.chain_budget);

        let mut generator = PieceGenerator::new(config, config.bounds(center), start);
        let stats = generator.run(&mut rng);
        let pieces = generator.into_pieces();

        tracing::debug!(
            "Generated mineshaft at chunk ({}, {}): {} pieces, theme {}, biome {}, {} collisions, {} out of bounds, {} capped",
            origin.x,
            origin.z,
            pieces.len(),
            theme.name,
            tags,
            stats.collisions,
            stats.out_of_bounds,
            stats.capped
        );

        Self {
            seed,
            origin,
            theme,
            chain_budget: config.chain_budget,
            pieces,
            materialized: false,
        }
    }

    /// Carves every piece into `world` in placement order.
    ///
    /// Each piece is re-validated first; vetoed pieces write nothing. A
    /// materialized structure is left alone and reports an empty summary.
    pub fn carve<W: WorldAccess + ?Sized>(&mut self, world: &mut W) -> CarveSummary {
        let mut summary = CarveSummary::default();
        if self.materialized {
            tracing::debug!(
                "Mineshaft at chunk ({}, {}) already materialized, skipping carve",
                self.origin.x,
                self.origin.z
            );
            return summary;
        }

        let mut rng = StructureRandom::new(self.seed.derive(CARVE_STREAM));
        for piece in &self.pieces {
            match piece.carve(world, &self.theme, &mut rng) {
                CarveOutcome::Placed => summary.placed += 1,
                CarveOutcome::Vetoed(VetoReason::Liquid) => summary.liquid_vetoes += 1,
                CarveOutcome::Vetoed(VetoReason::Ocean) => summary.ocean_vetoes += 1,
            }
        }
        self.materialized = true;

        tracing::debug!(
            "Carved mineshaft at chunk ({}, {}): {} placed, {} vetoed",
            self.origin.x,
            self.origin.z,
            summary.placed,
            summary.vetoed()
        );
        summary
    }

    /// Structure seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Chunk the structure starts in.
    #[must_use]
    pub const fn origin(&self) -> ChunkCoord {
        self.origin
    }

    /// Resolved theme.
    #[must_use]
    pub const fn theme(&self) -> &ThemeVariant {
        &self.theme
    }

    /// Chain length the start piece was given.
    #[must_use]
    pub const fn chain_budget(&self) -> u32 {
        self.chain_budget
    }

    /// Placed pieces; the first is always the entrance.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns true once the structure's blocks exist in the world.
    #[must_use]
    pub const fn is_materialized(&self) -> bool {
        self.materialized
    }

    /// Union of all piece boxes.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.pieces
            .iter()
            .map(|piece| piece.bounding_box)
            .reduce(|a, b| a.union(&b))
    }

    /// Facing of the entrance.
    #[must_use]
    pub fn facing(&self) -> Option<Direction> {
        self.pieces.first().map(|piece| piece.facing)
    }

    /// Encodes the structure as a framed record.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut body = ByteWriter::new();
        body.put_u64(self.seed.value());
        body.put_i32(self.origin.x);
        body.put_i32(self.origin.z);
        body.put_u32(self.chain_budget);
        body.put_str(&self.theme.name);
        body.put_u32(self.pieces.len() as u32);
        for piece in &self.pieces {
            piece.write_record(&mut body);
        }
        encode_frame(&body.into_inner())
    }

    /// Restores a structure written by [`Self::to_bytes`].
    ///
    /// Growth and carving are not re-run; the result is materialized. An
    /// unknown theme name falls back to the repository default.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError` if the frame or any record is invalid.
    pub fn from_bytes(bytes: &[u8], themes: &ThemeRepository) -> PersistenceResult<Self> {
        let body = decode_frame(bytes)?;
        let mut reader = ByteReader::new(&body);

        let seed = WorldSeed::new(reader.get_u64()?);
        let origin = ChunkCoord::new(reader.get_i32()?, reader.get_i32()?);
        let chain_budget = reader.get_u32()?;
        let theme_name = reader.get_str()?;
        let count = reader.get_u32()? as usize;

        if count.saturating_mul(MIN_PIECE_RECORD) > reader.remaining() {
            return Err(PersistenceError::Truncated);
        }
        let mut pieces = Vec::with_capacity(count);
        for _ in 0..count {
            pieces.push(Piece::read_record(&mut reader)?);
        }

        let theme = if let Some(theme) = themes.by_name(&theme_name) {
            theme.clone()
        } else {
            tracing::warn!(
                "Unknown theme '{}' in mineshaft record, using '{}'",
                theme_name,
                themes.default_variant.name
            );
            themes.default_variant.clone()
        };

        Ok(Self {
            seed,
            origin,
            theme,
            chain_budget,
            pieces,
            materialized: true,
        })
    }
}
