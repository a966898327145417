//! # SHAFTWORKS Procedural Generation
//!
//! Deterministic, biome-themed mineshaft generation.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed, config and biome always produce the same mineshaft
//! 2. **Two phases**: Growth lays out pieces without touching the world; carving writes blocks
//! 3. **Themed**: Block palettes and decorations come from the biome at the entrance
//! 4. **Persistent**: A generated structure is restored from its record, never regrown
//!
//! ## Core Components
//!
//! - `PieceGenerator`: Constrained random walk over tunnel, room and crossing pieces
//! - `ThemeRepository`: Ordered biome-tag matching of block palettes
//! - `PieceCanvas`: Local-frame block writes for one piece
//! - `MineshaftStructure`: Generation, carving and persistence of one mineshaft
//!
//! ## Example
//!
//! ```rust,ignore
//! use shaftworks_procedural::{
//!     Biome, GeneratorConfig, MemoryWorld, MineshaftStructure, ThemeRepository, WorldSeed,
//! };
//! use shaftworks_shared::ChunkCoord;
//!
//! let themes = ThemeRepository::builtin();
//! let mut shaft = MineshaftStructure::generate(
//!     WorldSeed::new(12345),
//!     ChunkCoord::new(4, -2),
//!     &themes,
//!     &Biome::Desert,
//!     &GeneratorConfig::default(),
//! );
//!
//! let mut world = MemoryWorld::stone();
//! let summary = shaft.carve(&mut world);
//! assert_eq!(summary.placed + summary.vetoed(), shaft.pieces().len() as u32);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod biome;
pub mod config;
pub mod error;
pub mod generator;
pub mod persistence;
pub mod pieces;
pub mod placement;
pub mod random;
pub mod selector;
pub mod structure;
pub mod theme;
pub mod world;

pub use biome::{Biome, BiomeSource, BiomeTags};
pub use config::{ChainCosts, CorridorWeights, GeneratorConfig, HeightRange};
pub use error::{ConfigError, ConfigResult, PersistenceError, PersistenceResult};
pub use generator::{GrowthState, GrowthStats, PieceGenerator};
pub use pieces::{CarveOutcome, Piece, PieceTag, PieceVariant, TurnSide, VetoReason};
pub use placement::PlacementBounds;
pub use random::{StructureRandom, WorldSeed};
pub use selector::{BlockSelector, SelectorEntry};
pub use structure::{CarveSummary, MineshaftStructure};
pub use theme::{LegVariant, ThemeRepository, ThemeStore, ThemeVariant};
pub use world::{MemoryWorld, WorldAccess};
